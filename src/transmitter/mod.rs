//! Transmitter: owns an output line and drives code words onto it.
//!
//! Pure translation lives in `codeword` (address → word) and
//! `timing::waveform` (symbol → pulses). The transmitter only handles the
//! line, the repeat loop and the busy-wait timing.
//!
//! A send blocks the calling thread for the whole burst (typically tens of
//! milliseconds) and cannot be interrupted; a partial code word means nothing
//! to a receiver. Methods take `&mut self`, so sharing a transmitter between
//! threads needs an outer `Mutex`, which also keeps pulse trains from
//! interleaving.

use std::time::Duration;

use crate::adapters::MonotonicClock;
use crate::codeword::{self, Address};
use crate::domain::{
    CodeWord, Level, Protocol, SwitchResult, TransmitterConfig, DEFAULT_REPEAT_COUNT,
};
use crate::ports::{Clock, GpioController, OutputPin};
use crate::timing::waveform::{self, bit_pulse, tri_state_pulses};
use crate::timing::{PrecisionDelay, PulseShape};

/// A bound output line
struct BoundPin {
    number: u32,
    pin: Box<dyn OutputPin>,
}

/// 433 MHz switch transmitter.
///
/// Starts disabled: until `enable_transmit` binds a line, every send is a
/// no-op that returns `Ok(())`.
pub struct Transmitter<C: Clock = MonotonicClock> {
    gpio: Box<dyn GpioController>,
    pin: Option<BoundPin>,
    protocol: Protocol,
    repeat_count: u32,
    delay: PrecisionDelay<C>,
}

impl Transmitter<MonotonicClock> {
    pub fn new(gpio: Box<dyn GpioController>) -> Self {
        Self::with_clock(gpio, MonotonicClock::new())
    }
}

impl<C: Clock> Transmitter<C> {
    /// Transmitter timed by `clock` (a simulated clock in tests)
    pub fn with_clock(gpio: Box<dyn GpioController>, clock: C) -> Self {
        let mut transmitter = Self {
            gpio,
            pin: None,
            protocol: Protocol::One,
            repeat_count: DEFAULT_REPEAT_COUNT,
            delay: PrecisionDelay::new(clock),
        };
        transmitter.set_protocol(Protocol::One);
        transmitter
    }

    /// Apply a saved profile: protocol, pulse length override, repeat count, then the pin.
    pub fn configure(&mut self, config: &TransmitterConfig) -> SwitchResult<()> {
        self.set_protocol(config.protocol);
        if let Some(us) = config.pulse_length_us {
            self.set_pulse_length(us);
        }
        self.set_repeat_count(config.repeat_count);
        match config.pin {
            Some(pin) => self.enable_transmit(pin),
            None => {
                self.disable_transmit();
                Ok(())
            }
        }
    }

    // --- Session state ---

    /// Open `pin` and switch it to output mode. Replaces any previously bound line.
    pub fn enable_transmit(&mut self, pin: u32) -> SwitchResult<()> {
        self.pin = None;
        let mut output = self.gpio.open_pin(pin)?;
        output.set_drive_mode_output()?;
        log::info!("Transmit enabled on pin {pin}");
        self.pin = Some(BoundPin {
            number: pin,
            pin: output,
        });
        Ok(())
    }

    /// Release the line; later sends emit nothing.
    pub fn disable_transmit(&mut self) {
        if let Some(bound) = self.pin.take() {
            log::info!("Transmit disabled (pin {} released)", bound.number);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.pin.is_some()
    }

    pub fn pin(&self) -> Option<u32> {
        self.pin.as_ref().map(|bound| bound.number)
    }

    /// Select the timing protocol. Also resets the pulse length to the protocol default.
    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
        let us = protocol.profile().pulse_length_us;
        self.delay.set_microseconds(us);
        log::debug!("Protocol {protocol} selected ({us} µs)");
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Override the base unit length without changing the pulse shapes
    pub fn set_pulse_length(&mut self, micros: u32) {
        self.delay.set_microseconds(micros);
    }

    pub fn pulse_length_us(&self) -> u32 {
        self.delay.microseconds()
    }

    /// Number of full passes (word + sync) per send
    pub fn set_repeat_count(&mut self, repeat_count: u32) {
        self.repeat_count = repeat_count;
    }

    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn clock(&self) -> &C {
        self.delay.clock()
    }

    // --- Switch commands ---

    /// Switch `address` on. An invalid address is returned as-is and nothing is sent.
    pub fn switch_on(&mut self, address: &Address) -> SwitchResult<()> {
        self.switch(address, true)
    }

    pub fn switch_off(&mut self, address: &Address) -> SwitchResult<()> {
        self.switch(address, false)
    }

    fn switch(&mut self, address: &Address, on: bool) -> SwitchResult<()> {
        let word = address.encode(on).inspect_err(|e| {
            log::warn!("Not sending {address:?}: {e}");
        })?;
        self.send_tri_state(&word)
    }

    /// Type B: group 1–4, channel 1–4
    pub fn switch_on_type_b(&mut self, group: u32, channel: u32) -> SwitchResult<()> {
        self.switch_on(&Address::TypeB { group, channel })
    }

    pub fn switch_off_type_b(&mut self, group: u32, channel: u32) -> SwitchResult<()> {
        self.switch_off(&Address::TypeB { group, channel })
    }

    /// Type A: DIP group such as `"11010"`, channel 1–5
    pub fn switch_on_type_a(&mut self, dip: &str, channel: u32) -> SwitchResult<()> {
        self.switch_on(&Address::TypeA {
            dip: dip.to_string(),
            channel,
        })
    }

    pub fn switch_off_type_a(&mut self, dip: &str, channel: u32) -> SwitchResult<()> {
        self.switch_off(&Address::TypeA {
            dip: dip.to_string(),
            channel,
        })
    }

    /// Type D: DIP group, binary channel 1–31
    pub fn switch_on_binary(&mut self, dip: &str, channel: u32) -> SwitchResult<()> {
        self.switch_on(&Address::TypeD {
            dip: dip.to_string(),
            channel,
        })
    }

    pub fn switch_off_binary(&mut self, dip: &str, channel: u32) -> SwitchResult<()> {
        self.switch_off(&Address::TypeD {
            dip: dip.to_string(),
            channel,
        })
    }

    /// Type C (Intertechno): family `a`–`p`, group 1–4, device 1–4
    pub fn switch_on_type_c(&mut self, family: char, group: u32, device: u32) -> SwitchResult<()> {
        self.switch_on(&Address::TypeC {
            family,
            group,
            device,
        })
    }

    pub fn switch_off_type_c(&mut self, family: char, group: u32, device: u32) -> SwitchResult<()> {
        self.switch_off(&Address::TypeC {
            family,
            group,
            device,
        })
    }

    // --- Transmission ---

    /// Send `word` `repeat_count` times, each pass followed by a sync pulse.
    pub fn send_tri_state(&mut self, word: &CodeWord) -> SwitchResult<()> {
        if !self.is_enabled() || self.repeat_count == 0 {
            return Ok(());
        }
        log::debug!(
            "TX {word} ×{} (protocol {}, {} µs, ~{:?})",
            self.repeat_count,
            self.protocol,
            self.pulse_length_us(),
            self.transmission_duration(word)
        );

        let profile = *self.protocol.profile();
        for _ in 0..self.repeat_count {
            for symbol in word.iter() {
                for pulse in tri_state_pulses(symbol, &profile) {
                    self.transmit(pulse)?;
                }
            }
            self.transmit(profile.sync)?;
        }
        Ok(())
    }

    /// Send the low `length` bits of `code` as plain bit0/bit1 pulses, most significant first.
    pub fn send_binary(&mut self, code: u64, length: usize) -> SwitchResult<()> {
        let bits: Vec<bool> = codeword::decimal_to_binary(code, length)
            .chars()
            .map(|c| c == '1')
            .collect();
        self.send_code_bits(&bits)
    }

    /// Send a plain bit string `repeat_count` times, each pass followed by a sync pulse.
    pub fn send_code_bits(&mut self, bits: &[bool]) -> SwitchResult<()> {
        if !self.is_enabled() || self.repeat_count == 0 {
            return Ok(());
        }
        let profile = *self.protocol.profile();
        log::debug!(
            "TX {} plain bits ×{} (protocol {}, {} units per pass)",
            bits.len(),
            self.repeat_count,
            self.protocol,
            waveform::bits_units(bits, &profile)
        );

        for _ in 0..self.repeat_count {
            for &bit in bits {
                self.transmit(bit_pulse(bit, &profile))?;
            }
            self.transmit(profile.sync)?;
        }
        Ok(())
    }

    /// Nominal on-air time of `send_tri_state(word)` with the current settings.
    ///
    /// Saturates at `Duration::MAX`.
    pub fn transmission_duration(&self, word: &CodeWord) -> Duration {
        let units = waveform::word_units(word, self.protocol.profile());
        units
            .checked_mul(u64::from(self.repeat_count))
            .and_then(|units| units.checked_mul(u64::from(self.pulse_length_us())))
            .map_or(Duration::MAX, Duration::from_micros)
    }

    /// Drive one pulse: one write and one unit wait per base unit.
    fn transmit(&mut self, pulse: PulseShape) -> SwitchResult<()> {
        let Some(bound) = self.pin.as_mut() else {
            return Ok(());
        };
        for _ in 0..pulse.high {
            bound.pin.write(Level::High)?;
            self.delay.wait_one_unit();
        }
        for _ in 0..pulse.low {
            bound.pin.write(Level::Low)?;
            self.delay.wait_one_unit();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{GpioEvent, RecordingGpio, SimulatedClock};
    use crate::domain::{SwitchError, TriState, CODE_WORD_LEN};

    fn make_transmitter() -> (Transmitter<SimulatedClock>, RecordingGpio, SimulatedClock) {
        let gpio = RecordingGpio::new();
        let clock = SimulatedClock::new(1_000_000, 1);
        let tx = Transmitter::with_clock(Box::new(gpio.clone()), clock.clone());
        (tx, gpio, clock)
    }

    fn enabled_transmitter() -> (Transmitter<SimulatedClock>, RecordingGpio, SimulatedClock) {
        let (mut tx, gpio, clock) = make_transmitter();
        tx.enable_transmit(17).unwrap();
        gpio.clear();
        (tx, gpio, clock)
    }

    // --- Defaults and settings ---

    #[test]
    fn defaults() {
        let (tx, _, _) = make_transmitter();
        assert!(!tx.is_enabled());
        assert_eq!(tx.pin(), None);
        assert_eq!(tx.protocol(), Protocol::One);
        assert_eq!(tx.pulse_length_us(), 350);
        assert_eq!(tx.repeat_count(), 10);
    }

    #[test]
    fn set_protocol_resets_pulse_length() {
        let (mut tx, _, _) = make_transmitter();
        tx.set_pulse_length(420);
        tx.set_protocol(Protocol::Two);
        assert_eq!(tx.pulse_length_us(), 650);
        tx.set_protocol(Protocol::One);
        assert_eq!(tx.pulse_length_us(), 350);
    }

    #[test]
    fn pulse_length_override_survives_until_next_protocol_change() {
        let (mut tx, _, _) = make_transmitter();
        tx.set_protocol(Protocol::Two);
        tx.set_pulse_length(500);
        assert_eq!(tx.protocol(), Protocol::Two);
        assert_eq!(tx.pulse_length_us(), 500);
    }

    #[test]
    fn enable_opens_and_configures_pin() {
        let (mut tx, gpio, _) = make_transmitter();
        tx.enable_transmit(17).unwrap();
        assert!(tx.is_enabled());
        assert_eq!(tx.pin(), Some(17));
        assert_eq!(
            gpio.events(),
            vec![GpioEvent::Opened(17), GpioEvent::DriveOutput(17)]
        );
    }

    #[test]
    fn disable_releases_pin() {
        let (mut tx, _, _) = enabled_transmitter();
        tx.disable_transmit();
        assert!(!tx.is_enabled());
        assert_eq!(tx.pin(), None);
    }

    #[test]
    fn configure_applies_every_field() {
        let (mut tx, gpio, _) = make_transmitter();
        let config = TransmitterConfig {
            pin: Some(22),
            protocol: Protocol::Two,
            pulse_length_us: Some(600),
            repeat_count: 3,
        };
        tx.configure(&config).unwrap();
        assert_eq!(tx.pin(), Some(22));
        assert_eq!(tx.protocol(), Protocol::Two);
        assert_eq!(tx.pulse_length_us(), 600);
        assert_eq!(tx.repeat_count(), 3);
        assert_eq!(gpio.events()[0], GpioEvent::Opened(22));
    }

    #[test]
    fn configure_without_pin_disables() {
        let (mut tx, _, _) = enabled_transmitter();
        tx.configure(&TransmitterConfig::default()).unwrap();
        assert!(!tx.is_enabled());
        assert_eq!(tx.pulse_length_us(), 350);
    }

    // --- No-op paths ---

    #[test]
    fn unbound_transmitter_sends_nothing() {
        let (mut tx, gpio, clock) = make_transmitter();
        let word: CodeWord = "F0FFFF0FFFFF".parse().unwrap();
        tx.send_tri_state(&word).unwrap();
        tx.switch_on_type_b(1, 1).unwrap();
        assert!(gpio.levels().is_empty());
        assert_eq!(clock.now(), 0, "no time should pass");
    }

    #[test]
    fn zero_repeats_sends_nothing() {
        let (mut tx, gpio, clock) = enabled_transmitter();
        tx.set_repeat_count(0);
        let start = clock.now();
        tx.switch_on_type_b(2, 3).unwrap();
        tx.send_binary(0b1010, 4).unwrap();
        assert!(gpio.levels().is_empty());
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn invalid_address_sends_nothing_and_reports() {
        let (mut tx, gpio, _) = enabled_transmitter();
        let result = tx.switch_on_type_b(5, 1);
        assert!(matches!(result, Err(SwitchError::InvalidAddress(_))));
        assert!(tx.switch_off_type_a("10002", 1).is_err());
        assert!(tx.switch_on_type_c('q', 1, 1).is_err());
        assert!(tx.switch_off_binary("10000", 0).is_err());
        assert!(gpio.levels().is_empty());
    }

    #[test]
    fn disabled_after_enable_sends_nothing() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.disable_transmit();
        tx.switch_on_type_c('a', 1, 1).unwrap();
        assert!(gpio.levels().is_empty());
    }

    // --- Waveform ---

    #[test]
    fn single_zero_symbol_waveform() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.set_repeat_count(1);
        tx.send_tri_state(&"000000000000".parse().unwrap()).unwrap();
        let runs = gpio.runs();
        // 12 symbols × 2 pulses, then sync
        assert_eq!(runs.len(), 12 * 2 * 2 + 2);
        assert_eq!(runs[0], (Level::High, 1));
        assert_eq!(runs[1], (Level::Low, 3));
        assert_eq!(runs[runs.len() - 2], (Level::High, 1));
        assert_eq!(runs[runs.len() - 1], (Level::Low, 31));
    }

    #[test]
    fn float_symbol_is_short_then_long() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.set_repeat_count(1);
        tx.send_tri_state(&"FFFFFFFFFFFF".parse().unwrap()).unwrap();
        let runs = gpio.runs();
        assert_eq!(
            runs[..4],
            [(Level::High, 1), (Level::Low, 3), (Level::High, 3), (Level::Low, 1)]
        );
    }

    #[test]
    fn protocol_two_uses_its_own_shapes() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.set_protocol(Protocol::Two);
        tx.set_repeat_count(1);
        tx.send_tri_state(&"111111111111".parse().unwrap()).unwrap();
        let runs = gpio.runs();
        assert_eq!(runs[0], (Level::High, 2));
        assert_eq!(runs[1], (Level::Low, 1));
        assert_eq!(runs[runs.len() - 1], (Level::Low, 10));
    }

    #[test]
    fn one_write_per_unit_and_repeats() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.set_repeat_count(3);
        let word: CodeWord = "F0FFFF0FFFFF".parse().unwrap();
        tx.send_tri_state(&word).unwrap();
        let per_pass = (12 * 8 + 32) as usize;
        assert_eq!(gpio.levels().len(), 3 * per_pass);
    }

    #[test]
    fn send_binary_uses_single_pulses() {
        let (mut tx, gpio, _) = enabled_transmitter();
        tx.set_repeat_count(1);
        tx.send_binary(0b10, 2).unwrap();
        assert_eq!(
            gpio.runs(),
            vec![
                (Level::High, 3),
                (Level::Low, 1),
                (Level::High, 1),
                (Level::Low, 3),
                (Level::High, 1),
                (Level::Low, 31),
            ]
        );
    }

    // --- Timing ---

    #[test]
    fn elapsed_time_matches_units() {
        let (mut tx, _, clock) = enabled_transmitter();
        tx.set_repeat_count(2);
        tx.set_pulse_length(100);
        let word: CodeWord = "0FFF0FFFFFF0".parse().unwrap();
        let units = 2 * waveform::word_units(&word, Protocol::One.profile());

        let start = clock.now();
        tx.send_tri_state(&word).unwrap();
        let elapsed = clock.now() - start;

        // Each unit wait may overshoot by at most one tick
        assert!(elapsed >= units * 100, "elapsed {elapsed}");
        assert!(elapsed <= units * 101, "elapsed {elapsed}");
    }

    #[test]
    fn transmission_duration_is_nominal_time() {
        let (mut tx, _, _) = make_transmitter();
        let word: CodeWord = "F0FFFF0FFFFF".parse().unwrap();
        // 10 × 128 units × 350 µs
        assert_eq!(tx.transmission_duration(&word), Duration::from_micros(448_000));
        tx.set_repeat_count(0);
        assert_eq!(tx.transmission_duration(&word), Duration::ZERO);
    }

    #[test]
    fn transmission_duration_saturates_on_huge_settings() {
        let (mut tx, _, _) = make_transmitter();
        tx.set_repeat_count(u32::MAX);
        tx.set_pulse_length(u32::MAX);
        let word = CodeWord::new([TriState::Float; CODE_WORD_LEN]);
        assert_eq!(tx.transmission_duration(&word), Duration::MAX);
    }

    // --- Errors from the line ---

    #[test]
    fn write_failure_is_propagated() {
        let gpio = RecordingGpio::with_write_limit(5);
        let clock = SimulatedClock::new(1_000_000, 1);
        let mut tx = Transmitter::with_clock(Box::new(gpio.clone()), clock);
        tx.enable_transmit(4).unwrap();
        let result = tx.switch_on_type_b(1, 1);
        assert!(matches!(result, Err(SwitchError::Gpio(_))));
        assert_eq!(gpio.levels().len(), 5);
    }

    #[test]
    fn transmitter_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Transmitter>();
        assert_send::<Transmitter<SimulatedClock>>();
    }
}
