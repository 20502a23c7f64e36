//! `rcswitch` — switch 433 MHz remote sockets from the command line.
//!
//!   rcswitch --pin 17 on type-b 2 3
//!   rcswitch --pin 17 --protocol 2 off intertechno c 1 4
//!   RUST_LOG=rcswitch_lib=trace rcswitch --dry-run on binary 10100 17

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rcswitch_lib::adapters::{RecordingGpio, SysfsGpio};
use rcswitch_lib::ports::GpioController;
use rcswitch_lib::{Address, CodeWord, Protocol, SwitchResult, Transmitter, TransmitterConfig};

#[derive(Parser)]
#[clap(version, about)]
struct Opts {
    /// JSON transmitter profile; flags below override its fields
    #[clap(long)]
    config: Option<PathBuf>,
    /// GPIO line wired to the transmitter's data pin
    #[clap(long)]
    pin: Option<u32>,
    /// Timing protocol (1 or 2)
    #[clap(long)]
    protocol: Option<u8>,
    /// Base pulse length in microseconds (defaults to the protocol's)
    #[clap(long)]
    pulse_length: Option<u32>,
    /// Code word passes per command
    #[clap(long)]
    repeat: Option<u32>,
    /// Record pin writes in memory instead of touching real GPIO
    #[clap(long)]
    dry_run: bool,
    /// sysfs GPIO root
    #[clap(long, default_value = rcswitch_lib::adapters::SYSFS_GPIO_ROOT)]
    gpio_root: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Switch a socket on
    On {
        #[clap(subcommand)]
        target: Target,
    },
    /// Switch a socket off
    Off {
        #[clap(subcommand)]
        target: Target,
    },
    /// Print the code word for a socket without sending it
    Encode {
        /// Encode the "off" command instead of "on"
        #[clap(long)]
        off: bool,
        #[clap(subcommand)]
        target: Target,
    },
    /// Send a raw tri-state word such as F0FFFF0FFFFF
    Send { word: String },
    /// Send the low LENGTH bits of CODE as plain binary
    SendCode { code: u64, length: usize },
    /// Write the effective profile (file + flags) as JSON
    SaveConfig { path: PathBuf },
}

#[derive(Subcommand)]
enum Target {
    /// 10-pole DIP sockets: DIP group (e.g. 11010) and channel 1-5
    TypeA { dip: String, channel: u32 },
    /// Rotary/sliding switch sockets: group 1-4, channel 1-4
    TypeB { group: u32, channel: u32 },
    /// DIP sockets with binary channel numbers 1-31
    Binary { dip: String, channel: u32 },
    /// Intertechno: family a-p, group 1-4, device 1-4
    Intertechno { family: char, group: u32, device: u32 },
}

impl From<Target> for Address {
    fn from(target: Target) -> Self {
        match target {
            Target::TypeA { dip, channel } => Address::TypeA { dip, channel },
            Target::TypeB { group, channel } => Address::TypeB { group, channel },
            Target::Binary { dip, channel } => Address::TypeD { dip, channel },
            Target::Intertechno {
                family,
                group,
                device,
            } => Address::TypeC {
                family,
                group,
                device,
            },
        }
    }
}

/// Profile from `--config` (or defaults) with command line overrides applied
fn effective_config(opts: &Opts) -> SwitchResult<TransmitterConfig> {
    let mut config = match &opts.config {
        Some(path) => TransmitterConfig::load(path)?,
        None => TransmitterConfig::default(),
    };
    if let Some(pin) = opts.pin {
        config.pin = Some(pin);
    }
    if let Some(protocol) = opts.protocol {
        config.protocol = Protocol::try_from(protocol)?;
        // A new protocol brings its own pulse length unless one is given explicitly
        config.pulse_length_us = None;
    }
    if let Some(us) = opts.pulse_length {
        config.pulse_length_us = Some(us);
    }
    if let Some(repeat) = opts.repeat {
        config.repeat_count = repeat;
    }
    Ok(config)
}

fn run(opts: Opts) -> SwitchResult<()> {
    let config = effective_config(&opts)?;

    let recorder = RecordingGpio::new();
    let gpio: Box<dyn GpioController> = if opts.dry_run {
        Box::new(recorder.clone())
    } else {
        Box::new(SysfsGpio::with_root(opts.gpio_root.clone()))
    };

    match opts.command {
        Command::Encode { off, target } => {
            let word = Address::from(target).encode(!off)?;
            println!("{word}");
            return Ok(());
        }
        Command::SaveConfig { path } => {
            config.save(&path)?;
            log::info!("Saved profile to {}", path.display());
            return Ok(());
        }
        _ => {}
    }

    let mut transmitter = Transmitter::new(gpio);
    transmitter.configure(&config)?;
    if !transmitter.is_enabled() {
        log::warn!("No pin configured (use --pin or a config file); nothing will be sent");
    }

    match opts.command {
        Command::On { target } => transmitter.switch_on(&target.into())?,
        Command::Off { target } => transmitter.switch_off(&target.into())?,
        Command::Send { word } => transmitter.send_tri_state(&word.parse::<CodeWord>()?)?,
        Command::SendCode { code, length } => transmitter.send_binary(code, length)?,
        Command::Encode { .. } | Command::SaveConfig { .. } => {}
    }

    if opts.dry_run {
        log::info!(
            "Dry run: {} unit writes in {} level runs",
            recorder.levels().len(),
            recorder.runs().len()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Opts::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Opts {
        Opts::try_parse_from(std::iter::once("rcswitch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_type_b_on() {
        let opts = parse(&["--pin", "17", "on", "type-b", "2", "3"]);
        assert_eq!(opts.pin, Some(17));
        match opts.command {
            Command::On { target } => assert_eq!(
                Address::from(target),
                Address::TypeB {
                    group: 2,
                    channel: 3
                }
            ),
            _ => panic!("expected on"),
        }
    }

    #[test]
    fn parses_intertechno_off() {
        let opts = parse(&["off", "intertechno", "c", "1", "4"]);
        match opts.command {
            Command::Off { target } => assert_eq!(
                Address::from(target),
                Address::TypeC {
                    family: 'c',
                    group: 1,
                    device: 4
                }
            ),
            _ => panic!("expected off"),
        }
    }

    #[test]
    fn protocol_flag_resets_pulse_length() {
        let opts = parse(&["--protocol", "2", "send", "F0FFFF0FFFFF"]);
        let config = effective_config(&opts).unwrap();
        assert_eq!(config.protocol, Protocol::Two);
        assert_eq!(config.pulse_length_us, None);
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let opts = parse(&["--protocol", "3", "send", "F0FFFF0FFFFF"]);
        assert!(effective_config(&opts).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        TransmitterConfig {
            pin: Some(4),
            repeat_count: 3,
            ..TransmitterConfig::default()
        }
        .save(&path)
        .unwrap();

        let opts = parse(&[
            "--config",
            path.to_str().unwrap(),
            "--repeat",
            "7",
            "on",
            "type-a",
            "10000",
            "1",
        ]);
        let config = effective_config(&opts).unwrap();
        assert_eq!(config.pin, Some(4));
        assert_eq!(config.repeat_count, 7);
    }

    #[test]
    fn dry_run_switch_succeeds() {
        let opts = parse(&[
            "--dry-run",
            "--pin",
            "17",
            "--repeat",
            "1",
            "--pulse-length",
            "0",
            "on",
            "type-b",
            "1",
            "1",
        ]);
        assert!(run(opts).is_ok());
    }

    #[test]
    fn dry_run_invalid_address_fails() {
        let opts = parse(&["--dry-run", "--pin", "17", "on", "type-b", "9", "1"]);
        assert!(run(opts).is_err());
    }
}
