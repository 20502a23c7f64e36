//! Monotonic clock port trait

/// A free-running tick counter.
///
/// `ticks()` must never go backwards. Together with `frequency()` it must
/// resolve well below a millisecond; pulse widths are 150–1300 µs.
pub trait Clock: Send {
    /// Current counter value
    fn ticks(&self) -> u64;

    /// Ticks per second
    fn frequency(&self) -> u64;
}
