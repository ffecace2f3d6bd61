use core::time::Duration;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch: Monday, January 1, 2024 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// A trait for time sources that return a millisecond timestamp.
///
/// This abstraction allows you to plug in the real wall clock or a mocked
/// time source in tests.
///
/// The unit is expected to be **milliseconds** relative to a configurable
/// origin.
///
/// # Example
///
/// ```
/// use frostid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the configured epoch.
    fn current_millis(&self) -> T;
}

/// A wall-clock time source offset from a user-defined epoch.
///
/// Every call samples [`SystemTime::now`] and subtracts the configured
/// epoch, so the reported value tracks the system clock exactly, including
/// any external adjustments. Readings saturate to zero if the system clock
/// is ever behind the epoch.
#[derive(Clone, Copy, Debug)]
pub struct WallClock {
    epoch: Duration,
}

impl Default for WallClock {
    /// Constructs a wall clock aligned to [`DEFAULT_EPOCH`].
    fn default() -> Self {
        Self::with_epoch(DEFAULT_EPOCH)
    }
}

impl WallClock {
    /// Constructs a wall clock using a custom epoch as the origin (t = 0).
    ///
    /// The epoch defines the zero-point for all timestamps returned by this
    /// clock, as a [`Duration`] since 1970-01-01 UTC.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use frostid::{TimeSource, WallClock};
    ///
    /// // An epoch of zero reports plain Unix time in milliseconds.
    /// let clock = WallClock::with_epoch(Duration::ZERO);
    /// assert!(clock.current_millis() > 1_700_000_000_000);
    /// ```
    pub const fn with_epoch(epoch: Duration) -> Self {
        Self { epoch }
    }

    /// The epoch this clock measures from, as a duration since
    /// 1970-01-01 UTC.
    pub const fn epoch(&self) -> Duration {
        self.epoch
    }
}

impl TimeSource<u64> for WallClock {
    /// Returns the number of milliseconds since the configured epoch.
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .saturating_sub(self.epoch)
            .as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_tracks_epoch_offset() {
        let unix = WallClock::with_epoch(Duration::ZERO);
        let custom = WallClock::default();

        let offset = unix.current_millis() - custom.current_millis();
        let epoch_millis = DEFAULT_EPOCH.as_millis() as u64;

        // Both samples are taken a moment apart; allow generous slack.
        assert!(offset >= epoch_millis - 5_000 && offset <= epoch_millis + 5_000);
    }

    #[test]
    fn wall_clock_saturates_on_future_epoch() {
        // An epoch far in the future reads as zero, not a wrapped value.
        let clock = WallClock::with_epoch(Duration::from_millis(u64::MAX));
        assert_eq!(clock.current_millis(), 0);
    }
}
