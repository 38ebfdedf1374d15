//! Time abstraction traits for platform-agnostic timing.
//!
//! Both components run on whatever clock the host provides. Implementations
//! for plain `u64` milliseconds are included, which is usually all a bare-metal
//! run loop needs.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + Ord {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
///
/// Instants must be monotonic: a later reading never compares less than an
/// earlier one.
pub trait TimeInstant: Copy + Ord {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant, saturating at zero.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}

impl TimeDuration for u64 {
    const ZERO: Self = 0;

    #[inline]
    fn as_millis(&self) -> u64 {
        *self
    }

    #[inline]
    fn from_millis(millis: u64) -> Self {
        millis
    }
}

/// Milliseconds since startup.
impl TimeInstant for u64 {
    type Duration = u64;

    #[inline]
    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.saturating_sub(earlier)
    }

    #[inline]
    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        u64::checked_add(self, duration)
    }
}
