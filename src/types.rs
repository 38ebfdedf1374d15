//! Core types shared by the input and context modules.

use crate::time::TimeDuration;

/// Default debounce threshold in milliseconds.
pub const DEFAULT_MIN_PRESS_DURATION_MS: u64 = 50;

/// Which raw pin level means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// A high reading is a press.
    High,

    /// A low reading is a press (typical for pull-up wiring).
    Low,
}

impl ActiveLevel {
    /// Normalizes a raw pin level to a logical pressed flag.
    #[inline]
    pub fn is_pressed(self, raw_high: bool) -> bool {
        match self {
            ActiveLevel::High => raw_high,
            ActiveLevel::Low => !raw_high,
        }
    }
}

impl From<bool> for ActiveLevel {
    /// `true` maps to [`ActiveLevel::High`].
    fn from(active_high: bool) -> Self {
        if active_high {
            ActiveLevel::High
        } else {
            ActiveLevel::Low
        }
    }
}

/// A confirmed transition reported by a debounced input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent<D> {
    /// Input became pressed.
    Pressed,

    /// Input was released after being held for the given duration.
    Released(D),
}

/// Construction parameters for a debounced input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig<D: TimeDuration> {
    /// Polarity of the input.
    pub active_level: ActiveLevel,

    /// How long a raw edge must hold before it is accepted.
    pub min_press_duration: D,
}

impl<D: TimeDuration> Default for DebounceConfig<D> {
    fn default() -> Self {
        Self {
            active_level: ActiveLevel::High,
            min_press_duration: D::from_millis(DEFAULT_MIN_PRESS_DURATION_MS),
        }
    }
}

/// Errors from registering handlers on an input context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContextError {
    /// No room left for another release tier.
    TierTableFull,
}

impl core::fmt::Display for ContextError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ContextError::TierTableFull => {
                write!(f, "release tier table is full")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ContextError {}
