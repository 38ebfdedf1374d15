//! Shared test infrastructure for tick-debounce integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};
use tick_debounce::{TimeDuration, TimeInstant, TimeSource};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Pin
// ============================================================================

/// Error reported by a failing `ScriptedPin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFault;

impl Error for PinFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Shared level and fault flags, driven by the test while the pin is owned
/// by the input under test
pub struct PinLine {
    high: Cell<bool>,
    faulty: Cell<bool>,
}

impl PinLine {
    pub fn new() -> Self {
        Self {
            high: Cell::new(false),
            faulty: Cell::new(false),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }

    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.set(faulty);
    }

    pub fn pin(&self) -> ScriptedPin<'_> {
        ScriptedPin { line: self }
    }
}

/// Input pin reading from a `PinLine`
pub struct ScriptedPin<'a> {
    line: &'a PinLine,
}

impl ErrorType for ScriptedPin<'_> {
    type Error = PinFault;
}

impl InputPin for ScriptedPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.line.faulty.get() {
            return Err(PinFault);
        }
        Ok(self.line.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
