#![no_std]
#![no_main]

use core::convert::Infallible;
use cortex_m_rt::entry;
use embedded_hal::digital::{ErrorType, InputPin};
use panic_halt as _;
use tick_debounce::{
    ActiveLevel, DebounceInput, DeferredScheduler, RunLoop, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl Duration32 {
    const fn new(millis: u32) -> Self {
        Duration32(millis)
    }
}

impl TimeDuration for Duration32 {
    const ZERO: Self = Duration32(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }
}

/// Minimal 32-bit millisecond instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(Instant32)
    }
}

// ============================================================================
// Minimal Pin Implementation
// ============================================================================

/// Zero-size pin implementation for measuring library overhead
pub struct MinimalPin;

impl ErrorType for MinimalPin {
    type Error = Infallible;
}

impl InputPin for MinimalPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(core::hint::black_box(false))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(core::hint::black_box(true))
    }
}

// ============================================================================
// Minimal TimeSource Implementation
// ============================================================================

pub struct MinimalTimeSource;

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        Instant32(core::hint::black_box(0))
    }
}

// ============================================================================
// Application Context
// ============================================================================

#[derive(Default)]
pub struct Counters {
    presses: u32,
    short_releases: u32,
    long_releases: u32,
    timeouts: u32,
}

type Scheduler<'t> = DeferredScheduler<'t, Instant32, MinimalTimeSource, Counters, 8>;

fn on_press(c: &mut Counters) {
    c.presses += 1;
}

fn on_short(c: &mut Counters, _d: Duration32) {
    c.short_releases += 1;
}

fn on_long(c: &mut Counters, _d: Duration32) {
    c.long_releases += 1;
}

fn on_timeout(c: &mut Counters, sched: &mut Scheduler<'_>) {
    c.timeouts += 1;
    let _ = sched.after(Duration32::new(1000), on_timeout);
}

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_components() {
    let time_source = MinimalTimeSource;
    let mut counters = Counters::default();

    let mut button = DebounceInput::<_, Instant32, Counters, 2>::new(MinimalPin, ActiveLevel::Low);
    button.on_press(on_press);
    let _ = button.on_release_within(Duration32::new(400), on_short);
    button.on_release(on_long);

    let mut scheduler = Scheduler::new(&time_source);
    let _ = scheduler.after(Duration32::new(0), on_timeout);

    let mut run_loop = RunLoop::<Instant32, Counters, 2>::new();
    let _ = run_loop.register(&mut button);
    let _ = run_loop.register(&mut scheduler);

    for _ in 0..4 {
        run_loop.run_once(time_source.now(), &mut counters);
    }

    core::hint::black_box(&counters);
}

#[entry]
fn main() -> ! {
    // Call test function to ensure all code is included
    exercise_components();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
