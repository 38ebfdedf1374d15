//! Cooperative run loop over tickable components.
//!
//! Defines the [`Tickable`] trait implemented by every component in this crate,
//! and [`RunLoop`], an explicit registry that ticks each component once per
//! iteration in registration order.

use crate::input::DebounceInput;
use crate::scheduler::DeferredScheduler;
use crate::time::{TimeInstant, TimeSource};
use embedded_hal::digital::InputPin;
use heapless::Vec;

/// A component that is advanced once per run loop iteration.
///
/// Implementations must return quickly: every other component waits for the
/// current one to finish its tick.
pub trait Tickable<I: TimeInstant, C> {
    /// Advances the component to `now`.
    fn tick(&mut self, now: I, ctx: &mut C);
}

impl<P, I, C, const TIERS: usize> Tickable<I, C> for DebounceInput<P, I, C, TIERS>
where
    P: InputPin,
    I: TimeInstant,
{
    fn tick(&mut self, now: I, ctx: &mut C) {
        // A failed read skips this sample; the next tick tries again
        if DebounceInput::tick(self, now, ctx).is_err() {
            warn!("input read failed, sample skipped");
        }
    }
}

impl<'t, I, T, C, const N: usize> Tickable<I, C> for DeferredScheduler<'t, I, T, C, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
{
    fn tick(&mut self, now: I, ctx: &mut C) {
        DeferredScheduler::tick(self, now, ctx);
    }
}

/// Registration index of a component in a [`RunLoop`].
///
/// This is the component's position in tick order and nothing more: the run
/// loop has no operation that takes a `TickId` back, since components cannot
/// be removed or looked up once registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickId(pub usize);

impl From<TickId> for usize {
    fn from(id: TickId) -> Self {
        id.0
    }
}

/// Errors that can occur during run loop operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunLoopError {
    /// The run loop cannot accept more components.
    Full,
}

impl core::fmt::Display for RunLoopError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RunLoopError::Full => {
                write!(f, "run loop is full, cannot register more components")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RunLoopError {}

/// Ticks a fixed set of components, in registration order, once per iteration.
///
/// Components are borrowed, not owned, so the application keeps direct access
/// to them between iterations.
///
/// # Type Parameters
/// * `'a` - Lifetime of the component borrows
/// * `I` - Time instant type
/// * `C` - Application context handed to every component
/// * `MAX` - Maximum number of components
pub struct RunLoop<'a, I: TimeInstant, C, const MAX: usize> {
    components: Vec<&'a mut dyn Tickable<I, C>, MAX>,
}

impl<'a, I: TimeInstant, C, const MAX: usize> RunLoop<'a, I, C, MAX> {
    /// Creates an empty run loop.
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Registers a component to be ticked after all earlier ones.
    ///
    /// Returns the component's zero-based position in tick order.
    ///
    /// # Errors
    /// * `Full` - `MAX` components are already registered
    pub fn register(
        &mut self,
        component: &'a mut dyn Tickable<I, C>,
    ) -> Result<TickId, RunLoopError> {
        let id = TickId(self.components.len());
        self.components
            .push(component)
            .map_err(|_| RunLoopError::Full)?;
        Ok(id)
    }

    /// Ticks every registered component once with the same instant.
    pub fn run_once(&mut self, now: I, ctx: &mut C) {
        for component in self.components.iter_mut() {
            component.tick(now, ctx);
        }
    }

    /// Reads the clock and runs iterations forever.
    pub fn run<T: TimeSource<I>>(&mut self, time_source: &T, ctx: &mut C) -> ! {
        loop {
            self.run_once(time_source.now(), ctx);
        }
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'a, I: TimeInstant, C, const MAX: usize> Default for RunLoop<'a, I, C, MAX> {
    fn default() -> Self {
        Self::new()
    }
}
