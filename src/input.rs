//! Debounced digital input with press and release dispatch.
//!
//! Provides [`DebounceInput`], which samples one [`InputPin`] per tick, filters
//! out contact bounce, and dispatches confirmed transitions to an
//! [`InputContext`].

use crate::context::{InputContext, PressHandler, ReleaseHandler};
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{ActiveLevel, ContextError, DebounceConfig, InputEvent};
use embedded_hal::digital::InputPin;

/// A debounced digital input.
///
/// A raw edge is only accepted once the raw level has stayed unchanged for at
/// least the minimum press duration. Any flicker inside that window restarts
/// the wait, so a signal that never settles never produces an event. At most
/// one transition is confirmed per tick.
///
/// # Type Parameters
/// * `P` - Input pin type
/// * `I` - Time instant type
/// * `C` - Application context handed to handlers
/// * `TIERS` - Maximum number of release tiers
pub struct DebounceInput<P: InputPin, I: TimeInstant, C, const TIERS: usize> {
    pin: P,
    active_level: ActiveLevel,
    min_press_duration: I::Duration,
    confirmed_pressed: bool,
    raw_last_sample: bool,
    last_raw_edge_time: Option<I>,
    last_confirmed_time: Option<I>,
    context: InputContext<C, I::Duration, TIERS>,
}

impl<P: InputPin, I: TimeInstant, C, const TIERS: usize> DebounceInput<P, I, C, TIERS> {
    /// Creates a released input with the default 50 ms threshold.
    pub fn new(pin: P, active_level: ActiveLevel) -> Self {
        Self::from_config(
            pin,
            DebounceConfig {
                active_level,
                ..DebounceConfig::default()
            },
        )
    }

    /// Creates a released input with a custom threshold.
    pub fn with_min_press_duration(
        pin: P,
        active_level: ActiveLevel,
        min_press_duration: I::Duration,
    ) -> Self {
        Self::from_config(
            pin,
            DebounceConfig {
                active_level,
                min_press_duration,
            },
        )
    }

    /// Creates a released input from a configuration.
    pub fn from_config(pin: P, config: DebounceConfig<I::Duration>) -> Self {
        Self {
            pin,
            active_level: config.active_level,
            min_press_duration: config.min_press_duration,
            confirmed_pressed: false,
            raw_last_sample: false,
            last_raw_edge_time: None,
            last_confirmed_time: None,
            context: InputContext::new(),
        }
    }

    /// Samples the pin and advances the debounce state machine.
    ///
    /// Handlers run synchronously before this returns.
    ///
    /// # Returns
    /// * `Ok(Some(event))` - A transition was confirmed on this tick
    /// * `Ok(None)` - No confirmed change
    /// * `Err` - The pin could not be read; state is untouched
    pub fn tick(
        &mut self,
        now: I,
        ctx: &mut C,
    ) -> Result<Option<InputEvent<I::Duration>>, P::Error> {
        let raw_pressed = self.active_level.is_pressed(self.pin.is_high()?);
        Ok(self.update(raw_pressed, now, ctx))
    }

    /// Advances the state machine with an already normalized sample.
    fn update(
        &mut self,
        raw_pressed: bool,
        now: I,
        ctx: &mut C,
    ) -> Option<InputEvent<I::Duration>> {
        if raw_pressed != self.raw_last_sample {
            self.raw_last_sample = raw_pressed;
            self.last_raw_edge_time = Some(now);
            trace!("raw edge, pressed={}", raw_pressed);
        }

        if raw_pressed == self.confirmed_pressed {
            return None;
        }

        // raw differs from confirmed, so an edge has been recorded since reset
        let edge_time = self.last_raw_edge_time?;
        if now.duration_since(edge_time) < self.min_press_duration {
            return None;
        }

        self.confirmed_pressed = raw_pressed;
        let pressed_at = self.last_confirmed_time.replace(now);

        if raw_pressed {
            debug!("press confirmed");
            self.context.press(ctx);
            Some(InputEvent::Pressed)
        } else {
            let duration = pressed_at
                .map(|start| now.duration_since(start))
                .unwrap_or(I::Duration::ZERO);
            debug!("release confirmed after {}ms", duration.as_millis());
            self.context.release(ctx, duration);
            Some(InputEvent::Released(duration))
        }
    }

    /// Forces the released state and forgets any pending raw edge.
    ///
    /// No handler fires, and registered handlers are kept.
    pub fn reset(&mut self) {
        self.confirmed_pressed = false;
        self.raw_last_sample = false;
        self.last_raw_edge_time = None;
        self.last_confirmed_time = None;
    }

    /// Replaces the press handler.
    pub fn on_press(&mut self, handler: PressHandler<C>) {
        self.context.on_press(handler);
    }

    /// Replaces the catch-all release handler.
    pub fn on_release(&mut self, handler: ReleaseHandler<C, I::Duration>) {
        self.context.on_release(handler);
    }

    /// Registers a release handler for presses lasting at most `max_duration`.
    ///
    /// # Errors
    /// * `TierTableFull` - All `TIERS` slots are already taken
    pub fn on_release_within(
        &mut self,
        max_duration: I::Duration,
        handler: ReleaseHandler<C, I::Duration>,
    ) -> Result<(), ContextError> {
        self.context.on_release_within(max_duration, handler)
    }

    /// Hands out the current context, leaving an empty one in its place.
    pub fn release_context(&mut self) -> InputContext<C, I::Duration, TIERS> {
        core::mem::take(&mut self.context)
    }

    /// Installs a context and returns the one it replaces.
    pub fn set_context(
        &mut self,
        context: InputContext<C, I::Duration, TIERS>,
    ) -> InputContext<C, I::Duration, TIERS> {
        core::mem::replace(&mut self.context, context)
    }

    /// Discards the current context and starts over with an empty one.
    pub fn refresh_context(&mut self) {
        self.context = InputContext::new();
    }

    /// Returns the registered context.
    pub fn context(&self) -> &InputContext<C, I::Duration, TIERS> {
        &self.context
    }

    /// Returns the registered context for in-place changes.
    pub fn context_mut(&mut self) -> &mut InputContext<C, I::Duration, TIERS> {
        &mut self.context
    }

    /// Returns the confirmed state.
    pub fn is_pressed(&self) -> bool {
        self.confirmed_pressed
    }

    /// Returns how long the current press has lasted, or `None` if released.
    pub fn held_for(&self, now: I) -> Option<I::Duration> {
        if !self.confirmed_pressed {
            return None;
        }
        self.last_confirmed_time.map(|start| now.duration_since(start))
    }

    /// Returns the debounce threshold.
    pub fn min_press_duration(&self) -> I::Duration {
        self.min_press_duration
    }

    /// Returns the input polarity.
    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    /// Returns the wrapped pin.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Consumes the input and returns the pin.
    pub fn into_pin(self) -> P {
        self.pin
    }
}
