//! Callback sets for debounced inputs.
//!
//! An [`InputContext`] bundles the press handler and the release handlers of
//! one input. It is a plain value: inputs hand it out and take it back by move,
//! so switching an input between modes is a single ownership transfer.

use crate::time::TimeDuration;
use crate::types::ContextError;
use heapless::Vec;

/// Handler invoked when a press is confirmed.
pub type PressHandler<C> = fn(&mut C);

/// Handler invoked when a release is confirmed, with the press duration.
pub type ReleaseHandler<C, D> = fn(&mut C, D);

/// Press and release handlers registered with a debounced input.
///
/// Release handling is tiered. Each tier covers presses up to a maximum
/// duration, and on release the tier with the smallest maximum that still
/// covers the observed duration fires. Presses longer than every tier fall
/// through to the catch-all release handler, if one is set.
///
/// # Type Parameters
/// * `C` - Application context handed to every handler
/// * `D` - Duration type
/// * `TIERS` - Maximum number of release tiers
pub struct InputContext<C, D: TimeDuration, const TIERS: usize> {
    press: Option<PressHandler<C>>,
    release: Option<ReleaseHandler<C, D>>,
    tiers: Vec<(D, ReleaseHandler<C, D>), TIERS>,
}

impl<C, D: TimeDuration, const TIERS: usize> InputContext<C, D, TIERS> {
    /// Creates a context with no handlers.
    pub const fn new() -> Self {
        Self {
            press: None,
            release: None,
            tiers: Vec::new(),
        }
    }

    /// Creates a new context builder.
    pub fn builder() -> InputContextBuilder<C, D, TIERS> {
        InputContextBuilder::new()
    }

    /// Replaces the press handler.
    pub fn on_press(&mut self, handler: PressHandler<C>) {
        self.press = Some(handler);
    }

    /// Replaces the catch-all release handler.
    pub fn on_release(&mut self, handler: ReleaseHandler<C, D>) {
        self.release = Some(handler);
    }

    /// Registers a release handler for presses lasting at most `max_duration`.
    ///
    /// Registering the same maximum twice replaces the earlier handler.
    ///
    /// # Errors
    /// * `TierTableFull` - All `TIERS` slots are already taken
    pub fn on_release_within(
        &mut self,
        max_duration: D,
        handler: ReleaseHandler<C, D>,
    ) -> Result<(), ContextError> {
        match self.tiers.binary_search_by(|(max, _)| max.cmp(&max_duration)) {
            Ok(idx) => {
                self.tiers[idx].1 = handler;
                Ok(())
            }
            Err(idx) => self
                .tiers
                .insert(idx, (max_duration, handler))
                .map_err(|_| ContextError::TierTableFull),
        }
    }

    /// Removes the press handler.
    pub fn clear_press(&mut self) {
        self.press = None;
    }

    /// Removes the catch-all and all tiered release handlers.
    pub fn clear_release(&mut self) {
        self.release = None;
        self.tiers.clear();
    }

    /// Invokes the press handler. Returns false if none is registered.
    pub fn press(&self, ctx: &mut C) -> bool {
        match self.press {
            Some(handler) => {
                handler(ctx);
                true
            }
            None => false,
        }
    }

    /// Invokes the release handler selected for `duration`.
    ///
    /// Returns false if no handler covers the duration.
    pub fn release(&self, ctx: &mut C, duration: D) -> bool {
        match self.release_handler_for(duration) {
            Some(handler) => {
                handler(ctx, duration);
                true
            }
            None => false,
        }
    }

    /// Selects the release handler for a press of the given duration.
    ///
    /// Tiers are kept sorted, so the first one whose maximum covers the
    /// duration is also the tightest.
    pub fn release_handler_for(&self, duration: D) -> Option<ReleaseHandler<C, D>> {
        self.tiers
            .iter()
            .find(|(max, _)| *max >= duration)
            .map(|(_, handler)| *handler)
            .or(self.release)
    }

    /// Returns true if a press handler is registered.
    pub fn has_press_handler(&self) -> bool {
        self.press.is_some()
    }

    /// Returns the number of registered release tiers.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Returns true if no handler of any kind is registered.
    pub fn is_empty(&self) -> bool {
        self.press.is_none() && self.release.is_none() && self.tiers.is_empty()
    }
}

impl<C, D: TimeDuration, const TIERS: usize> Default for InputContext<C, D, TIERS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, D: TimeDuration, const TIERS: usize> core::fmt::Debug
    for InputContext<C, D, TIERS>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputContext")
            .field("press", &self.press.is_some())
            .field("release", &self.release.is_some())
            .field("tiers", &self.tiers.len())
            .finish()
    }
}

/// Builder for assembling an [`InputContext`] up front.
pub struct InputContextBuilder<C, D: TimeDuration, const TIERS: usize> {
    context: InputContext<C, D, TIERS>,
}

impl<C, D: TimeDuration, const TIERS: usize> InputContextBuilder<C, D, TIERS> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self {
            context: InputContext::new(),
        }
    }

    /// Sets the press handler.
    pub fn on_press(mut self, handler: PressHandler<C>) -> Self {
        self.context.on_press(handler);
        self
    }

    /// Sets the catch-all release handler.
    pub fn on_release(mut self, handler: ReleaseHandler<C, D>) -> Self {
        self.context.on_release(handler);
        self
    }

    /// Adds a release tier.
    ///
    /// # Errors
    /// * `TierTableFull` - All `TIERS` slots are already taken
    pub fn on_release_within(
        mut self,
        max_duration: D,
        handler: ReleaseHandler<C, D>,
    ) -> Result<Self, ContextError> {
        self.context.on_release_within(max_duration, handler)?;
        Ok(self)
    }

    /// Returns the assembled context.
    pub fn build(self) -> InputContext<C, D, TIERS> {
        self.context
    }
}

impl<C, D: TimeDuration, const TIERS: usize> Default for InputContextBuilder<C, D, TIERS> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        presses: u32,
        short: Option<u64>,
        medium: Option<u64>,
        long: Option<u64>,
    }

    fn count_press(log: &mut Log) {
        log.presses += 1;
    }

    fn short(log: &mut Log, d: u64) {
        log.short = Some(d);
    }

    fn medium(log: &mut Log, d: u64) {
        log.medium = Some(d);
    }

    fn long(log: &mut Log, d: u64) {
        log.long = Some(d);
    }

    #[test]
    fn empty_context_is_silent() {
        let context = InputContext::<Log, u64, 4>::new();
        let mut log = Log::default();

        assert!(!context.press(&mut log));
        assert!(!context.release(&mut log, 100));
        assert!(context.is_empty());
    }

    #[test]
    fn tightest_tier_wins() {
        let mut context = InputContext::<Log, u64, 4>::new();
        // Registered out of order on purpose
        context.on_release_within(1000, medium).unwrap();
        context.on_release_within(300, short).unwrap();

        let mut log = Log::default();
        assert!(context.release(&mut log, 300));
        assert_eq!(log.short, Some(300));
        assert_eq!(log.medium, None);

        let mut log = Log::default();
        assert!(context.release(&mut log, 301));
        assert_eq!(log.short, None);
        assert_eq!(log.medium, Some(301));
    }

    #[test]
    fn uncovered_duration_falls_back_to_catch_all() {
        let mut context = InputContext::<Log, u64, 4>::new();
        context.on_release_within(300, short).unwrap();

        let mut log = Log::default();
        assert!(!context.release(&mut log, 5000));
        assert_eq!(log.short, None);

        context.on_release(long);
        assert!(context.release(&mut log, 5000));
        assert_eq!(log.long, Some(5000));
    }

    #[test]
    fn same_threshold_replaces_handler() {
        let mut context = InputContext::<Log, u64, 1>::new();
        context.on_release_within(300, short).unwrap();
        context.on_release_within(300, medium).unwrap();
        assert_eq!(context.tier_count(), 1);

        let mut log = Log::default();
        context.release(&mut log, 10);
        assert_eq!(log.medium, Some(10));
        assert_eq!(log.short, None);
    }

    #[test]
    fn full_tier_table_is_reported() {
        let mut context = InputContext::<Log, u64, 2>::new();
        context.on_release_within(100, short).unwrap();
        context.on_release_within(200, medium).unwrap();

        let result = context.on_release_within(300, long);
        assert_eq!(result, Err(ContextError::TierTableFull));
        assert_eq!(context.tier_count(), 2);
    }

    #[test]
    fn builder_assembles_handlers() {
        let context = InputContext::<Log, u64, 4>::builder()
            .on_press(count_press)
            .on_release_within(500, short)
            .unwrap()
            .on_release(long)
            .build();

        let mut log = Log::default();
        context.press(&mut log);
        context.release(&mut log, 800);
        assert_eq!(log.presses, 1);
        assert_eq!(log.long, Some(800));
        assert!(context.has_press_handler());
    }

    #[test]
    fn clear_release_keeps_press_handler() {
        let mut context = InputContext::<Log, u64, 4>::builder()
            .on_press(count_press)
            .on_release(long)
            .build();

        context.clear_release();
        let mut log = Log::default();
        assert!(context.press(&mut log));
        assert!(!context.release(&mut log, 10));
    }
}
