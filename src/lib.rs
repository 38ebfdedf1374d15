#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DebounceInput`**: Debounces one digital input and dispatches confirmed press/release events
//! - **`InputContext`**: The set of handlers an input dispatches to; handed around by value
//! - **`DeferredScheduler`**: Runs tasks after a delay, ordered by due time
//! - **`Tickable`**: Trait for anything advanced once per run loop iteration
//! - **`RunLoop`**: Ticks registered components in order, once per iteration
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`InputEvent`**: A confirmed transition, returned from `DebounceInput::tick`
//!
//! Handlers and tasks are plain `fn` pointers that receive a mutable application
//! context `C`, passed in on every tick. Nothing allocates; all storage is sized
//! by const generics.

#[macro_use]
mod fmt;

pub mod context;
pub mod input;
pub mod run_loop;
pub mod scheduler;
pub mod time;
pub mod types;

pub use context::{InputContext, InputContextBuilder, PressHandler, ReleaseHandler};
pub use input::DebounceInput;
pub use run_loop::{RunLoop, RunLoopError, TickId, Tickable};
pub use scheduler::{DeferredScheduler, SchedulerError, Task};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{
    ActiveLevel, ContextError, DEFAULT_MIN_PRESS_DURATION_MS, DebounceConfig, InputEvent,
};
