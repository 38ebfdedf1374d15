//! Deferred task scheduler driven by ticks.
//!
//! Provides [`DeferredScheduler`], which runs plain function tasks once their
//! due time has passed. Tasks with the same due time run in the order they
//! were scheduled.

use crate::time::{TimeDuration, TimeInstant, TimeSource};
use core::cmp::Ordering;
use heapless::binary_heap::{BinaryHeap, Min};

/// A deferred task.
///
/// Receives the application context and the scheduler itself, so a task can
/// queue follow-up work with [`DeferredScheduler::after`].
pub type Task<'t, I, T, C, const N: usize> = fn(&mut C, &mut DeferredScheduler<'t, I, T, C, N>);

/// Errors that can occur when scheduling a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// All `N` slots hold pending tasks.
    QueueFull,

    /// The due time is not representable by the instant type.
    TimeOverflow,
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::QueueFull => {
                write!(f, "scheduler queue is full")
            }
            SchedulerError::TimeOverflow => {
                write!(f, "due time overflows the time base")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

struct Entry<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> {
    due: I,
    seq: u64,
    task: Task<'t, I, T, C, N>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> PartialEq for Entry<'t, I, T, C, N> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> Eq for Entry<'t, I, T, C, N> {}

impl<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> PartialOrd for Entry<'t, I, T, C, N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> Ord for Entry<'t, I, T, C, N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Runs tasks after a delay, in due-time order.
///
/// Pending tasks live in a fixed-capacity min-heap keyed by due time and
/// insertion sequence. Each [`tick`](Self::tick) pops and runs every task that
/// is due. A task may schedule more work; new tasks that are already due run
/// within the same tick, so zero-delay continuations complete together. A task
/// that keeps rescheduling itself with zero delay never lets the tick return.
///
/// There is no way to cancel a single task, only [`clear`](Self::clear).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `C` - Application context handed to tasks
/// * `N` - Maximum number of pending tasks
pub struct DeferredScheduler<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> {
    time_source: &'t T,
    pending: BinaryHeap<Entry<'t, I, T, C, N>, Min, N>,
    next_seq: u64,
    // Instant of the tick in progress; the base for `after` while tasks run
    ticking_at: Option<I>,
}

impl<'t, I: TimeInstant, T: TimeSource<I>, C, const N: usize> DeferredScheduler<'t, I, T, C, N> {
    /// Creates an empty scheduler.
    pub fn new(time_source: &'t T) -> Self {
        Self {
            time_source,
            pending: BinaryHeap::new(),
            next_seq: 0,
            ticking_at: None,
        }
    }

    /// Schedules `task` to run no earlier than `delay` from now.
    ///
    /// Outside a tick, "now" is read from the time source. From inside a
    /// running task it is the instant passed to the current [`tick`](Self::tick),
    /// so a zero-delay continuation runs later in the same tick and a non-zero
    /// delay always waits for a later one.
    ///
    /// # Errors
    /// * `QueueFull` - No free slot; the task is dropped
    /// * `TimeOverflow` - `now + delay` is not representable
    pub fn after(
        &mut self,
        delay: I::Duration,
        task: Task<'t, I, T, C, N>,
    ) -> Result<(), SchedulerError> {
        let base = self.ticking_at.unwrap_or_else(|| self.time_source.now());
        let due = base
            .checked_add(delay)
            .ok_or(SchedulerError::TimeOverflow)?;

        let entry = Entry {
            due,
            seq: self.next_seq,
            task,
        };

        if self.pending.push(entry).is_err() {
            warn!("task rejected, queue full ({} pending)", self.pending.len());
            return Err(SchedulerError::QueueFull);
        }

        self.next_seq = self.next_seq.wrapping_add(1);
        trace!("task scheduled in {}ms", delay.as_millis());
        Ok(())
    }

    /// Runs every task whose due time is at or before `now`.
    ///
    /// Returns the number of tasks that ran.
    pub fn tick(&mut self, now: I, ctx: &mut C) -> usize {
        let mut fired = 0;
        self.ticking_at = Some(now);

        loop {
            match self.pending.peek() {
                Some(entry) if entry.due <= now => {}
                _ => break,
            }

            let Some(entry) = self.pending.pop() else {
                break;
            };

            (entry.task)(ctx, self);
            fired += 1;
        }

        self.ticking_at = None;
        if fired > 0 {
            trace!("fired {} task(s), {} pending", fired, self.pending.len());
        }
        fired
    }

    /// Drops all pending tasks without running them.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Returns the due time of the earliest pending task.
    pub fn next_due(&self) -> Option<I> {
        self.pending.peek().map(|entry| entry.due)
    }

    /// Returns how long until the earliest task is due.
    ///
    /// # Returns
    /// * `Some(Duration::ZERO)` - A task is already due
    /// * `Some(duration)` - Nothing is due for this long
    /// * `None` - No pending tasks
    pub fn time_until_next(&self, now: I) -> Option<I::Duration> {
        self.next_due().map(|due| due.duration_since(now))
    }

    /// Returns the number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the maximum number of pending tasks.
    pub fn capacity(&self) -> usize {
        N
    }
}
