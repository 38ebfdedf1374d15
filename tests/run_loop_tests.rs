//! Integration tests for RunLoop driving both components

mod common;
use common::*;

use tick_debounce::{ActiveLevel, DebounceInput, DeferredScheduler, RunLoop, TimeSource};

#[derive(Default)]
struct App {
    presses: u32,
    long_releases: u32,
    heartbeats: u32,
}

type Scheduler<'t> = DeferredScheduler<'t, TestInstant, MockTimeSource, App, 4>;

fn pressed(app: &mut App) {
    app.presses += 1;
}

fn long_release(app: &mut App, _held: TestDuration) {
    app.long_releases += 1;
}

fn heartbeat(app: &mut App, sched: &mut Scheduler<'_>) {
    app.heartbeats += 1;
    sched.after(TestDuration(100), heartbeat).unwrap();
}

#[test]
fn run_once_ticks_every_component() {
    let timer = MockTimeSource::new();
    let line = PinLine::new();
    let mut app = App::default();

    let mut button =
        DebounceInput::<_, TestInstant, App, 2>::new(line.pin(), ActiveLevel::High);
    button.on_press(pressed);
    button
        .on_release_within(TestDuration(500), |_, _| {})
        .unwrap();
    button.on_release(long_release);

    let mut sched = Scheduler::new(&timer);
    sched.after(TestDuration(0), heartbeat).unwrap();

    let mut run_loop = RunLoop::<TestInstant, App, 2>::new();
    run_loop.register(&mut button).unwrap();
    run_loop.register(&mut sched).unwrap();
    assert_eq!(run_loop.len(), 2);

    // Hold the button for one second, ticking every 10ms
    line.set_high(true);
    for _ in 0..=100 {
        run_loop.run_once(timer.now(), &mut app);
        timer.advance(TestDuration(10));
    }
    line.set_high(false);
    for _ in 0..10 {
        run_loop.run_once(timer.now(), &mut app);
        timer.advance(TestDuration(10));
    }

    assert_eq!(app.presses, 1);
    assert_eq!(app.long_releases, 1);
    // Heartbeat at 0, 100, ..., 1100
    assert_eq!(app.heartbeats, 12);
}
