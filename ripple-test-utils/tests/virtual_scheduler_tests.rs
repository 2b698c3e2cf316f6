// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::Scheduler;
use ripple_test_utils::VirtualScheduler;
use std::sync::Arc;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn log() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn test_tasks_wait_for_the_test_to_drive_them() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let events = log();
    let sink = events.clone();

    // Act
    scheduler.schedule(Box::new(move || sink.lock().push("task")));

    // Assert
    assert!(events.lock().is_empty());
    assert_eq!(scheduler.pending_tasks(), 1);
    assert_eq!(scheduler.run_until_idle(), 1);
    assert_eq!(*events.lock(), vec!["task"]);
    Ok(())
}

#[test]
fn test_tasks_scheduled_by_tasks_run_in_fifo_order() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let events = log();

    let nested = scheduler.clone();
    let outer = events.clone();
    let inner = events.clone();
    scheduler.schedule(Box::new(move || {
        outer.lock().push("first");
        nested.schedule(Box::new(move || inner.lock().push("third")));
    }));
    let second = events.clone();
    scheduler.schedule(Box::new(move || second.lock().push("second")));

    // Act
    let ran = scheduler.run_until_idle();

    // Assert
    assert_eq!(ran, 3);
    assert_eq!(*events.lock(), vec!["first", "second", "third"]);
    Ok(())
}

#[test]
fn test_timers_fire_in_deadline_order_with_clock_at_deadline() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let fired = Arc::new(Mutex::new(Vec::new()));

    for (delay, name) in [(ms(30), "late"), (ms(10), "early"), (ms(10), "tied")] {
        let fired = fired.clone();
        let clock = scheduler.clone();
        scheduler.set_timer(
            delay,
            Box::new(move || fired.lock().push((name, clock.now()))),
        );
    }

    // Act
    scheduler.advance_by(ms(20));

    // Assert
    assert_eq!(
        *fired.lock(),
        vec![("early", ms(10)), ("tied", ms(10))]
    );
    assert_eq!(scheduler.now(), ms(20));
    assert_eq!(scheduler.pending_timers(), 1);
    Ok(())
}

#[test]
fn test_cleared_timer_never_fires() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let events = log();
    let sink = events.clone();
    let handle = scheduler.set_timer(ms(5), Box::new(move || sink.lock().push("fired")));

    // Act
    scheduler.clear_timer(handle);
    scheduler.run_all();

    // Assert
    assert!(events.lock().is_empty());
    assert_eq!(scheduler.pending_timers(), 0);
    Ok(())
}

#[test]
fn test_run_all_jumps_clock_to_last_deadline() -> anyhow::Result<()> {
    let scheduler = VirtualScheduler::starting_at(ms(100));
    scheduler.set_timer(ms(50), Box::new(|| {}));

    scheduler.run_all();

    assert_eq!(scheduler.now(), ms(150));
    Ok(())
}

#[test]
fn test_advance_to_past_instant_is_noop() -> anyhow::Result<()> {
    let scheduler = VirtualScheduler::starting_at(ms(40));

    scheduler.advance_to(ms(10));

    assert_eq!(scheduler.now(), ms(40));
    Ok(())
}

#[test]
fn test_timer_at_maximum_delay_saturates_deadline() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(ms(10));
    let events = log();
    let sink = events.clone();

    // Act
    scheduler.set_timer(Duration::MAX, Box::new(move || sink.lock().push("fired")));
    scheduler.run_all();

    // Assert
    assert_eq!(*events.lock(), vec!["fired"]);
    assert_eq!(scheduler.now(), Duration::MAX);
    Ok(())
}

#[test]
fn test_advance_by_maximum_duration_saturates_clock() -> anyhow::Result<()> {
    let scheduler = VirtualScheduler::starting_at(ms(10));

    scheduler.advance_by(Duration::MAX);

    assert_eq!(scheduler.now(), Duration::MAX);
    Ok(())
}
