// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{SchedulerRef, Stream};
use ripple_test_utils::{failure, timed_source, Event, Recorder, VirtualScheduler};
use std::time::Duration;

#[test]
fn test_recorder_keeps_repeated_ends() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::<i32>::new();
    let observer = recorder.observer(SchedulerRef::new(scheduler.clone()));

    // Act
    observer.complete();
    observer.fail(failure("again"));

    // Assert
    assert_eq!(recorder.end_count(), 2);
    assert_eq!(recorder.termination(), Some(None));
    assert_eq!(
        recorder.events(),
        vec![Event::End(None), Event::end_with("again")]
    );
    Ok(())
}

#[test]
fn test_rejecting_recorder_fails_matching_values() -> anyhow::Result<()> {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::rejecting(|x: &i32| *x > 1);
    let observer = recorder.observer(SchedulerRef::new(scheduler));

    assert!(observer.next(1).is_ok());
    let rejected = observer.next(2);

    assert_eq!(rejected.map_err(|e| e.to_string()), Err("rejected".to_string()));
    assert_eq!(recorder.values(), vec![1, 2]);
    Ok(())
}

#[test]
fn test_timed_source_emits_at_offsets() -> anyhow::Result<()> {
    // Arrange
    let ms = Duration::from_millis;
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    recorder.record(&timed_source(vec![(ms(10), 'a'), (ms(20), 'b')]), &scheduler);

    // Act & Assert
    scheduler.advance_by(ms(10));
    assert_eq!(recorder.events(), vec![Event::Next('a')]);

    scheduler.advance_by(ms(10));
    assert_eq!(
        recorder.events(),
        vec![Event::Next('a'), Event::Next('b'), Event::End(None)]
    );
    Ok(())
}

#[test]
fn test_timed_source_disposal_clears_its_timers() -> anyhow::Result<()> {
    let ms = Duration::from_millis;
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let disposer = recorder.record(&timed_source(vec![(ms(10), 1)]), &scheduler);

    disposer.dispose();

    assert_eq!(scheduler.pending_timers(), 0);
    scheduler.run_all();
    assert!(recorder.is_empty());
    Ok(())
}

#[test]
fn test_recorder_starts_empty() -> anyhow::Result<()> {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    recorder.record(&Stream::of(1), &scheduler);

    assert!(recorder.is_empty());
    assert!(!recorder.is_ended());
    assert_eq!(recorder.termination(), None);
    Ok(())
}
