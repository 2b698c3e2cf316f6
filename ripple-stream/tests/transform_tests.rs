// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::Stream;
use ripple_stream::prelude::*;
use ripple_test_utils::{failure, Event, Recorder, VirtualScheduler};
use std::sync::Arc;

#[test]
fn test_map_transforms_value() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    // Act
    recorder.record(&Stream::of(5).map(|x| x * 2), &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(10), Event::End(None)]);
}

#[test]
fn test_map_changes_value_type() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    recorder.record(
        &Stream::from_iter(vec![1, 22, 333]).map(|x: i32| x.to_string().len()),
        &scheduler,
    );
    scheduler.run_until_idle();

    assert_eq!(recorder.values(), vec![1, 2, 3]);
}

#[test]
fn test_map_propagates_failure_unchanged() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    recorder.record(&Stream::<i32>::fail(failure("boom")).map(|x| x + 1), &scheduler);
    scheduler.run_until_idle();

    assert_eq!(recorder.events(), vec![Event::end_with("boom")]);
}

#[test]
fn test_map_panic_terminates_source() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let stream = Stream::from_iter(vec![1, 2, 3]).map(|x: i32| {
        if x == 2 {
            panic!("two is not allowed");
        }
        x
    });

    // Act
    recorder.record(&stream, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![
            Event::Next(1),
            Event::end_with("Callback panicked: two is not allowed")
        ]
    );
}

#[test]
fn test_filter_drops_rejected_values() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    // Act
    recorder.record(&Stream::of(5).filter(|x| *x > 10), &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(recorder.events(), vec![Event::End(None)]);
}

#[test]
fn test_filter_keeps_matching_values_in_order() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    recorder.record(&Stream::from_iter(1..=10).filter(|x| x % 3 == 0), &scheduler);
    scheduler.run_until_idle();

    assert_eq!(recorder.values(), vec![3, 6, 9]);
}

#[test]
fn test_tap_observes_without_changing() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    // Act
    recorder.record(
        &Stream::from_iter(vec!["a", "b"]).tap(move |x| log.lock().push(*x)),
        &scheduler,
    );
    scheduler.run_until_idle();

    // Assert
    assert_eq!(*seen.lock(), vec!["a", "b"]);
    assert_eq!(
        recorder.events(),
        vec![Event::Next("a"), Event::Next("b"), Event::End(None)]
    );
}

#[test]
fn test_tap_is_not_called_for_failures() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::<i32>::new();
    let calls = Arc::new(Mutex::new(0));
    let count = calls.clone();

    recorder.record(
        &Stream::<i32>::fail(failure("boom")).tap(move |_x| *count.lock() += 1),
        &scheduler,
    );
    scheduler.run_until_idle();

    assert_eq!(*calls.lock(), 0);
    assert_eq!(recorder.events(), vec![Event::end_with("boom")]);
}

#[test]
fn test_scan_emits_running_accumulator() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    // Act
    recorder.record(
        &Stream::from_iter(vec![1, 2, 3, 4]).scan(10, |acc, x| acc + x),
        &scheduler,
    );
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![
            Event::Next(11),
            Event::Next(13),
            Event::Next(16),
            Event::Next(20),
            Event::End(None)
        ]
    );
}

#[test]
fn test_scan_restarts_for_each_subscription() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let stream = Stream::from_iter(vec![1, 2]).scan(0, |acc, x| acc + x);
    let first = Recorder::new();
    let second = Recorder::new();

    // Act
    first.record(&stream, &scheduler);
    scheduler.run_until_idle();
    second.record(&stream, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(first.values(), vec![1, 3]);
    assert_eq!(second.values(), vec![1, 3]);
}

#[test]
fn test_consumer_error_surfaces_as_source_failure() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::rejecting(|x: &i32| *x == 4);

    // Act
    recorder.record(&Stream::from_iter(vec![1, 2, 3]).map(|x| x * 2), &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![Event::Next(2), Event::Next(4), Event::end_with("rejected")]
    );
}
