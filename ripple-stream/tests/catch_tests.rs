// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{Stream, StreamError};
use ripple_stream::prelude::*;
use ripple_test_utils::{failure, Event, Recorder, VirtualScheduler};

#[test]
fn test_catch_recovers_with_value() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let stream = Stream::fail(failure("boom")).catch(|e: StreamError| e.to_string().len());

    // Act
    recorder.record(&stream, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(4), Event::End(None)]);
}

#[test]
fn test_catch_passes_success_through() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();

    recorder.record(&Stream::from_iter(vec![1, 2]).catch(|_e| -1), &scheduler);
    scheduler.run_until_idle();

    assert_eq!(
        recorder.events(),
        vec![Event::Next(1), Event::Next(2), Event::End(None)]
    );
}

#[test]
fn test_catch_keeps_values_before_failure() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let stream = Stream::of(1)
        .concat(&Stream::fail(failure("late")))
        .catch(|_e| 0);

    // Act
    recorder.record(&stream, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![Event::Next(1), Event::Next(0), Event::End(None)]
    );
}

#[test]
fn test_catch_panicking_handler_fails_stream() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::<i32>::new();

    recorder.record(
        &Stream::<i32>::fail(failure("boom")).catch(|_e| panic!("handler broke")),
        &scheduler,
    );
    scheduler.run_until_idle();

    assert_eq!(
        recorder.events(),
        vec![Event::end_with("Callback panicked: handler broke")]
    );
}

#[test]
fn test_try_catch_error_replaces_failure() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::<i32>::new();
    let stream = Stream::fail(failure("boom"))
        .try_catch(|e| Err(StreamError::failure(format!("still broken after {e}"))));

    // Act
    recorder.record(&stream, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![Event::end_with("still broken after boom")]
    );
}

#[test]
fn test_catch_rejected_recovery_value_fails() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::rejecting(|x: &i32| *x == 0);

    recorder.record(&Stream::fail(failure("boom")).catch(|_e| 0), &scheduler);
    scheduler.run_until_idle();

    assert_eq!(
        recorder.events(),
        vec![Event::Next(0), Event::end_with("rejected")]
    );
}
