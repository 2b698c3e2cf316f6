// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::sync::atomic::{AtomicUsize, Ordering};
use ripple_core::{Disposer, Stream};
use ripple_stream::prelude::*;
use ripple_test_utils::{failure, timed_source, Event, Recorder, VirtualScheduler};
use std::sync::Arc;
use std::time::Duration;

/// A source that counts how often it was subscribed.
fn counting_source(subscriptions: Arc<AtomicUsize>) -> Stream<i32> {
    let inner = Stream::from_iter(vec![1, 2, 3]);
    Stream::from_fn(move |observer| {
        subscriptions.fetch_add(1, Ordering::SeqCst);
        inner.subscribe(observer)
    })
}

#[test]
fn test_pipelines_are_lazy() {
    // Arrange
    let subscriptions = Arc::new(AtomicUsize::new(0));
    let source = counting_source(subscriptions.clone());

    // Act
    let _pipeline = source
        .map(|x| x + 1)
        .filter(|x| x % 2 == 0)
        .scan(0, |acc, x| acc + x)
        .tap(|_| {})
        .merge(&Stream::of(100))
        .concat(&Stream::of(200))
        .flat_map(Stream::of)
        .catch(|_e| 0)
        .reduce(0, |acc, x| acc + x);

    // Assert
    assert_eq!(subscriptions.load(Ordering::SeqCst), 0);
}

#[test]
fn test_nothing_is_delivered_synchronously() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let pipeline = Stream::from_iter(vec![1, 2, 3])
        .map(|x| x * 10)
        .merge(&Stream::of(5))
        .flat_map(|x| Stream::of(x).concat(&Stream::empty()));

    // Act
    recorder.record(&pipeline, &scheduler);
    let delivered_during_subscribe = recorder.is_empty();
    scheduler.run_until_idle();

    // Assert
    assert!(delivered_during_subscribe);
    assert_eq!(recorder.values(), vec![10, 20, 30]);
    assert_eq!(recorder.events().last(), Some(&Event::End(None)));
}

#[test]
fn test_pipeline_is_reusable() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let subscriptions = Arc::new(AtomicUsize::new(0));
    let pipeline = counting_source(subscriptions.clone())
        .map(|x| x * 2)
        .reduce(0, |acc, x| acc + x);
    let first = Recorder::new();
    let second = Recorder::new();

    // Act
    first.record(&pipeline, &scheduler);
    second.record(&pipeline, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(subscriptions.load(Ordering::SeqCst), 2);
    assert_eq!(first.events(), vec![Event::Next(12), Event::End(None)]);
    assert_eq!(second.events(), first.events());
}

#[test]
fn test_failure_travels_through_chain() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let pipeline = Stream::of(1)
        .concat(&Stream::fail(failure("source failed")))
        .map(|x| x + 1)
        .filter(|_| true)
        .scan(0, |acc, x| acc + x);

    // Act
    recorder.record(&pipeline, &scheduler);
    scheduler.run_until_idle();

    // Assert
    assert_eq!(
        recorder.events(),
        vec![Event::Next(2), Event::end_with("source failed")]
    );
}

#[test]
fn test_failure_recovered_mid_chain() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let pipeline = Stream::<i32>::fail(failure("oops"))
        .catch(|_e| 7)
        .map(|x| x * 3);

    recorder.record(&pipeline, &scheduler);
    scheduler.run_until_idle();

    assert_eq!(recorder.events(), vec![Event::Next(21), Event::End(None)]);
}

#[test]
fn test_disposal_reaches_every_source() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let left = timed_source(vec![(Duration::from_millis(10), 1)]);
    let right = timed_source(vec![(Duration::from_millis(20), 2)]);
    let disposer: Disposer = recorder.record(&left.merge(&right).map(|x| x + 1), &scheduler);
    let armed = scheduler.pending_timers();

    // Act
    disposer.dispose();
    scheduler.run_all();

    // Assert
    assert_eq!(armed, 4);
    assert_eq!(scheduler.pending_timers(), 0);
    assert!(recorder.is_empty());
}

#[test]
fn test_single_end_for_composed_pipeline() {
    let scheduler = VirtualScheduler::new();
    let recorder = Recorder::new();
    let pipeline = Stream::from_iter(vec![1, 2])
        .merge(&Stream::from_iter(vec![3, 4]))
        .flat_map(|x| Stream::from_iter(vec![x, x]))
        .concat(&Stream::empty());

    recorder.record(&pipeline, &scheduler);
    scheduler.run_until_idle();

    assert_eq!(recorder.end_count(), 1);
    assert_eq!(recorder.values().len(), 4);
}
