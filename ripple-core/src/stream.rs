// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The stream shell: one emitter behind a cheaply cloneable handle.

use crate::disposer::Disposer;
use crate::error::{Result, Termination};
use crate::observer::Observer;
use crate::scheduler::SchedulerRef;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The subscription contract of a stream.
///
/// `emit` starts a cold execution delivering values to `observer`. It must
/// return without calling `next` or `end`; all delivery happens in later
/// turns of the observer's scheduler. Every call starts from scratch: state
/// belonging to one execution lives inside that call, never in `self`.
pub trait Emitter<T>: Send + Sync + 'static {
    fn emit(&self, observer: Observer<T>) -> Disposer;
}

/// A lazy, reusable push stream.
///
/// Constructing a `Stream` performs no work. Each [`subscribe`](Stream::subscribe)
/// re-executes the whole pipeline. Operators never modify a stream; they wrap
/// it into a new one.
///
/// # Example
///
/// ```
/// use ripple_core::Stream;
/// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
///
/// let scheduler = VirtualScheduler::new();
/// let recorder = Recorder::new();
///
/// recorder.record(&Stream::of(42), &scheduler);
/// scheduler.run_until_idle();
///
/// assert_eq!(recorder.events(), vec![Event::Next(42), Event::End(None)]);
/// ```
pub struct Stream<T> {
    emitter: Arc<dyn Emitter<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            emitter: Arc::clone(&self.emitter),
        }
    }
}

impl<T: Send + 'static> Stream<T> {
    /// Wrap an emitter.
    pub fn new(emitter: impl Emitter<T>) -> Self {
        Self {
            emitter: Arc::new(emitter),
        }
    }

    /// Build a stream from a closure implementing the subscription contract.
    pub fn from_fn<F>(emit: F) -> Self
    where
        F: Fn(Observer<T>) -> Disposer + Send + Sync + 'static,
    {
        Self::new(FnEmitter(emit))
    }

    /// Start an execution delivering to `observer`.
    ///
    /// This is the primitive every operator is written against.
    pub fn subscribe(&self, observer: Observer<T>) -> Disposer {
        self.emitter.emit(observer)
    }

    /// Consume the stream with infallible callbacks.
    ///
    /// See [`try_each`](Stream::try_each).
    pub fn each<N, E>(&self, scheduler: impl Into<SchedulerRef>, next: N, end: E) -> Disposer
    where
        N: Fn(T) + Send + Sync + 'static,
        E: Fn(Termination) + Send + Sync + 'static,
    {
        self.try_each(
            scheduler,
            move |value| {
                next(value);
                Ok(())
            },
            end,
        )
    }

    /// Consume the stream on `scheduler`.
    ///
    /// The consumer sees at most one `end` and no `next` after it, whatever
    /// the pipeline does. An `Err` from `next` fails the subscription with
    /// that error.
    pub fn try_each<N, E>(&self, scheduler: impl Into<SchedulerRef>, next: N, end: E) -> Disposer
    where
        N: Fn(T) -> Result<()> + Send + Sync + 'static,
        E: Fn(Termination) + Send + Sync + 'static,
    {
        let disposer = Disposer::new();
        let terminated = Arc::new(AtomicBool::new(false));

        let closed = Arc::clone(&terminated);
        let upstream = disposer.clone();
        let observer = Observer::new(
            scheduler.into(),
            move |value| {
                if closed.load(Ordering::Acquire) {
                    return Ok(());
                }
                next(value)
            },
            move |termination| {
                if terminated.swap(true, Ordering::AcqRel) {
                    crate::debug!("ignoring termination after the subscription ended");
                    return;
                }
                end(termination);
                upstream.dispose();
            },
        );

        disposer.add_disposer(self.subscribe(observer));
        disposer
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

struct FnEmitter<F>(F);

impl<T, F> Emitter<T> for FnEmitter<F>
where
    T: 'static,
    F: Fn(Observer<T>) -> Disposer + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<T>) -> Disposer {
        (self.0)(observer)
    }
}
