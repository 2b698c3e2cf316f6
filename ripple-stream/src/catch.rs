// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Recovery from a failed stream.

use ripple_core::{catch_fault, Disposer, Emitter, Observer, Result, Stream, StreamError};
use std::sync::Arc;

/// Extension trait providing the `catch` and `try_catch` operators.
pub trait CatchExt<T> {
    /// Replaces a failure with the value `f` computes from it.
    ///
    /// # Behavior
    ///
    /// - **Values**: Pass through unmodified
    /// - **Success**: Passes through unchanged
    /// - **Failure**: `f(error)` is forwarded, then the stream completes. If
    ///   `f` panics, or the consumer rejects the recovery value, that new
    ///   error terminates the stream instead
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::{Stream, StreamError};
    /// use ripple_stream::CatchExt;
    /// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// let recovered = Stream::fail(StreamError::failure("boom")).catch(|e| e.to_string().len());
    /// recorder.record(&recovered, &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(recorder.events(), vec![Event::Next(4), Event::End(None)]);
    /// ```
    fn catch<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(StreamError) -> T + Send + Sync + 'static;

    /// Like [`catch`](CatchExt::catch), with a recovery function that can
    /// itself fail. An `Err` from `f` terminates the stream with that error.
    fn try_catch<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(StreamError) -> Result<T> + Send + Sync + 'static;
}

impl<T: Send + 'static> CatchExt<T> for Stream<T> {
    fn catch<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(StreamError) -> T + Send + Sync + 'static,
    {
        self.try_catch(move |error| Ok(f(error)))
    }

    fn try_catch<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(StreamError) -> Result<T> + Send + Sync + 'static,
    {
        Stream::new(Catch {
            source: self.clone(),
            f: Arc::new(f),
        })
    }
}

struct Catch<T, F> {
    source: Stream<T>,
    f: Arc<F>,
}

impl<T, F> Emitter<T> for Catch<T, F>
where
    T: Send + 'static,
    F: Fn(StreamError) -> Result<T> + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let f = Arc::clone(&self.f);
        let downstream = observer.clone();

        self.source
            .subscribe(observer.with_end(move |termination| match termination {
                None => downstream.complete(),
                Some(error) => {
                    ripple_core::debug!("recovering from failure: {}", error);
                    let recovery = catch_fault(|| f(error)).and_then(|value| downstream.next(value));
                    downstream.end(recovery.err());
                }
            }))
    }
}
