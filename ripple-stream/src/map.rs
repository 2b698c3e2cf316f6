// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `map` operator.
pub trait MapExt<T> {
    /// Transforms each value with `f`.
    ///
    /// # Behavior
    ///
    /// - **Values**: `f(value)` is forwarded
    /// - **Termination**: Forwarded unchanged
    /// - **Timing**: Unchanged, `f` runs in the turn the value arrives
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ripple_core::Stream;
    /// use ripple_stream::MapExt;
    /// use ripple_test_utils::{Event, Recorder, VirtualScheduler};
    ///
    /// let scheduler = VirtualScheduler::new();
    /// let recorder = Recorder::new();
    ///
    /// recorder.record(&Stream::of(5).map(|x| x * 2), &scheduler);
    /// scheduler.run_until_idle();
    ///
    /// assert_eq!(recorder.events(), vec![Event::Next(10), Event::End(None)]);
    /// ```
    fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;
}

impl<T: Send + 'static> MapExt<T> for Stream<T> {
    fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Stream::new(Map {
            source: self.clone(),
            f: Arc::new(f),
        })
    }
}

struct Map<T, F> {
    source: Stream<T>,
    f: Arc<F>,
}

impl<T, U, F> Emitter<U> for Map<T, F>
where
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<U>) -> Disposer {
        let f = Arc::clone(&self.f);
        let downstream = observer.clone();
        self.source
            .subscribe(observer.with_next(move |value: T| downstream.next(f(value))))
    }
}
