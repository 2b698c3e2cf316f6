// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tap operator for side-effect observation without modifying the stream.

use ripple_core::{Disposer, Emitter, Observer, Stream};
use std::sync::Arc;

/// Extension trait providing the `tap` operator.
pub trait TapExt<T> {
    /// Invokes `f` with a reference to each value, then forwards the value
    /// unchanged.
    ///
    /// Useful for debugging, logging, or metrics collection without affecting
    /// the data flow. Termination passes through without calling `f`.
    fn tap<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(&T) + Send + Sync + 'static;
}

impl<T: Send + 'static> TapExt<T> for Stream<T> {
    fn tap<F>(&self, f: F) -> Stream<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Stream::new(Tap {
            source: self.clone(),
            f: Arc::new(f),
        })
    }
}

struct Tap<T, F> {
    source: Stream<T>,
    f: Arc<F>,
}

impl<T, F> Emitter<T> for Tap<T, F>
where
    T: Send + 'static,
    F: Fn(&T) + Send + Sync + 'static,
{
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let f = Arc::clone(&self.f);
        let downstream = observer.clone();
        self.source.subscribe(observer.with_next(move |value: T| {
            f(&value);
            downstream.next(value)
        }))
    }
}
