// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Primitive sources.
//!
//! Every constructor defers its first callback to a later scheduler turn, so
//! subscribing never delivers synchronously.

use crate::disposer::Disposer;
use crate::error::StreamError;
use crate::observer::Observer;
use crate::stream::{Emitter, Stream};

impl<T: Clone + Send + Sync + 'static> Stream<T> {
    /// A stream emitting `value` once, then completing.
    ///
    /// If the consumer fails while handling the value, the stream ends with
    /// that error instead.
    pub fn of(value: T) -> Self {
        Self::new(Of { value })
    }

    /// A stream emitting every item of `items` in order, then completing.
    pub fn from_iter<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(FromIter {
            items: items.into_iter().collect(),
        })
    }
}

impl<T: Send + 'static> Stream<T> {
    /// A stream that completes without emitting.
    pub fn empty() -> Self {
        Self::new(Empty)
    }

    /// A stream that fails with `error` without emitting.
    pub fn fail(error: StreamError) -> Self {
        Self::new(Fail { error })
    }

    /// A stream that never emits and never terminates.
    pub fn never() -> Self {
        Self::new(Never)
    }
}

struct Of<T> {
    value: T,
}

impl<T: Clone + Send + Sync + 'static> Emitter<T> for Of<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let disposer = Disposer::new();
        let subscription = disposer.clone();
        let value = self.value.clone();

        observer.scheduler().clone().defer(move || {
            if subscription.is_disposed() {
                return;
            }
            let error = observer.next(value).err();
            if !subscription.is_disposed() {
                observer.end(error);
            }
        });

        disposer
    }
}

struct FromIter<T> {
    items: Vec<T>,
}

impl<T: Clone + Send + Sync + 'static> Emitter<T> for FromIter<T> {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let disposer = Disposer::new();
        let subscription = disposer.clone();
        let items = self.items.clone();

        observer.scheduler().clone().defer(move || {
            for item in items {
                if subscription.is_disposed() {
                    return;
                }
                if let Err(error) = observer.next(item) {
                    observer.fail(error);
                    return;
                }
            }
            if !subscription.is_disposed() {
                observer.complete();
            }
        });

        disposer
    }
}

struct Empty;

impl<T: Send + 'static> Emitter<T> for Empty {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let disposer = Disposer::new();
        let subscription = disposer.clone();

        observer.scheduler().clone().defer(move || {
            if !subscription.is_disposed() {
                observer.complete();
            }
        });

        disposer
    }
}

struct Fail {
    error: StreamError,
}

impl<T: Send + 'static> Emitter<T> for Fail {
    fn emit(&self, observer: Observer<T>) -> Disposer {
        let disposer = Disposer::new();
        let subscription = disposer.clone();
        let error = self.error.clone();

        observer.scheduler().clone().defer(move || {
            if !subscription.is_disposed() {
                observer.fail(error);
            }
        });

        disposer
    }
}

struct Never;

impl<T: Send + 'static> Emitter<T> for Never {
    fn emit(&self, _observer: Observer<T>) -> Disposer {
        Disposer::new()
    }
}
