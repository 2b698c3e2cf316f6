// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use ripple_core::{Disposer, Observer, Scheduler, SchedulerRef, Stream, StreamError};
use std::sync::Arc;

/// One observed callback.
///
/// Errors are recorded by their display text so that events compare with `==`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    Next(T),
    End(Option<String>),
}

impl<T> Event<T> {
    pub fn end_with(error: &str) -> Self {
        Event::End(Some(error.to_string()))
    }
}

type Rejection<T> = dyn Fn(&T) -> bool + Send + Sync;

/// Subscribes to streams and records what they deliver.
///
/// Unlike [`Stream::each`], the recorder does not guard the consumer, so a
/// pipeline that delivers `end` twice shows two `End` events.
pub struct Recorder<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
    reject: Option<Arc<Rejection<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            reject: self.reject.clone(),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            reject: None,
        }
    }
}

impl<T: Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose `next` fails for values matching `predicate`.
    ///
    /// Rejected values are still recorded. The failure is
    /// `StreamError::failure("rejected")`.
    pub fn rejecting<P>(predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            reject: Some(Arc::new(predicate)),
        }
    }

    /// Subscribe to `stream` on `scheduler`.
    pub fn record<S>(&self, stream: &Stream<T>, scheduler: &S) -> Disposer
    where
        S: Scheduler + Clone,
    {
        stream.subscribe(self.observer(SchedulerRef::new(scheduler.clone())))
    }

    pub fn observer(&self, scheduler: SchedulerRef) -> Observer<T> {
        let values = Arc::clone(&self.events);
        let ends = Arc::clone(&self.events);
        let reject = self.reject.clone();
        Observer::new(
            scheduler,
            move |value: T| {
                let rejected = reject.as_ref().is_some_and(|reject| reject(&value));
                values.lock().push(Event::Next(value));
                if rejected {
                    return Err(StreamError::failure("rejected"));
                }
                Ok(())
            },
            move |termination: Option<StreamError>| {
                ends.lock()
                    .push(Event::End(termination.map(|error| error.to_string())));
            },
        )
    }

    /// Number of `End` events seen.
    pub fn end_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| matches!(event, Event::End(_)))
            .count()
    }

    pub fn is_ended(&self) -> bool {
        self.end_count() > 0
    }

    /// The first termination seen, if any.
    pub fn termination(&self) -> Option<Option<String>> {
        self.events.lock().iter().find_map(|event| match event {
            Event::End(termination) => Some(termination.clone()),
            Event::Next(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn events(&self) -> Vec<Event<T>> {
        self.events.lock().clone()
    }

    /// Delivered values, in order.
    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                Event::End(_) => None,
            })
            .collect()
    }
}
