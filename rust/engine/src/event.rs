//! Synchronous observer plumbing shared by hands, rules and game managers.
//!
//! An [`Event`] holds an ordered list of handlers. Firing calls every handler
//! with the payload, in subscription order, before returning. A [`Recorder`]
//! is a handler that keeps a copy of each payload so the owner can apply them
//! once the borrow that produced them has ended.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type Handler<T> = Box<dyn FnMut(&T)>;

pub struct Event<T> {
    handlers: Vec<Handler<T>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    pub fn fire(&mut self, payload: &T) {
        for handler in self.handlers.iter_mut() {
            handler(payload);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<T: Clone + 'static> Event<T> {
    /// Subscribe a recorder and hand back the shared buffer it fills.
    pub fn recorder(&mut self) -> Recorder<T> {
        let recorder = Recorder::new();
        let sink = recorder.clone();
        self.subscribe(move |payload: &T| sink.push(payload.clone()));
        recorder
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

/// Shared, cloneable buffer of fired payloads.
#[derive(Debug)]
pub struct Recorder<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Recorder<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn push(&self, payload: T) {
        self.inner.borrow_mut().push(payload);
    }

    /// Take every recorded payload, oldest first.
    pub fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl<T: Clone> Recorder<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.borrow().clone()
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handlers_run_in_subscription_order() {
        let log = Recorder::new();
        let mut event: Event<u32> = Event::new();
        let first = log.clone();
        event.subscribe(move |v| first.push(format!("a{}", v)));
        let second = log.clone();
        event.subscribe(move |v| second.push(format!("b{}", v)));

        event.fire(&1);
        event.fire(&2);

        assert_eq!(log.drain(), vec!["a1", "b1", "a2", "b2"]);
        assert!(log.is_empty());
    }

    #[test]
    fn recorder_keeps_payloads_until_drained() {
        let mut event: Event<&'static str> = Event::new();
        let rec = event.recorder();
        event.fire(&"x");
        event.fire(&"y");
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.snapshot(), vec!["x", "y"]);
        assert_eq!(rec.drain(), vec!["x", "y"]);
        assert_eq!(event.subscriber_count(), 1);
    }
}
