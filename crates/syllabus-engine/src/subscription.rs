//! Publish/subscribe registry.
//!
//! Views register boxed callbacks and receive events synchronously, after
//! the mutation that produced them has been fully applied.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSCRIPTION: AtomicU64 = AtomicU64::new(1);

/// Handle returned by `subscribe`, used to unsubscribe later.
///
/// Ids are unique across every registry in the process, so a single id can
/// be offered to several registries and only the owner will remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

pub type Callback<E> = Box<dyn FnMut(&E)>;

/// Ordered set of callbacks for one event type.
pub struct Subscribers<E> {
    entries: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a callback. Callbacks fire in registration order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId::next();
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the id is not registered here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every callback once with the event.
    pub fn notify(&mut self, event: &E) {
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::<u32>::new();
        let first = Rc::clone(&seen);
        subscribers.subscribe(move |value| first.borrow_mut().push(("first", *value)));
        let second = Rc::clone(&seen);
        subscribers.subscribe(move |value| second.borrow_mut().push(("second", *value)));

        subscribers.notify(&7);

        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::<()>::new();
        let counter = Rc::clone(&hits);
        let id = subscribers.subscribe(move |_| *counter.borrow_mut() += 1);

        subscribers.notify(&());
        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));
        subscribers.notify(&());

        assert_eq!(*hits.borrow(), 1);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_registries() {
        let mut a = Subscribers::<()>::new();
        let mut b = Subscribers::<()>::new();
        let id_a = a.subscribe(|_| {});
        let id_b = b.subscribe(|_| {});
        assert_ne!(id_a, id_b);
        assert!(!b.unsubscribe(id_a));
        assert_eq!(b.len(), 1);
    }
}
