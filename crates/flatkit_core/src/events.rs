//! Event dispatch system
//!
//! A single-threaded publish/subscribe registry keyed by event name.
//! Each dispatch carries at most one message, delivered by reference to every
//! subscriber of the event, synchronously, in the calling thread.
//!
//! Delivery is fail-fast: the first subscriber returning an error stops the
//! dispatch and the error is handed back to the dispatcher.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Unique identifier for a subscriber
    pub struct SubscriberId;
}

/// Subscriber callback
///
/// Receives `None` when the event was dispatched without a message.
pub type Callback<M, E> = Rc<dyn Fn(Option<&M>) -> Result<(), E>>;

struct Subscriber<M, E> {
    event: String,
    callback: Callback<M, E>,
}

struct Registry<M, E> {
    subscribers: SlotMap<SubscriberId, Subscriber<M, E>>,
    events: FxHashMap<String, Vec<SubscriberId>>,
}

impl<M, E> Registry<M, E> {
    fn remove(&mut self, id: SubscriberId) -> bool {
        let Some(subscriber) = self.subscribers.remove(id) else {
            return false;
        };
        if let Some(ids) = self.events.get_mut(&subscriber.event) {
            ids.retain(|other| *other != id);
            if ids.is_empty() {
                self.events.remove(&subscriber.event);
            }
        }
        true
    }
}

/// Publish/subscribe registry
///
/// Cloning produces another handle to the same registry.
pub struct EventBus<M, E> {
    inner: Rc<RefCell<Registry<M, E>>>,
}

impl<M: 'static, E: 'static> EventBus<M, E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                subscribers: SlotMap::with_key(),
                events: FxHashMap::default(),
            })),
        }
    }

    /// Subscribe `callback` to `event`
    ///
    /// Adding the same callback (the same `Rc` allocation) to the same event
    /// twice is a no-op; the returned handle refers to the existing
    /// subscription.
    pub fn add(&self, event: &str, callback: Callback<M, E>) -> Subscription<M, E> {
        let mut registry = self.inner.borrow_mut();

        let existing = registry.events.get(event).and_then(|ids| {
            ids.iter().copied().find(|id| {
                registry
                    .subscribers
                    .get(*id)
                    .is_some_and(|s| same_callback(&s.callback, &callback))
            })
        });

        let id = match existing {
            Some(id) => id,
            None => {
                let id = registry.subscribers.insert(Subscriber {
                    event: event.to_string(),
                    callback,
                });
                registry.events.entry(event.to_string()).or_default().push(id);
                id
            }
        };

        Subscription {
            registry: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Subscribe a closure to `event`
    pub fn subscribe<F>(&self, event: &str, callback: F) -> Subscription<M, E>
    where
        F: Fn(Option<&M>) -> Result<(), E> + 'static,
    {
        self.add(event, Rc::new(callback))
    }

    /// Deliver `message` to every subscriber of `event`
    ///
    /// Subscribers may add or remove subscriptions while being called: the
    /// subscriber list is captured when the dispatch starts, and subscribers
    /// removed during the dispatch are skipped.
    pub fn dispatch(&self, event: &str, message: Option<&M>) -> Result<(), E> {
        let ids: Vec<SubscriberId> = match self.inner.borrow().events.get(event) {
            Some(ids) => ids.clone(),
            None => return Ok(()),
        };

        for id in ids {
            let callback = match self.inner.borrow().subscribers.get(id) {
                Some(subscriber) => subscriber.callback.clone(),
                None => continue,
            };
            if let Err(err) = callback(message) {
                tracing::warn!(event, "event subscriber failed, aborting dispatch");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Number of subscribers currently registered for `event`
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.inner
            .borrow()
            .events
            .get(event)
            .map_or(0, |ids| ids.len())
    }
}

impl<M: 'static, E: 'static> Default for EventBus<M, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, E> Clone for EventBus<M, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<M, E> fmt::Debug for EventBus<M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("EventBus")
            .field("events", &registry.events.len())
            .field("subscribers", &registry.subscribers.len())
            .finish()
    }
}

/// Handle to a subscription
///
/// Dropping the handle leaves the subscription in place; call
/// [`Subscription::unsubscribe`] to remove it.
pub struct Subscription<M, E> {
    registry: Weak<RefCell<Registry<M, E>>>,
    id: SubscriberId,
}

impl<M, E> Subscription<M, E> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Check whether the subscription is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().subscribers.contains_key(self.id))
    }

    /// Remove the subscription, returning whether it was still registered
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

impl<M, E> fmt::Debug for Subscription<M, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

fn same_callback<M, E>(a: &Callback<M, E>, b: &Callback<M, E>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    type Bus = EventBus<u32, String>;

    fn counter() -> (Rc<Cell<u32>>, Callback<u32, String>) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        let callback: Callback<u32, String> = Rc::new(move |_: Option<&u32>| -> Result<(), String> {
            sink.set(sink.get() + 1);
            Ok(())
        });
        (count, callback)
    }

    #[test]
    fn test_dispatch_without_subscribers_is_a_no_op() {
        let bus = Bus::new();
        assert_eq!(bus.dispatch("no-such-event", None), Ok(()));
    }

    #[test]
    fn test_duplicate_add_delivers_once() {
        let bus = Bus::new();
        let (count, callback) = counter();

        let first = bus.add("tick", callback.clone());
        let second = bus.add("tick", callback);
        assert_eq!(first.id(), second.id());
        assert_eq!(bus.subscriber_count("tick"), 1);

        bus.dispatch("tick", None).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_same_callback_on_several_events() {
        let bus = Bus::new();
        let (count, callback) = counter();
        bus.add("a", callback.clone());
        bus.add("b", callback);

        bus.dispatch("a", None).unwrap();
        bus.dispatch("b", None).unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_message_is_optional() {
        let bus = Bus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        bus.subscribe("value", move |msg| {
            sink.borrow_mut().push(msg.copied());
            Ok(())
        });

        bus.dispatch("value", None).unwrap();
        bus.dispatch("value", Some(&7)).unwrap();
        assert_eq!(*seen.borrow(), vec![None, Some(7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = Bus::new();
        let (count, callback) = counter();
        let sub = bus.add("tick", callback);
        assert!(sub.is_active());

        bus.dispatch("tick", None).unwrap();
        assert!(sub.unsubscribe());
        bus.dispatch("tick", None).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(bus.subscriber_count("tick"), 0);
    }

    #[test]
    fn test_error_aborts_remaining_subscribers() {
        let bus = Bus::new();
        let calls = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let calls = calls.clone();
            bus.subscribe("fragile", move |_| {
                calls.set(calls.get() + 1);
                Err("boom".to_string())
            });
        }

        assert_eq!(bus.dispatch("fragile", None), Err("boom".to_string()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_subscriber_can_unsubscribe_during_dispatch() {
        let bus = Bus::new();
        let (count, callback) = counter();
        let victim = Rc::new(RefCell::new(None::<Subscription<u32, String>>));

        let slot = victim.clone();
        bus.subscribe("tick", move |_| {
            if let Some(sub) = slot.borrow_mut().take() {
                sub.unsubscribe();
            }
            Ok(())
        });
        *victim.borrow_mut() = Some(bus.add("tick", callback));

        bus.dispatch("tick", None).unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(bus.subscriber_count("tick"), 1);
    }

    #[test]
    fn test_subscription_outliving_bus() {
        let bus = Bus::new();
        let (_, callback) = counter();
        let sub = bus.add("tick", callback);
        drop(bus);
        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }
}
