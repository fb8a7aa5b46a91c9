//! # Auth Events
//!
//! Registry through which the HTTP layer announces authentication changes and
//! the application shell reacts to them. One registry is created at startup
//! and handed to whoever needs it; subscriptions end when their handle drops.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// A request came back 401; the stored session is no longer valid
    SessionExpired { message: String },
    LoggedIn,
    LoggedOut,
}

type Handler = Rc<dyn Fn(&AuthEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Cloneable handle to one shared registry
#[derive(Clone, Default)]
pub struct AuthEvents {
    registry: Rc<RefCell<Registry>>,
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; it stays registered while the returned
    /// [`Subscription`] is alive
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl Fn(&AuthEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Rc::new(handler)));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver `event` to every current subscriber in subscription order.
    /// Handlers may subscribe or unsubscribe while being called.
    pub fn emit(&self, event: &AuthEvent) {
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

impl PartialEq for AuthEvents {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEvents")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Keeps a handler registered; unsubscribes on drop
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_subscribers_in_order() {
        let events = AuthEvents::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let seen = seen.clone();
            events.subscribe(move |e| seen.borrow_mut().push(format!("first:{e:?}")))
        };
        let second = {
            let seen = seen.clone();
            events.subscribe(move |e| seen.borrow_mut().push(format!("second:{e:?}")))
        };

        events.emit(&AuthEvent::LoggedOut);
        assert_eq!(*seen.borrow(), vec!["first:LoggedOut", "second:LoggedOut"]);
        drop((first, second));
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let events = AuthEvents::new();
        let hits = Rc::new(RefCell::new(0));

        let subscription = {
            let hits = hits.clone();
            events.subscribe(move |_| *hits.borrow_mut() += 1)
        };
        events.emit(&AuthEvent::LoggedIn);
        drop(subscription);
        events.emit(&AuthEvent::LoggedIn);

        assert_eq!(*hits.borrow(), 1);
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_can_unsubscribe_during_emit() {
        let events = AuthEvents::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let subscription = {
            let slot = slot.clone();
            events.subscribe(move |_| {
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(subscription);

        events.emit(&AuthEvent::SessionExpired { message: "expirada".to_string() });
        assert_eq!(events.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_registry_is_harmless() {
        let events = AuthEvents::new();
        let subscription = events.subscribe(|_| {});
        drop(events);
        drop(subscription);
    }

    #[test]
    fn test_clones_share_registry() {
        let events = AuthEvents::new();
        let clone = events.clone();
        let _subscription = clone.subscribe(|_| {});
        assert_eq!(events.subscriber_count(), 1);
        assert_eq!(events, clone);
        assert_ne!(events, AuthEvents::new());
    }
}
