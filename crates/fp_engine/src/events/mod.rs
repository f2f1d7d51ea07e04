//! Input event routing
//!
//! Key principles:
//! - Registration system (only notify handlers interested in a kind)
//! - Synchronous delivery, in registration order, on the caller's tick
//! - Explicit deregistration through the id returned at registration
//!
//! The router uses interior mutability so a handler may call back into the
//! object that owns the router (for example to switch input modes) while it
//! is being dispatched.

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Discrete input notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Jump action performed
    JumpPressed,
    /// Jump action canceled (button released)
    JumpReleased,
    /// Run went from released to held
    ///
    /// Raised on the first Started or Performed edge of a press; the
    /// Performed that follows a Started for the same press raises nothing.
    RunStarted,
    /// Run action canceled
    RunCanceled,
    /// Menu/pause action performed
    MenuPressed,
    /// Interact action performed
    InteractPressed,
}

impl InputEvent {
    /// Every event kind, in declaration order
    pub const ALL: [InputEvent; 6] = [
        InputEvent::JumpPressed,
        InputEvent::JumpReleased,
        InputEvent::RunStarted,
        InputEvent::RunCanceled,
        InputEvent::MenuPressed,
        InputEvent::InteractPressed,
    ];
}

new_key_type! {
    /// Handle returned by [`EventRouter::subscribe`], needed to unsubscribe
    pub struct SubscriptionId;
}

/// Event handler trait
///
/// Implemented for every `FnMut(InputEvent)` closure.
pub trait EventHandler {
    /// Handle an event
    fn on_event(&mut self, event: InputEvent);
}

impl<F: FnMut(InputEvent)> EventHandler for F {
    fn on_event(&mut self, event: InputEvent) {
        self(event);
    }
}

type SharedHandler = Rc<RefCell<dyn EventHandler>>;

struct Registration {
    event: InputEvent,
    handler: SharedHandler,
}

/// Synchronous observer registry keyed by [`InputEvent`]
#[derive(Default)]
pub struct EventRouter {
    registrations: RefCell<SlotMap<SubscriptionId, Registration>>,
    order: RefCell<HashMap<InputEvent, Vec<SubscriptionId>>>,
}

impl EventRouter {
    /// Create a new empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a specific event kind
    pub fn subscribe<H>(&self, event: InputEvent, handler: H) -> SubscriptionId
    where
        H: EventHandler + 'static,
    {
        let handler: SharedHandler = Rc::new(RefCell::new(handler));
        let id = self.registrations.borrow_mut().insert(Registration { event, handler });
        self.order.borrow_mut().entry(event).or_default().push(id);
        id
    }

    /// Remove a handler; returns `false` if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let Some(registration) = self.registrations.borrow_mut().remove(id) else {
            return false;
        };
        if let Some(ids) = self.order.borrow_mut().get_mut(&registration.event) {
            ids.retain(|other| *other != id);
        }
        true
    }

    /// Deliver `event` to every handler registered for it, in registration order
    ///
    /// Returns how many handlers ran.
    pub fn dispatch(&self, event: InputEvent) -> usize {
        // Snapshot first so handlers can subscribe or unsubscribe while we iterate
        let snapshot: Vec<(SubscriptionId, SharedHandler)> = {
            let order = self.order.borrow();
            let registrations = self.registrations.borrow();
            order
                .get(&event)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| registrations.get(*id).map(|r| (*id, Rc::clone(&r.handler))))
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut delivered = 0;
        for (id, handler) in snapshot {
            // Unsubscribed by an earlier handler in this same dispatch
            if !self.registrations.borrow().contains_key(id) {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    handler.on_event(event);
                    delivered += 1;
                }
                Err(_) => {
                    log::warn!("[EventRouter] Skipping re-entrant delivery of {:?}", event);
                }
            }
        }
        delivered
    }

    /// Number of handlers registered for `event`
    pub fn subscriber_count(&self, event: InputEvent) -> usize {
        self.order.borrow().get(&event).map_or(0, Vec::len)
    }

    /// Whether no handler is registered at all
    pub fn is_empty(&self) -> bool {
        self.registrations.borrow().is_empty()
    }

    /// Drop every registration (used at teardown)
    pub fn clear(&self) {
        self.registrations.borrow_mut().clear();
        self.order.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_in_registration_order() {
        let router = EventRouter::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            router.subscribe(InputEvent::JumpPressed, move |_| log.borrow_mut().push(tag));
        }

        assert_eq!(router.dispatch(InputEvent::JumpPressed), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_interested_handlers_run() {
        let router = EventRouter::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        router.subscribe(InputEvent::MenuPressed, move |_| counter.set(counter.get() + 1));

        assert_eq!(router.dispatch(InputEvent::JumpPressed), 0);
        assert_eq!(hits.get(), 0);
        router.dispatch(InputEvent::MenuPressed);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let router = EventRouter::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = router.subscribe(InputEvent::RunStarted, move |_| counter.set(counter.get() + 1));

        assert!(router.unsubscribe(id));
        assert!(!router.unsubscribe(id));
        router.dispatch(InputEvent::RunStarted);
        assert_eq!(hits.get(), 0);
        assert_eq!(router.subscriber_count(InputEvent::RunStarted), 0);
    }

    #[test]
    fn test_handler_may_unsubscribe_later_handler() {
        let router = Rc::new(EventRouter::new());
        let hits = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None));

        let handle = Rc::clone(&router);
        let victim_slot = Rc::clone(&victim);
        router.subscribe(InputEvent::InteractPressed, move |_| {
            if let Some(id) = victim_slot.get() {
                handle.unsubscribe(id);
            }
        });
        let counter = Rc::clone(&hits);
        let id = router.subscribe(InputEvent::InteractPressed, move |_| counter.set(counter.get() + 1));
        victim.set(Some(id));

        assert_eq!(router.dispatch(InputEvent::InteractPressed), 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_clear_removes_everything() {
        let router = EventRouter::new();
        for event in InputEvent::ALL {
            router.subscribe(event, |_| {});
        }
        assert!(!router.is_empty());
        router.clear();
        assert!(router.is_empty());
        for event in InputEvent::ALL {
            assert_eq!(router.subscriber_count(event), 0);
        }
    }
}
