//! Change notifications shared by the session stores.
//!
//! # Design
//! - One bus per session; every store publishes the slice it changed.
//! - Subscribers are cloned out before dispatch so callbacks may subscribe,
//!   unsubscribe or read any store without tripping a `RefCell` borrow.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Slice of session state that changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Pending file selection.
    Selection,
    /// Conversion result text or panel visibility.
    Result,
    /// Cached history list or the delete-all dialog.
    History,
    /// A feedback cycle started or reverted.
    Feedback,
    /// Drag-hover flag on the drop zone.
    View,
}

/// Handle returned by [`ChangeBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(Topic)>;

/// Observer list for session changes.
#[derive(Clone, Default)]
pub struct ChangeBus {
    listeners: Rc<RefCell<Vec<(SubscriptionId, Listener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl ChangeBus {
    /// Register a listener invoked for every published topic.
    pub fn subscribe(&self, listener: impl Fn(Topic) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener; unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Notify every listener that `topic` changed.
    pub fn publish(&self, topic: Topic) {
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(topic);
        }
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
