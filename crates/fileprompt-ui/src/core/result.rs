//! Converted text shown in the result panel.

use crate::core::events::{ChangeBus, Topic};
use std::cell::RefCell;

/// Converted text plus result panel visibility.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionResult {
    /// Converted text.
    pub content: String,
    /// Whether the result panel is shown.
    pub visible: bool,
}

/// Owner of the current [`ConversionResult`].
#[derive(Debug)]
pub struct ResultStore {
    state: RefCell<ConversionResult>,
    bus: ChangeBus,
}

impl ResultStore {
    /// Create a hidden, empty result.
    #[must_use]
    pub fn new(bus: ChangeBus) -> Self {
        Self {
            state: RefCell::new(ConversionResult::default()),
            bus,
        }
    }

    /// Replace the text and show the panel.
    pub fn show(&self, content: String) {
        *self.state.borrow_mut() = ConversionResult {
            content,
            visible: true,
        };
        self.bus.publish(Topic::Result);
    }

    /// Drop the text and hide the panel.
    pub fn clear(&self) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = *state != ConversionResult::default();
            *state = ConversionResult::default();
            changed
        };
        if changed {
            self.bus.publish(Topic::Result);
        }
    }

    /// Current result.
    #[must_use]
    pub fn snapshot(&self) -> ConversionResult {
        self.state.borrow().clone()
    }

    /// Whether the panel is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Current text.
    #[must_use]
    pub fn content(&self) -> String {
        self.state.borrow().content.clone()
    }
}
