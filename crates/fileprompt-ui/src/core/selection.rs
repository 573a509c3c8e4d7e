//! Pending file selection.
//!
//! # Design
//! - Files are keyed by name; re-adding a name replaces the earlier file in place.
//! - The store is generic over the blob handle so the browser `File` never leaks
//!   into code that must run natively.
//! - Clearing bumps an input generation the view watches to reset the file input.

use crate::core::events::{ChangeBus, Topic};
use std::cell::{Cell, RefCell};
use tracing::debug;

/// A file chosen for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingFile<B> {
    name: String,
    size: u64,
    blob: B,
}

impl<B> PendingFile<B> {
    /// Wrap a blob with its display name and size in bytes.
    pub fn new(name: impl Into<String>, size: u64, blob: B) -> Self {
        Self {
            name: name.into(),
            size,
            blob,
        }
    }

    /// File name; unique within a selection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Underlying blob handle.
    #[must_use]
    pub const fn blob(&self) -> &B {
        &self.blob
    }
}

/// Files chosen for the next upload or save.
#[derive(Debug)]
pub struct SelectionStore<B> {
    files: RefCell<Vec<PendingFile<B>>>,
    input_generation: Cell<u64>,
    bus: ChangeBus,
}

impl<B: Clone> SelectionStore<B> {
    /// Create an empty selection publishing to `bus`.
    #[must_use]
    pub fn new(bus: ChangeBus) -> Self {
        Self {
            files: RefCell::new(Vec::new()),
            input_generation: Cell::new(0),
            bus,
        }
    }

    /// Add files, replacing any existing entry with the same name.
    pub fn add(&self, incoming: impl IntoIterator<Item = PendingFile<B>>) {
        let mut added = 0usize;
        {
            let mut files = self.files.borrow_mut();
            for file in incoming {
                added += 1;
                if let Some(existing) = files.iter_mut().find(|existing| existing.name == file.name)
                {
                    *existing = file;
                } else {
                    files.push(file);
                }
            }
        }
        if added > 0 {
            debug!(added, total = self.len(), "selection updated");
            self.bus.publish(Topic::Selection);
        }
    }

    /// Remove the file named `name`; absent names are ignored.
    pub fn remove(&self, name: &str) -> bool {
        let removed = {
            let mut files = self.files.borrow_mut();
            files
                .iter()
                .position(|file| file.name == name)
                .map(|index| files.remove(index))
                .is_some()
        };
        if removed {
            debug!(name, "file removed from selection");
            self.bus.publish(Topic::Selection);
        }
        removed
    }

    /// Empty the selection and request a file-input reset.
    pub fn clear(&self) {
        self.files.borrow_mut().clear();
        self.input_generation
            .set(self.input_generation.get().wrapping_add(1));
        self.bus.publish(Topic::Selection);
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }

    /// Number of selected files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    /// Whether `name` is selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.files.borrow().iter().any(|file| file.name == name)
    }

    /// Selected names in display order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.files
            .borrow()
            .iter()
            .map(|file| file.name.clone())
            .collect()
    }

    /// Snapshot of the selection in display order.
    #[must_use]
    pub fn files(&self) -> Vec<PendingFile<B>> {
        self.files.borrow().clone()
    }

    /// Combined size of every selected file.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files
            .borrow()
            .iter()
            .fold(0u64, |total, file| total.saturating_add(file.size))
    }

    /// Counter bumped by every [`SelectionStore::clear`].
    #[must_use]
    pub fn input_generation(&self) -> u64 {
        self.input_generation.get()
    }
}
