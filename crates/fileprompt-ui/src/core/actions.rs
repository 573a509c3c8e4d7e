//! User intents emitted by the components.
//!
//! # Design
//! - Components emit typed payloads; ids and file names are never spliced into markup.
//! - Actions are UI-only and never perform side effects.

use crate::core::feedback::Control;

/// Actions on a rendered history card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    /// Load the entry's text into the result panel.
    Load(String),
    /// Delete the entry.
    Delete(String),
    /// Download one original file of the entry.
    Download {
        /// History entry id.
        id: String,
        /// Original file name.
        filename: String,
    },
}

/// Label flashed on a control after its action succeeds.
#[must_use]
pub const fn success_label(control: &Control) -> &'static str {
    match control {
        Control::Upload => "Success!",
        Control::Save => "Saved!",
        Control::Copy => "Copied!",
        Control::DeleteAll => "All Deleted!",
        Control::LoadItem(_) => "Loaded!",
        Control::DeleteItem(_) => "Deleted!",
    }
}

/// Resting label of a control.
#[must_use]
pub const fn resting_label(control: &Control) -> &'static str {
    match control {
        Control::Upload => "Upload",
        Control::Save => "Save",
        Control::Copy => "Copy",
        Control::DeleteAll => "Delete All",
        Control::LoadItem(_) => "Load",
        Control::DeleteItem(_) => "Delete",
    }
}
