//! App-wide yewdux snapshot of the session.
//!
//! # Design
//! - The session owns the state; this store is a render snapshot rebuilt on every
//!   change notification so components can select slices with `use_selector`.
//! - Only plain data lives here: no blob handles, no timers.

use crate::core::actions::resting_label;
use crate::core::api::ConversionApi;
use crate::core::feedback::{Control, FeedbackDisplay, FeedbackPhase};
use crate::core::logic::{format_bytes, selection_summary};
use crate::core::result::ConversionResult;
use crate::core::session::Session;
use crate::core::view::{ButtonView, ViewState};
use fileprompt_api_models::HistoryEntry;
use std::collections::BTreeMap;
use yewdux::store::Store;

/// One selected file as shown in the drop zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileChip {
    /// File name (also the removal key).
    pub name: String,
    /// Human-readable size.
    pub size_label: String,
}

/// Render snapshot for the whole page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Store)]
pub struct AppStore {
    /// Selected files in display order.
    pub files: Vec<FileChip>,
    /// Count and size line for the selection.
    pub selection_summary: String,
    /// Bumped whenever the file input must be cleared.
    pub input_generation: u64,
    /// Result panel state.
    pub result: ConversionResult,
    /// History list in server order.
    pub history: Vec<HistoryEntry>,
    /// Derived affordances.
    pub view: ViewState,
    /// Active button feedback keyed by control.
    pub buttons: BTreeMap<Control, FeedbackDisplay>,
    /// Toast state.
    pub toast: FeedbackPhase,
}

impl AppStore {
    /// Build a snapshot from the live session.
    #[must_use]
    pub fn capture<A: ConversionApi>(session: &Session<A>) -> Self {
        let selection = session.selection();
        let files = selection
            .files()
            .iter()
            .map(|file| FileChip {
                name: file.name().to_string(),
                size_label: format_bytes(file.size()),
            })
            .collect::<Vec<_>>();
        Self {
            selection_summary: selection_summary(files.len(), selection.total_size()),
            files,
            input_generation: selection.input_generation(),
            result: session.result().snapshot(),
            history: session.history().entries(),
            view: session.view_state(),
            buttons: session.feedback().active_buttons(),
            toast: session.feedback().toast().phase(),
        }
    }

    /// Rendered state of `control`, enabled per `enabled` when no feedback is active.
    #[must_use]
    pub fn button(&self, control: &Control, enabled: bool) -> ButtonView {
        ButtonView::resolve(resting_label(control), enabled, self.buttons.get(control))
    }
}
