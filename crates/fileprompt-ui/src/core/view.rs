//! Derived view state and drag-and-drop interpretation.
//!
//! # Design
//! - Everything here is computed from the stores; the only owned state is the
//!   drag-hover flag.
//! - `dragleave` fires for every nested child; only a pointer on or beyond the
//!   drop zone's edges counts as leaving.

use crate::core::events::{ChangeBus, Topic};
use crate::core::feedback::{FeedbackDisplay, FeedbackPhase};
use std::cell::Cell;

/// Bounding rectangle of the drop zone in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropZoneRect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl DropZoneRect {
    /// Whether a pointer at (`x`, `y`) is on or outside the rectangle.
    #[must_use]
    pub fn is_outside(&self, x: f64, y: f64) -> bool {
        x <= self.left || x >= self.right || y <= self.top || y >= self.bottom
    }
}

/// What the drop zone renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropZoneMode {
    /// Drag prompt plus a select button.
    #[default]
    Prompt,
    /// Chip list of selected files; the select button stays available.
    FileList,
}

impl DropZoneMode {
    /// Label of the file-picker button shown in every mode.
    #[must_use]
    pub const fn select_label(self) -> &'static str {
        match self {
            Self::Prompt => "Select files",
            Self::FileList => "Add files",
        }
    }
}

/// Affordances derived from store state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Convert button enabled.
    pub upload_enabled: bool,
    /// Save button enabled.
    pub save_enabled: bool,
    /// Reset button enabled.
    pub reset_enabled: bool,
    /// Drop zone content.
    pub drop_zone: DropZoneMode,
    /// Result panel shown.
    pub result_visible: bool,
    /// Pointer is dragging over the drop zone.
    pub drag_active: bool,
    /// Delete-all confirmation shown.
    pub confirm_open: bool,
}

/// Inputs for [`ViewState::derive`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewInputs {
    /// Selection has at least one file.
    pub has_files: bool,
    /// Result panel currently shown.
    pub result_visible: bool,
    /// Drag-hover flag.
    pub drag_active: bool,
    /// Delete-all dialog open.
    pub confirm_open: bool,
}

impl ViewState {
    /// Compute affordances from store state.
    #[must_use]
    pub const fn derive(inputs: ViewInputs) -> Self {
        Self {
            upload_enabled: inputs.has_files,
            save_enabled: inputs.has_files,
            reset_enabled: inputs.has_files || inputs.result_visible,
            drop_zone: if inputs.has_files {
                DropZoneMode::FileList
            } else {
                DropZoneMode::Prompt
            },
            result_visible: inputs.result_visible,
            drag_active: inputs.drag_active,
            confirm_open: inputs.confirm_open,
        }
    }
}

/// Rendered state of a button that may be showing feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    /// Visible label.
    pub label: String,
    /// Extra CSS classes.
    pub class: &'static str,
    /// Disabled attribute.
    pub disabled: bool,
}

impl ButtonView {
    /// Resolve the label/style/disabled triple for a button.
    ///
    /// Active feedback replaces the label and always disables the button.
    #[must_use]
    pub fn resolve(resting_label: &str, enabled: bool, feedback: Option<&FeedbackDisplay>) -> Self {
        feedback.map_or_else(
            || Self {
                label: resting_label.to_string(),
                class: "",
                disabled: !enabled,
            },
            |display| Self {
                label: display.message.clone(),
                class: display.kind.class(),
                disabled: true,
            },
        )
    }

    /// Same as [`ButtonView::resolve`] for a timer phase.
    #[must_use]
    pub fn from_phase(resting_label: &str, enabled: bool, phase: &FeedbackPhase) -> Self {
        Self::resolve(resting_label, enabled, phase.display())
    }
}

/// Owner of the drag-hover flag.
#[derive(Debug)]
pub struct ViewCoordinator {
    drag_active: Cell<bool>,
    bus: ChangeBus,
}

impl ViewCoordinator {
    /// Create a coordinator with no drag in progress.
    #[must_use]
    pub fn new(bus: ChangeBus) -> Self {
        Self {
            drag_active: Cell::new(false),
            bus,
        }
    }

    /// Whether a drag is hovering the drop zone.
    #[must_use]
    pub fn drag_active(&self) -> bool {
        self.drag_active.get()
    }

    /// Handle `dragover`.
    pub fn drag_over(&self) {
        self.set_drag(true);
    }

    /// Handle `dragleave`; returns whether the hover flag was cleared.
    pub fn drag_leave(&self, zone: DropZoneRect, x: f64, y: f64) -> bool {
        if zone.is_outside(x, y) {
            self.set_drag(false);
            true
        } else {
            false
        }
    }

    /// Handle `drop`; the caller forwards the files to the selection.
    pub fn dropped(&self) {
        self.set_drag(false);
    }

    fn set_drag(&self, active: bool) {
        if self.drag_active.replace(active) != active {
            self.bus.publish(Topic::View);
        }
    }
}
