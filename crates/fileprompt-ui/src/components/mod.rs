//! Yew components for the conversion page.
pub(crate) mod confirm_dialog;
pub(crate) mod drop_zone;
pub(crate) mod feedback_button;
pub(crate) mod history_list;
pub(crate) mod result_panel;
pub(crate) mod toast;
