//! Page-lifetime owner of every store.
//!
//! # Design
//! - One session per app boot, shared with the view layer by `Rc`.
//! - Each user action settles its own outcome: the initiating control flashes a
//!   success or failure label and failures also raise an error toast.
//! - Failures are logged where they occur and never escape as panics.

use crate::core::actions::success_label;
use crate::core::api::ConversionApi;
use crate::core::config::UiConfig;
use crate::core::errors::UiError;
use crate::core::events::{ChangeBus, SubscriptionId, Topic};
use crate::core::feedback::{Control, FeedbackBoard, FeedbackKind};
use crate::core::history::{HistoryStore, Refreshed};
use crate::core::result::{ConversionResult, ResultStore};
use crate::core::scheduler::Scheduler;
use crate::core::selection::{PendingFile, SelectionStore};
use crate::core::upload::UploadController;
use crate::core::view::{ButtonView, DropZoneRect, ViewCoordinator, ViewInputs, ViewState};
use std::collections::HashSet;
use std::future::Future;
use std::rc::Rc;
use tracing::{info, warn};

/// Stores, controller and feedback for one page.
pub struct Session<A: ConversionApi> {
    config: UiConfig,
    bus: ChangeBus,
    api: Rc<A>,
    selection: Rc<SelectionStore<A::Blob>>,
    result: Rc<ResultStore>,
    history: Rc<HistoryStore<A>>,
    upload: UploadController<A>,
    feedback: FeedbackBoard,
    view: ViewCoordinator,
}

impl<A: ConversionApi> Session<A> {
    /// Build the stores around `api`, reverting feedback through `scheduler`.
    pub fn new(config: UiConfig, api: A, scheduler: Rc<dyn Scheduler>) -> Self {
        let bus = ChangeBus::default();
        let api = Rc::new(api);
        let selection = Rc::new(SelectionStore::new(bus.clone()));
        let result = Rc::new(ResultStore::new(bus.clone()));
        let history = Rc::new(HistoryStore::new(
            Rc::clone(&api),
            Rc::clone(&result),
            bus.clone(),
        ));
        let upload = UploadController::new(
            Rc::clone(&api),
            Rc::clone(&selection),
            Rc::clone(&result),
            Rc::clone(&history),
        );
        let feedback = FeedbackBoard::new(
            scheduler,
            config.button_feedback_ms,
            config.toast_ms,
            bus.clone(),
        );
        let view = ViewCoordinator::new(bus.clone());
        Self {
            config,
            bus,
            api,
            selection,
            result,
            history,
            upload,
            feedback,
            view,
        }
    }

    /// Pending selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionStore<A::Blob> {
        &self.selection
    }

    /// Result panel state.
    #[must_use]
    pub fn result(&self) -> &ResultStore {
        &self.result
    }

    /// History cache.
    #[must_use]
    pub fn history(&self) -> &HistoryStore<A> {
        &self.history
    }

    /// Upload and save controller.
    #[must_use]
    pub const fn upload(&self) -> &UploadController<A> {
        &self.upload
    }

    /// Feedback timers.
    #[must_use]
    pub const fn feedback(&self) -> &FeedbackBoard {
        &self.feedback
    }

    /// Drag-hover owner.
    #[must_use]
    pub const fn view(&self) -> &ViewCoordinator {
        &self.view
    }

    /// Backend client.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Register a change listener.
    pub fn subscribe(&self, listener: impl Fn(Topic) + 'static) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    /// Remove a change listener.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.bus.unsubscribe(id);
    }

    /// Affordances derived from the current stores.
    #[must_use]
    pub fn view_state(&self) -> ViewState {
        ViewState::derive(ViewInputs {
            has_files: !self.selection.is_empty(),
            result_visible: self.result.is_visible(),
            drag_active: self.view.drag_active(),
            confirm_open: self.history.is_dialog_open(),
        })
    }

    /// Rendered state of `control` given its resting label and enablement.
    #[must_use]
    pub fn button(&self, control: &Control, resting_label: &str, enabled: bool) -> ButtonView {
        ButtonView::from_phase(resting_label, enabled, &self.feedback.phase(control))
    }

    /// Add picked or dropped files.
    pub fn add_files(&self, files: impl IntoIterator<Item = PendingFile<A::Blob>>) {
        self.selection.add(files);
    }

    /// Remove one file from the selection.
    pub fn remove_file(&self, name: &str) {
        self.selection.remove(name);
    }

    /// Clear the selection, hide the result and reset the file input.
    pub fn reset(&self) {
        self.selection.clear();
        self.result.clear();
        info!("selection and result reset");
    }

    /// Handle `dragover` on the drop zone.
    pub fn drag_over(&self) {
        self.view.drag_over();
    }

    /// Handle `dragleave` on the drop zone.
    pub fn drag_leave(&self, zone: DropZoneRect, x: f64, y: f64) {
        self.view.drag_leave(zone, x, y);
    }

    /// Handle `drop` on the drop zone.
    pub fn drop_files(&self, files: impl IntoIterator<Item = PendingFile<A::Blob>>) {
        self.view.dropped();
        self.selection.add(files);
    }

    /// Convert the selection and show the text.
    ///
    /// # Errors
    /// Returns [`UiError::NoFiles`] or [`UiError::UploadFailed`]; both were already
    /// surfaced as feedback.
    pub async fn convert(&self) -> Result<ConversionResult, UiError> {
        let outcome = self.upload.convert().await;
        self.settle(&Control::Upload, outcome.as_ref().map(|_| ()));
        outcome
    }

    /// Save the selection as a history entry.
    ///
    /// # Errors
    /// Returns [`UiError::NoFiles`] or [`UiError::SaveFailed`]; both were already
    /// surfaced as feedback.
    pub async fn save(&self) -> Result<(), UiError> {
        let outcome = self.upload.persist().await;
        self.settle_mutation(&Control::Save, outcome)
    }

    /// Re-fetch the history list.
    ///
    /// # Errors
    /// Returns [`UiError::HistoryLoadFailed`]; the stale list stays visible.
    pub async fn refresh_history(&self) -> Result<usize, UiError> {
        let outcome = self.history.refresh().await.map(|entries| entries.len());
        self.after_refresh(outcome.as_ref().map(|_| ()));
        outcome
    }

    /// Load a history entry into the result panel.
    ///
    /// # Errors
    /// Returns [`UiError::ItemLoadFailed`]; the result panel is untouched.
    pub async fn load_item(&self, id: &str) -> Result<ConversionResult, UiError> {
        let outcome = self.history.load_item(id).await;
        self.settle(
            &Control::LoadItem(id.to_string()),
            outcome.as_ref().map(|_| ()),
        );
        outcome
    }

    /// Delete a history entry.
    ///
    /// # Errors
    /// Returns [`UiError::ItemDeleteFailed`].
    pub async fn delete_item(&self, id: &str) -> Result<(), UiError> {
        let outcome = self.history.delete_item(id).await;
        self.settle_mutation(&Control::DeleteItem(id.to_string()), outcome)
    }

    /// Open the delete-all confirmation.
    pub fn request_delete_all(&self) {
        self.history.open_delete_all_dialog();
    }

    /// Dismiss the delete-all confirmation.
    pub fn cancel_delete_all(&self) {
        self.history.close_delete_all_dialog();
    }

    /// Delete every history entry.
    ///
    /// # Errors
    /// Returns [`UiError::DeleteAllFailed`]; the confirmation stays open.
    pub async fn delete_all(&self) -> Result<(), UiError> {
        let outcome = self.history.delete_all().await;
        self.settle_mutation(&Control::DeleteAll, outcome)
    }

    /// Copy the result text through `write` (the async clipboard API in browsers).
    ///
    /// # Errors
    /// Returns [`UiError::Clipboard`] when there is nothing to copy or `write` fails.
    pub async fn copy_result<F, Fut>(&self, write: F) -> Result<(), UiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<(), String>>,
    {
        let outcome = match self.result.snapshot() {
            result if !result.visible || result.content.is_empty() => {
                Err(UiError::Clipboard("nothing to copy".to_string()))
            }
            result => write(result.content).await.map_err(UiError::Clipboard),
        };
        if let Err(err) = &outcome {
            warn!(error = %err, category = err.category().as_str(), "copy failed");
        }
        self.settle(&Control::Copy, outcome.as_ref().map(|_| ()));
        outcome
    }

    /// Fetch one original file and hand it to `save` (a blob download in browsers).
    ///
    /// # Errors
    /// Returns [`UiError::DownloadFailed`] or [`UiError::Browser`]; surfaced as a toast.
    pub async fn download<F>(&self, id: &str, filename: &str, save: F) -> Result<(), UiError>
    where
        F: FnOnce(&str, Vec<u8>) -> Result<(), String>,
    {
        let outcome = match self.api.download(id, filename).await {
            Ok(bytes) => save(filename, bytes).map_err(UiError::Browser),
            Err(err) => Err(UiError::DownloadFailed(err)),
        };
        if let Err(err) = &outcome {
            warn!(id, filename, error = %err, category = err.category().as_str(), "download failed");
            self.feedback.notify(err.to_string(), FeedbackKind::Error);
        }
        outcome
    }

    fn settle(&self, control: &Control, outcome: Result<(), &UiError>) {
        match outcome {
            Ok(()) => {
                self.feedback
                    .flash(control, success_label(control), FeedbackKind::Success);
            }
            Err(err) => {
                self.feedback
                    .flash(control, err.short_label(), FeedbackKind::Error);
                self.feedback.notify(err.to_string(), FeedbackKind::Error);
            }
        }
    }

    fn settle_mutation(
        &self,
        control: &Control,
        outcome: Result<Refreshed, UiError>,
    ) -> Result<(), UiError> {
        match outcome {
            Ok(refreshed) => {
                self.settle(control, Ok(()));
                self.after_refresh(refreshed.outcome.as_ref().map(|_| ()));
                Ok(())
            }
            Err(err) => {
                self.settle(control, Err(&err));
                Err(err)
            }
        }
    }

    fn after_refresh(&self, outcome: Result<(), &UiError>) {
        match outcome {
            Ok(()) => {
                let entries = self.history.entries();
                let live: HashSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
                self.feedback.prune_items(&live);
            }
            Err(err) => {
                self.feedback
                    .flash(&Control::DeleteAll, err.short_label(), FeedbackKind::Error);
                self.feedback.notify(err.to_string(), FeedbackKind::Error);
            }
        }
    }
}

impl<A: ConversionApi> std::fmt::Debug for Session<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("selected", &self.selection.len())
            .field("history", &self.history)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}
