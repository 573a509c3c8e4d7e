//! Cached mirror of the server-side conversion history.
//!
//! # Design
//! - The server list is the source of truth: mutations re-fetch instead of splicing.
//! - A refresh replaces the cache in one assignment; whichever refresh resolves last
//!   wins, and a failed refresh keeps the previous list on screen.
//! - Mutations report the follow-up refresh separately so a successful delete is
//!   never shown as failed because the re-fetch broke.

use crate::core::api::ConversionApi;
use crate::core::errors::UiError;
use crate::core::events::{ChangeBus, Topic};
use crate::core::result::{ConversionResult, ResultStore};
use fileprompt_api_models::{DeleteAck, HistoryEntry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, warn};

/// Result of the refresh that follows a successful mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Refreshed {
    /// Number of entries listed, or why the re-fetch failed.
    pub outcome: Result<usize, UiError>,
}

/// History list cache plus the delete-all confirmation dialog flag.
pub struct HistoryStore<A: ConversionApi> {
    api: Rc<A>,
    result: Rc<ResultStore>,
    entries: RefCell<Vec<HistoryEntry>>,
    dialog_open: Cell<bool>,
    bus: ChangeBus,
}

impl<A: ConversionApi> HistoryStore<A> {
    /// Create an empty cache backed by `api`.
    #[must_use]
    pub fn new(api: Rc<A>, result: Rc<ResultStore>, bus: ChangeBus) -> Self {
        Self {
            api,
            result,
            entries: RefCell::new(Vec::new()),
            dialog_open: Cell::new(false),
            bus,
        }
    }

    /// Cached entries in server order.
    #[must_use]
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.borrow().clone()
    }

    /// Whether the delete-all confirmation is open.
    #[must_use]
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open.get()
    }

    /// Show the delete-all confirmation.
    pub fn open_delete_all_dialog(&self) {
        self.set_dialog(true);
    }

    /// Hide the delete-all confirmation.
    pub fn close_delete_all_dialog(&self) {
        self.set_dialog(false);
    }

    fn set_dialog(&self, open: bool) {
        if self.dialog_open.replace(open) != open {
            self.bus.publish(Topic::History);
        }
    }

    /// Re-fetch the list and replace the cache.
    ///
    /// # Errors
    /// Returns [`UiError::HistoryLoadFailed`]; the previous list stays cached.
    pub async fn refresh(&self) -> Result<Vec<HistoryEntry>, UiError> {
        match self.api.history().await {
            Ok(entries) => {
                debug!(count = entries.len(), "history refreshed");
                *self.entries.borrow_mut() = entries.clone();
                self.bus.publish(Topic::History);
                Ok(entries)
            }
            Err(err) => {
                let err = UiError::HistoryLoadFailed(err);
                warn!(error = %err, category = err.category().as_str(), "history refresh failed");
                Err(err)
            }
        }
    }

    /// Load one entry's text into the result panel.
    ///
    /// # Errors
    /// Returns [`UiError::ItemLoadFailed`]; the result panel is left untouched.
    pub async fn load_item(&self, id: &str) -> Result<ConversionResult, UiError> {
        let item = self.api.item(id).await.map_err(|err| {
            let err = UiError::ItemLoadFailed(err);
            warn!(id, error = %err, category = err.category().as_str(), "history entry load failed");
            err
        })?;
        self.result.show(item.content);
        Ok(self.result.snapshot())
    }

    /// Delete one entry, then re-fetch the list.
    ///
    /// # Errors
    /// Returns [`UiError::ItemDeleteFailed`] when the delete itself fails; no
    /// refresh is issued in that case.
    pub async fn delete_item(&self, id: &str) -> Result<Refreshed, UiError> {
        let ack = self.api.delete_item(id).await.map_err(|err| {
            let err = UiError::ItemDeleteFailed(err);
            warn!(id, error = %err, category = err.category().as_str(), "history entry delete failed");
            err
        })?;
        debug!(id, message = ack_message(ack.as_ref()), "history entry deleted");
        Ok(self.refreshed().await)
    }

    /// Delete every entry, re-fetch the list and close the confirmation dialog.
    ///
    /// # Errors
    /// Returns [`UiError::DeleteAllFailed`]; the dialog stays open for a retry.
    pub async fn delete_all(&self) -> Result<Refreshed, UiError> {
        let ack = self.api.delete_all().await.map_err(|err| {
            let err = UiError::DeleteAllFailed(err);
            warn!(error = %err, category = err.category().as_str(), "history delete-all failed");
            err
        })?;
        debug!(message = ack_message(ack.as_ref()), "history cleared");
        let refreshed = self.refreshed().await;
        self.close_delete_all_dialog();
        Ok(refreshed)
    }

    pub(crate) async fn refreshed(&self) -> Refreshed {
        Refreshed {
            outcome: self.refresh().await.map(|entries| entries.len()),
        }
    }
}

fn ack_message(ack: Option<&DeleteAck>) -> &str {
    ack.map_or("", |ack| ack.message.as_str())
}

impl<A: ConversionApi> std::fmt::Debug for HistoryStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries.borrow().len())
            .field("dialog_open", &self.dialog_open.get())
            .finish_non_exhaustive()
    }
}
