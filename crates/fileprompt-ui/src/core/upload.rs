//! Upload and save orchestration for the pending selection.
//!
//! # Design
//! - An empty selection is rejected before any request is built.
//! - Only success mutates state; a failed call leaves the result panel as it was.

use crate::core::api::ConversionApi;
use crate::core::errors::UiError;
use crate::core::history::{HistoryStore, Refreshed};
use crate::core::result::{ConversionResult, ResultStore};
use crate::core::selection::{PendingFile, SelectionStore};
use std::rc::Rc;
use tracing::{debug, warn};

/// Sends the selection to the conversion and save endpoints.
pub struct UploadController<A: ConversionApi> {
    api: Rc<A>,
    selection: Rc<SelectionStore<A::Blob>>,
    result: Rc<ResultStore>,
    history: Rc<HistoryStore<A>>,
}

impl<A: ConversionApi> UploadController<A> {
    /// Wire the controller to the session stores.
    #[must_use]
    pub const fn new(
        api: Rc<A>,
        selection: Rc<SelectionStore<A::Blob>>,
        result: Rc<ResultStore>,
        history: Rc<HistoryStore<A>>,
    ) -> Self {
        Self {
            api,
            selection,
            result,
            history,
        }
    }

    fn pending(&self) -> Result<Vec<PendingFile<A::Blob>>, UiError> {
        if self.selection.is_empty() {
            debug!("no files selected; request skipped");
            return Err(UiError::NoFiles);
        }
        Ok(self.selection.files())
    }

    /// Convert the selection; the response text becomes the visible result.
    ///
    /// # Errors
    /// Returns [`UiError::NoFiles`] without a request for an empty selection, or
    /// [`UiError::UploadFailed`] for transport and status failures.
    pub async fn convert(&self) -> Result<ConversionResult, UiError> {
        let files = self.pending()?;
        let text = self.api.upload(&files).await.map_err(|err| {
            let err = UiError::UploadFailed(err);
            warn!(files = files.len(), error = %err, category = err.category().as_str(), "conversion failed");
            err
        })?;
        debug!(files = files.len(), bytes = text.len(), "conversion succeeded");
        self.result.show(text);
        Ok(self.result.snapshot())
    }

    /// Persist the selection as a new history entry, then re-fetch the history.
    ///
    /// # Errors
    /// Returns [`UiError::NoFiles`] without a request for an empty selection, or
    /// [`UiError::SaveFailed`] for transport and status failures.
    pub async fn persist(&self) -> Result<Refreshed, UiError> {
        let files = self.pending()?;
        let ack = self.api.save(&files).await.map_err(|err| {
            let err = UiError::SaveFailed(err);
            warn!(files = files.len(), error = %err, category = err.category().as_str(), "save failed");
            err
        })?;
        match ack {
            Some(ack) => debug!(id = %ack.id, file_count = ack.file_count, "selection saved"),
            None => debug!(files = files.len(), "selection saved; acknowledgement not decoded"),
        }
        Ok(self.history.refreshed().await)
    }
}

impl<A: ConversionApi> std::fmt::Debug for UploadController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadController")
            .field("selected", &self.selection.len())
            .finish_non_exhaustive()
    }
}
