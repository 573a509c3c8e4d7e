//! Backend seam used by the controllers.
//!
//! # Design
//! - One method per endpoint; implementations only move bytes and map failures to
//!   [`ApiError`].
//! - Futures are `?Send`: everything runs on the single UI event loop.

use crate::core::errors::ApiError;
use crate::core::selection::PendingFile;
use async_trait::async_trait;
use fileprompt_api_models::{DeleteAck, HistoryEntry, HistoryItem, SaveAck};

/// HTTP contract of the conversion backend.
#[async_trait(?Send)]
pub trait ConversionApi {
    /// Blob handle carried by [`PendingFile`].
    type Blob: Clone + 'static;

    /// `POST /upload`; returns the converted text.
    async fn upload(&self, files: &[PendingFile<Self::Blob>]) -> Result<String, ApiError>;

    /// `POST /save`; creates one history entry.
    ///
    /// Any 2xx is a success; the acknowledgement is `None` when its body has an
    /// unexpected shape.
    async fn save(&self, files: &[PendingFile<Self::Blob>]) -> Result<Option<SaveAck>, ApiError>;

    /// `GET /history`.
    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// `GET /data/{id}`.
    async fn item(&self, id: &str) -> Result<HistoryItem, ApiError>;

    /// `GET /download/{id}/{filename}`; returns the raw bytes.
    async fn download(&self, id: &str, filename: &str) -> Result<Vec<u8>, ApiError>;

    /// `DELETE /data/{id}`; the acknowledgement is best effort like `save`.
    async fn delete_item(&self, id: &str) -> Result<Option<DeleteAck>, ApiError>;

    /// `DELETE /data`.
    async fn delete_all(&self) -> Result<Option<DeleteAck>, ApiError>;
}
