//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot, shared through the session.
//! - Every non-2xx status becomes [`ApiError::Status`] with the server's `detail`
//!   (or the raw body) as message.

use crate::core::api::ConversionApi;
use crate::core::config::UiConfig;
use crate::core::errors::ApiError;
use crate::core::selection::PendingFile;
use async_trait::async_trait;
use fileprompt_api_models::{
    DATA_PATH, DeleteAck, FILES_FIELD, HISTORY_PATH, HistoryEntry, HistoryItem, SAVE_PATH, SaveAck,
    UPLOAD_PATH, data_item_path, download_path,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

/// Browser fetch client for the conversion API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    config: UiConfig,
}

impl ApiClient {
    /// Create a client for `config.api_base_url` (empty for same origin).
    #[must_use]
    pub const fn new(config: UiConfig) -> Self {
        Self { config }
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(request: Request) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        if response.ok() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(
            response.status(),
            &response.status_text(),
            &body,
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::send(Request::get(&self.url(path)))
            .await?
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn delete(&self, path: &str) -> Result<Option<DeleteAck>, ApiError> {
        let response = Self::send(Request::delete(&self.url(path))).await?;
        Ok(response.json::<DeleteAck>().await.ok())
    }

    async fn post_files(&self, path: &str, files: &[PendingFile<File>]) -> Result<Response, ApiError> {
        let form = FormData::new().map_err(|err| ApiError::Request(format!("form-data: {err:?}")))?;
        for file in files {
            form.append_with_blob_and_filename(FILES_FIELD, file.blob(), file.name())
                .map_err(|err| ApiError::Request(format!("attach {}: {err:?}", file.name())))?;
        }
        Self::send(Request::post(&self.url(path)).body(form)).await
    }
}

#[async_trait(?Send)]
impl ConversionApi for ApiClient {
    type Blob = File;

    async fn upload(&self, files: &[PendingFile<File>]) -> Result<String, ApiError> {
        self.post_files(UPLOAD_PATH, files)
            .await?
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn save(&self, files: &[PendingFile<File>]) -> Result<Option<SaveAck>, ApiError> {
        let response = self.post_files(SAVE_PATH, files).await?;
        Ok(response.json::<SaveAck>().await.ok())
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.get_json(HISTORY_PATH).await
    }

    async fn item(&self, id: &str) -> Result<HistoryItem, ApiError> {
        self.get_json(&data_item_path(id)).await
    }

    async fn download(&self, id: &str, filename: &str) -> Result<Vec<u8>, ApiError> {
        Self::send(Request::get(&self.url(&download_path(id, filename))))
            .await?
            .binary()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn delete_item(&self, id: &str) -> Result<Option<DeleteAck>, ApiError> {
        self.delete(&data_item_path(id)).await
    }

    async fn delete_all(&self) -> Result<Option<DeleteAck>, ApiError> {
        self.delete(DATA_PATH).await
    }
}
