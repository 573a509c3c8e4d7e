//! Error taxonomy for the conversion UI.
//!
//! # Design
//! - [`ApiError`] describes what went wrong on the wire.
//! - [`UiError`] names the user action that failed and wraps the transport cause.
//! - Every failure is caught by the action that issued it; nothing bubbles to a
//!   global handler.

use fileprompt_api_models::ErrorBody;
use thiserror::Error;

/// Transport-level failure talking to the conversion backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be assembled (form data, headers).
    #[error("request could not be built: {0}")]
    Request(String),
    /// Fetch or transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-2xx status.
    #[error("http {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },
    /// A 2xx response carried a body that could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code for HTTP failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build a [`ApiError::Status`] from a failed response.
    ///
    /// Prefers the JSON `detail` field, then the raw body, then the status text.
    #[must_use]
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        let body = body.trim();
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.detail.is_empty() => parsed.detail,
            _ if !body.is_empty() => body.to_string(),
            _ => status_text.to_string(),
        };
        Self::Status { status, message }
    }
}

/// Coarse failure classes used to pick notification copy and log fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected locally before any network call.
    LocalValidation,
    /// Transport, request-building or decoding failure.
    Network,
    /// Non-2xx HTTP response.
    HttpStatus,
    /// Clipboard API failure.
    Clipboard,
    /// Other browser API failure (blob download, DOM).
    Browser,
}

impl ErrorCategory {
    /// Stable label for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalValidation => "local_validation",
            Self::Network => "network",
            Self::HttpStatus => "http_status",
            Self::Clipboard => "clipboard",
            Self::Browser => "browser",
        }
    }
}

/// Failure of a user-initiated action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    /// Upload or save was requested with an empty selection.
    #[error("no files selected")]
    NoFiles,
    /// Conversion request failed.
    #[error("upload failed: {0}")]
    UploadFailed(#[source] ApiError),
    /// Persisting the selection into history failed.
    #[error("save failed: {0}")]
    SaveFailed(#[source] ApiError),
    /// Fetching the history list failed.
    #[error("history could not be loaded: {0}")]
    HistoryLoadFailed(#[source] ApiError),
    /// Fetching a single history entry failed.
    #[error("history entry could not be loaded: {0}")]
    ItemLoadFailed(#[source] ApiError),
    /// Deleting a single history entry failed.
    #[error("history entry could not be deleted: {0}")]
    ItemDeleteFailed(#[source] ApiError),
    /// Deleting every history entry failed.
    #[error("history could not be cleared: {0}")]
    DeleteAllFailed(#[source] ApiError),
    /// Fetching an original file failed.
    #[error("download failed: {0}")]
    DownloadFailed(#[source] ApiError),
    /// Copying the result to the clipboard failed.
    #[error("copy failed: {0}")]
    Clipboard(String),
    /// Handing a downloaded file to the browser failed.
    #[error("file could not be saved: {0}")]
    Browser(String),
}

impl UiError {
    /// Transport cause, when the failure came from the backend.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::UploadFailed(err)
            | Self::SaveFailed(err)
            | Self::HistoryLoadFailed(err)
            | Self::ItemLoadFailed(err)
            | Self::ItemDeleteFailed(err)
            | Self::DeleteAllFailed(err)
            | Self::DownloadFailed(err) => Some(err),
            Self::NoFiles | Self::Clipboard(_) | Self::Browser(_) => None,
        }
    }

    /// Failure class of this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NoFiles => ErrorCategory::LocalValidation,
            Self::Clipboard(_) => ErrorCategory::Clipboard,
            Self::Browser(_) => ErrorCategory::Browser,
            _ => match self.api_error() {
                Some(ApiError::Status { .. }) => ErrorCategory::HttpStatus,
                _ => ErrorCategory::Network,
            },
        }
    }

    /// Short label shown on the control that triggered the action.
    #[must_use]
    pub const fn short_label(&self) -> &'static str {
        match self {
            Self::NoFiles => "No files!",
            Self::HistoryLoadFailed(_) => "Load Failed!",
            _ => "Failed!",
        }
    }
}
