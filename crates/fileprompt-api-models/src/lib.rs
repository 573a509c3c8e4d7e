#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the fileprompt conversion API.
//!
//! The conversion backend owns these records; the UI only reads them. Path
//! builders live here too so every client addresses the endpoints the same way.
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Multipart field name repeated once per uploaded file.
pub const FILES_FIELD: &str = "files";

/// Conversion endpoint; the response body is the converted text.
pub const UPLOAD_PATH: &str = "/upload";
/// Persist endpoint; creates one history entry.
pub const SAVE_PATH: &str = "/save";
/// History listing endpoint.
pub const HISTORY_PATH: &str = "/history";
/// Collection endpoint for stored conversions (DELETE removes everything).
pub const DATA_PATH: &str = "/data";

/// Summary of one stored conversion as listed by `GET /history`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Opaque identifier assigned by the server.
    pub id: String,
    /// Creation time as reported by the server.
    pub timestamp: Timestamp,
    /// Names of the files that were converted, in upload order.
    pub original_files: Vec<String>,
    /// Number of files in the entry; expected to match `original_files.len()`.
    pub file_count: usize,
}

/// Full stored conversion returned by `GET /data/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    /// Converted text.
    pub content: String,
    /// Summary fields, when the server includes them.
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<HistoryEntry>,
}

/// Acknowledgement returned by `POST /save`.
pub type SaveAck = HistoryEntry;

/// Acknowledgement returned by the delete endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAck {
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: String,
}

/// Error payload of failed requests (`{"detail": "..."}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Failure description.
    #[serde(default)]
    pub detail: String,
}

/// Server timestamp that tolerates both offset-carrying and naive ISO-8601 values.
///
/// The backend emits local naive timestamps (`2024-05-01T10:20:30.123456`); RFC 3339
/// values are accepted as well.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Timestamp(pub String);

impl Timestamp {
    /// Parse the raw value, interpreting naive timestamps as local time.
    #[must_use]
    pub fn parse(&self) -> Option<DateTime<FixedOffset>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(parsed);
        }
        let naive = NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        naive
            .and_local_timezone(Local)
            .earliest()
            .map(|local| local.fixed_offset())
    }

    /// Render as `YYYY-MM-DD HH:MM:SS` in local time, falling back to the raw value.
    #[must_use]
    pub fn display(&self) -> String {
        self.parse().map_or_else(
            || self.0.clone(),
            |parsed| {
                parsed
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        )
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Path for a single stored conversion (`GET`/`DELETE /data/{id}`).
#[must_use]
pub fn data_item_path(id: &str) -> String {
    format!("{DATA_PATH}/{}", urlencoding::encode(id))
}

/// Path for downloading one original file of a stored conversion.
#[must_use]
pub fn download_path(id: &str, filename: &str) -> String {
    format!(
        "/download/{}/{}",
        urlencoding::encode(id),
        urlencoding::encode(filename)
    )
}
