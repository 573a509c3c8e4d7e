//! Configuration overrides persisted in browser storage.

use crate::core::config::{ConfigOverrides, UiConfig};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

pub(crate) const API_BASE_URL_KEY: &str = "fileprompt.api_base_url";
pub(crate) const FEEDBACK_MS_KEY: &str = "fileprompt.feedback_ms";
pub(crate) const TOAST_MS_KEY: &str = "fileprompt.toast_ms";
pub(crate) const LOG_LEVEL_KEY: &str = "fileprompt.log_level";

/// Load the effective configuration, falling back to defaults on invalid overrides.
pub(crate) fn load_config() -> UiConfig {
    let overrides = ConfigOverrides {
        api_base_url: read(API_BASE_URL_KEY),
        button_feedback_ms: read(FEEDBACK_MS_KEY),
        toast_ms: read(TOAST_MS_KEY),
        log_level: read(LOG_LEVEL_KEY),
    };
    UiConfig::from_overrides(&overrides).unwrap_or_else(|err| {
        console::error!("invalid stored configuration; using defaults", err.to_string());
        UiConfig::default()
    })
}

/// Raw string value; stored overrides are plain text, not JSON.
fn read(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten()
}
