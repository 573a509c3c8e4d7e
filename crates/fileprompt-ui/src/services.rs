//! HTTP client for the conversion backend.

pub mod api;
