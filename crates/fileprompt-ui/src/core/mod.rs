//! Core, DOM-free state and orchestration for the conversion UI.
pub mod actions;
pub mod api;
pub mod config;
pub mod errors;
pub mod events;
pub mod feedback;
pub mod history;
pub mod logic;
pub mod result;
pub mod scheduler;
pub mod selection;
pub mod session;
pub mod store;
pub mod upload;
pub mod view;
