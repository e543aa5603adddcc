//! Error kinds surfaced by the settings controller.
//!
//! Neither is fatal: every failure leaves the page editable and can be
//! retried by repeating the user action.

use thiserror::Error;

use crate::api::ApiError;

/// Fetching the configuration failed.  The form keeps its last state.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("failed to load configuration: {0}")]
    Fetch(#[from] ApiError),
}

/// Saving the configuration failed or was not attempted.
#[derive(Debug, Clone, Error)]
pub enum SaveError {
    /// Client-side guard: nothing was sent.
    #[error("hotkey cannot be empty")]
    EmptyHotkey,

    /// The save control is disabled (a save is in flight, or capture mode
    /// is active).  Nothing was sent.
    #[error("save is not available right now")]
    Unavailable,

    /// The server answered `ok: false`.
    #[error("server rejected configuration: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    /// The request itself failed.
    #[error("save request failed: {0}")]
    Transport(#[from] ApiError),
}
