//! Config server API for the settings window.
//!
//! This module provides:
//! * [`ConfigApi`] — async trait for the four server calls.
//! * [`HttpConfigApi`] — `reqwest` implementation.
//! * [`Configuration`] / [`ConfigPayload`] — the edited configuration and
//!   its lenient wire form.
//! * [`SaveResponse`] / [`ValidateResponse`] / [`BeepResponse`] — response
//!   bodies.
//! * [`ApiError`] — transport, status and decode failures.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use hotkey_settings::api::{ConfigApi, HttpConfigApi};
//! use hotkey_settings::config::ServerSettings;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = HttpConfigApi::from_settings(&ServerSettings::default());
//!
//!     let payload = api.fetch_config().await.unwrap();
//!     println!("current hotkey: {:?}", payload.hotkey);
//!
//!     let verdict = api.validate_hotkey("ctrl+space").await.unwrap();
//!     println!("valid: {:?}", verdict.valid);
//! }
//! ```

pub mod client;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{ApiError, ConfigApi, HttpConfigApi};
pub use types::{
    BeepResponse, ConfigPayload, Configuration, Language, ModelSize, SaveResponse,
    ValidateResponse,
};

// test-only re-export so controller tests can use the scripted API without
// reaching into `client`.
#[cfg(test)]
pub use client::{MockCalls, MockConfigApi};
