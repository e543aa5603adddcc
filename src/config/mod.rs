//! Configuration module for the settings window.
//!
//! Provides `ClientSettings` (top-level settings), its sections, `AppPaths`
//! for the cross-platform config directory, and TOML persistence via
//! `ClientSettings::load` / `ClientSettings::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{ClientSettings, ServerSettings, UiSettings, ValidationSettings};
