//! Client settings structs, defaults and TOML persistence.
//!
//! These are the settings of the settings window itself (where the config
//! server lives, how long to wait for it, UI timings), not the speech
//! configuration it edits.  That one is owned by the server.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// ServerSettings
// ---------------------------------------------------------------------------

/// Where the config server listens and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the config server, e.g. `http://127.0.0.1:8765`.
    ///
    /// Endpoint paths (`/api/config`, …) are joined onto it; a trailing
    /// slash is tolerated.
    pub base_url: String,
    /// Maximum seconds to wait for any single request.
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8765".into(),
            timeout_secs: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationSettings
// ---------------------------------------------------------------------------

/// Live hotkey validation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Quiet period after the last edit of the hotkey field before the
    /// validator is called.
    pub debounce_ms: u64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self { debounce_ms: 150 }
    }
}

// ---------------------------------------------------------------------------
// UiSettings
// ---------------------------------------------------------------------------

/// Settings window appearance and timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    /// How long transient confirmations (e.g. "Hotkey capture stopped")
    /// stay in the status line.
    pub status_clear_ms: u64,
    /// Initial inner size of the window `(width, height)`.
    pub window_size: (f32, f32),
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            status_clear_ms: 1000,
            window_size: (420.0, 320.0),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientSettings  (top-level)
// ---------------------------------------------------------------------------

/// Top-level client settings, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use hotkey_settings::config::ClientSettings;
///
/// // Load (returns Default when file is missing)
/// let settings = ClientSettings::load().unwrap();
///
/// // Modify and save
/// // settings.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Config server connection.
    #[serde(default)]
    pub server: ServerSettings,
    /// Live validation timing.
    #[serde(default)]
    pub validation: ValidationSettings,
    /// Window settings.
    #[serde(default)]
    pub ui: UiSettings,
}

impl ClientSettings {
    /// Load settings from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(ClientSettings::default())` when the file does not exist
    /// yet, so callers never need to special-case a first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to the platform-appropriate `settings.toml`, creating
    /// parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
