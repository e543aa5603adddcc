//! Wire types exchanged with the config server.
//!
//! [`Configuration`] is the edited speech configuration.  [`ConfigPayload`]
//! is the same shape as the server sends it, every field optional, so the
//! form binder can apply its own defaults for anything missing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Speech language, as an ISO-639-1 code.
///
/// The select offers a fixed list; a code the server holds that is not on
/// that list is kept as [`Language::Other`] so saving writes it back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Ja,
    En,
    Zh,
    Ko,
    De,
    Fr,
    Es,
    Other(String),
}

impl Language {
    /// Every language the select offers, in display order.
    pub const ALL: [Language; 7] = [
        Language::Ja,
        Language::En,
        Language::Zh,
        Language::Ko,
        Language::De,
        Language::Fr,
        Language::Es,
    ];

    /// The wire code (`"ja"`, `"en"`, …).
    pub fn code(&self) -> &str {
        match self {
            Language::Ja => "ja",
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ko => "ko",
            Language::De => "de",
            Language::Fr => "fr",
            Language::Es => "es",
            Language::Other(code) => code.as_str(),
        }
    }

    /// Human-readable name for the select; the bare code for
    /// [`Language::Other`].
    pub fn label(&self) -> &str {
        match self {
            Language::Ja => "Japanese",
            Language::En => "English",
            Language::Zh => "Chinese",
            Language::Ko => "Korean",
            Language::De => "German",
            Language::Fr => "French",
            Language::Es => "Spanish",
            Language::Other(code) => code.as_str(),
        }
    }

    /// Parse one of the offered codes, ignoring surrounding whitespace and
    /// case.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code))
    }

    /// Parse any code; one the select does not offer becomes
    /// [`Language::Other`] (trimmed, lowercased).
    pub fn parse(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| Language::Other(code.trim().to_lowercase()))
    }

    pub fn is_offered(&self) -> bool {
        !matches!(self, Language::Other(_))
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Ja
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::parse(&code)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

// ---------------------------------------------------------------------------
// ModelSize
// ---------------------------------------------------------------------------

/// Whisper model size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelSize {
    /// Every selectable size, smallest first.
    pub const ALL: [ModelSize; 5] = [
        ModelSize::Tiny,
        ModelSize::Base,
        ModelSize::Small,
        ModelSize::Medium,
        ModelSize::Large,
    ];

    /// The wire name (`"tiny"`, `"small"`, …).
    pub fn name(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    /// Parse a wire name, ignoring surrounding whitespace and case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

impl Default for ModelSize {
    fn default() -> Self {
        ModelSize::Small
    }
}

// ---------------------------------------------------------------------------
// Configuration / ConfigPayload
// ---------------------------------------------------------------------------

/// The speech configuration edited by the settings window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Combo string, e.g. `"ctrl+space"`.
    pub hotkey: String,
    pub language: Language,
    pub model: ModelSize,
    /// Play a beep when recording starts/stops.
    pub audio_feedback: bool,
}

/// A configuration as returned by `GET /api/config`.
///
/// Every field may be absent (or `null`); language and model are kept as
/// raw strings so an unknown value does not fail the whole load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPayload {
    #[serde(default)]
    pub hotkey: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub audio_feedback: Option<bool>,
}

impl From<&Configuration> for ConfigPayload {
    fn from(cfg: &Configuration) -> Self {
        Self {
            hotkey: Some(cfg.hotkey.clone()),
            language: Some(cfg.language.code().to_string()),
            model: Some(cfg.model.name().to_string()),
            audio_feedback: Some(cfg.audio_feedback),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body of the `POST /api/config` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub ok: bool,
    /// Server-provided reason when `ok` is false.
    #[serde(default)]
    pub error: Option<String>,
    /// Where the server wrote the configuration.
    #[serde(default)]
    pub path: Option<String>,
}

/// Body of the `POST /api/validate/hotkey` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Whether the validator itself ran; `false` means "no verdict".
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub valid: Option<bool>,
    /// Canonical form of the combo, when valid.
    #[serde(default)]
    pub normalized: Option<String>,
}

/// Body of the `POST /api/beep` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeepResponse {
    #[serde(default)]
    pub ok: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
