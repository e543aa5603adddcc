//! Status line and hotkey error display.
//!
//! Both are single-slot: the most recent writer wins, nothing is queued.

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Colour cue of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Error,
}

// ---------------------------------------------------------------------------
// StatusLine
// ---------------------------------------------------------------------------

/// The page's status text.
///
/// Every write bumps a generation counter so a delayed clear can tell
/// whether the message it meant to clear is still the one shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    text: String,
    tone: Tone,
    generation: u64,
}

impl StatusLine {
    /// Show `msg` in the normal tone.
    pub fn info(&mut self, msg: impl Into<String>) -> u64 {
        self.set(msg, Tone::Normal)
    }

    /// Show `msg` in the error tone.
    pub fn error(&mut self, msg: impl Into<String>) -> u64 {
        self.set(msg, Tone::Error)
    }

    /// Overwrite the slot; returns the new generation.
    pub fn set(&mut self, msg: impl Into<String>, tone: Tone) -> u64 {
        self.text = msg.into();
        self.tone = tone;
        self.generation += 1;
        self.generation
    }

    pub fn clear(&mut self) {
        self.set(String::new(), Tone::Normal);
    }

    /// Clear only if nothing was written since generation `generation`.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.clear();
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// HotkeyErrorDisplay
// ---------------------------------------------------------------------------

/// Live-region role announced by assistive technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiveRole {
    /// Polite announcement.
    #[default]
    Status,
    /// Assertive announcement.
    Alert,
}

/// Inline verdict shown under the hotkey field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyErrorDisplay {
    pub text: String,
    /// Error styling applied.
    pub error: bool,
    pub role: LiveRole,
}

impl HotkeyErrorDisplay {
    pub fn clear(&mut self) {
        self.text.clear();
        self.error = false;
        self.role = LiveRole::Status;
    }

    /// Show an affirming message.
    pub fn accept(&mut self, msg: impl Into<String>) {
        self.text = msg.into();
        self.error = false;
        self.role = LiveRole::Status;
    }

    /// Show a rejection message.
    pub fn reject(&mut self, msg: impl Into<String>) {
        self.text = msg.into();
        self.error = true;
        self.role = LiveRole::Alert;
    }
}
