//! Hotkey capture and live validation.
//!
//! # Design
//!
//! Capture mode intercepts key presses to build a combo string instead of
//! letting them reach the form.  [`HotkeyCapture::start`] registers the one
//! capturing listener with the [`KeyboardHub`] and keeps the returned
//! [`CaptureSession`]; the window hands key-down events to
//! [`HotkeyCapture::handle_key`] while it is held.  Stopping
//! consumes the session, which detaches the listener.  Idle vs. Capturing is
//! therefore "session held or not", never a free-floating flag.
//!
//! [`LiveValidator`] asks the config server whether the typed or captured
//! combo is valid, debouncing keystrokes in the hotkey field.
//!
//! # Usage
//!
//! ```no_run
//! use hotkey_settings::hotkey::{HotkeyCapture, KeyEvent, KeyboardHub, Modifiers};
//! use hotkey_settings::page::SettingsPage;
//!
//! let hub = KeyboardHub::new();
//! let mut capture = HotkeyCapture::new(hub.clone());
//! let mut page = SettingsPage::default();
//!
//! capture.start(&mut page);
//! let ctrl = Modifiers { ctrl: true, ..Modifiers::NONE };
//! capture.handle_key(&KeyEvent::new("k", ctrl), &mut page);
//! assert_eq!(page.form.hotkey, "ctrl+k");
//! ```

pub mod capture;
pub mod combo;
pub mod live;

pub use capture::{CaptureError, CaptureOutcome, CaptureSession, HotkeyCapture, KeyboardHub};
pub use combo::{build_combo, key_token, modifier_tokens};
pub use live::LiveValidator;

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier flags held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Command (macOS) / Super / Windows key.
    pub meta: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        meta: false,
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub fn is_empty(&self) -> bool {
        !self.meta && !self.ctrl && !self.alt && !self.shift
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key-down event as delivered to the capturing listener.
///
/// `key` follows the web `KeyboardEvent.key` naming: printable keys as the
/// character (`"k"`, `" "`), others by name (`"Escape"`, `"F9"`,
/// `"Shift"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
