//! Combo-string building from a single key-down event.
//!
//! A combo string is the lowercase, `+`-joined encoding of a hotkey, with
//! modifiers first in the fixed order `cmd`, `ctrl`, `alt`, `shift`:
//!
//! ```
//! use hotkey_settings::hotkey::{build_combo, KeyEvent, Modifiers};
//!
//! let ev = KeyEvent::new("K", Modifiers { ctrl: true, shift: true, ..Modifiers::NONE });
//! assert_eq!(build_combo(&ev).as_deref(), Some("ctrl+shift+k"));
//! ```

use super::{KeyEvent, Modifiers};

/// Key names (lowercased) that are modifiers themselves.  Pressing one adds
/// no token beyond its modifier flag.
const MODIFIER_KEYS: [&str; 4] = ["shift", "control", "alt", "meta"];

/// Modifier tokens for the held flags, in combo order.
pub fn modifier_tokens(mods: Modifiers) -> Vec<&'static str> {
    let mut parts = Vec::with_capacity(4);
    if mods.meta {
        parts.push("cmd");
    }
    if mods.ctrl {
        parts.push("ctrl");
    }
    if mods.alt {
        parts.push("alt");
    }
    if mods.shift {
        parts.push("shift");
    }
    parts
}

/// Normalised token for a key name: lowercased, `" "` becomes `space`.
///
/// Returns `None` for modifier keys and empty names.
pub fn key_token(key: &str) -> Option<String> {
    let token = if key == " " {
        "space".to_string()
    } else {
        key.to_lowercase()
    };
    if token.is_empty() || MODIFIER_KEYS.contains(&token.as_str()) {
        return None;
    }
    Some(token)
}

/// Build the combo string for `event`.
///
/// Returns `None` when the event has no non-modifier key (a bare Shift
/// press, say), so nothing is written for modifier-only presses.
pub fn build_combo(event: &KeyEvent) -> Option<String> {
    let key = key_token(&event.key)?;
    let mut parts: Vec<String> = modifier_tokens(event.modifiers)
        .into_iter()
        .map(str::to_string)
        .collect();
    parts.push(key);
    Some(parts.join("+"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
