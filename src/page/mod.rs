//! Page model of the settings window.
//!
//! [`SettingsPage`] is the single source of truth for everything the window
//! renders: form values, status line, the inline hotkey verdict and button
//! state.  The controller mutates it; the egui update loop reads it each
//! frame.
//!
//! [`SharedPage`] is a type alias for `Arc<Mutex<SettingsPage>>`, cheap to
//! clone and safe to share with runtime tasks.

pub mod controls;
pub mod form;
pub mod status;

use std::sync::{Arc, Mutex};

pub use controls::{ButtonState, Controls};
pub use form::{fill_form, read_form, FormState};
pub use status::{HotkeyErrorDisplay, LiveRole, StatusLine, Tone};

// ---------------------------------------------------------------------------
// SettingsPage
// ---------------------------------------------------------------------------

/// Everything visible on the settings page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPage {
    pub form: FormState,
    pub status: StatusLine,
    /// Verdict of the live validator, under the hotkey field.
    pub hotkey_error: HotkeyErrorDisplay,
    pub controls: Controls,
}

// ---------------------------------------------------------------------------
// SharedPage
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`SettingsPage`].
///
/// Lock for a short critical section; do **not** hold the lock across
/// `.await` points.
pub type SharedPage = Arc<Mutex<SettingsPage>>;

/// Construct a new [`SharedPage`] wrapping a default page.
pub fn new_shared_page() -> SharedPage {
    Arc::new(Mutex::new(SettingsPage::default()))
}

/// Lock `page`, recovering the data if a previous holder panicked.
///
/// The page is plain display state, so a poisoned lock carries nothing
/// worth refusing.
pub fn lock_page(page: &SharedPage) -> std::sync::MutexGuard<'_, SettingsPage> {
    page.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
