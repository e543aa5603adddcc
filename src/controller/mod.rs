//! Settings controller — drives load, save, reset, beep and hotkey capture.
//!
//! [`SettingsController`] owns the [`SharedPage`] and the [`ConfigApi`] and
//! reacts to user actions forwarded by the window.
//!
//! # Flows
//!
//! ```text
//! startup        └─▶ fetch → fill form              (fail: "Failed to load configuration")
//! save           └─▶ guard empty hotkey → busy, save disabled → post
//!                      ├─ ok        → "Saved!"
//!                      ├─ ok:false  → server error or "Save failed"
//!                      └─ transport → "Save failed"
//!                    → not busy, save enabled
//! reset          └─▶ fetch → fill form → "Reset to current values" → validate now
//! hotkey input   └─▶ debounced validation
//! key (capture)  └─▶ combo into field → validate now   |  Esc → stop
//! ```
//!
//! All network calls are async; the page lock is never held across an
//! `.await`.

pub mod error;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;

use crate::api::ConfigApi;
use crate::config::ClientSettings;
use crate::hotkey::{CaptureOutcome, HotkeyCapture, KeyEvent, KeyboardHub, LiveValidator};
use crate::page::{fill_form, lock_page, read_form, SharedPage};

pub use error::{LoadError, SaveError};

pub const LOAD_FAILED: &str = "Failed to load configuration";
pub const RELOAD_FAILED: &str = "Failed to reload configuration";
pub const RESET_DONE: &str = "Reset to current values";
pub const EMPTY_HOTKEY: &str = "Hotkey cannot be empty";
pub const SAVING: &str = "Saving...";
pub const SAVED: &str = "Saved!";
pub const SAVE_FAILED: &str = "Save failed";

// ---------------------------------------------------------------------------
// SettingsController
// ---------------------------------------------------------------------------

/// Reacts to the settings window's user actions.
///
/// Cheap to clone; clones share the page, the capture state and the
/// validator's debounce slot.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use hotkey_settings::api::HttpConfigApi;
/// use hotkey_settings::config::ClientSettings;
/// use hotkey_settings::controller::SettingsController;
/// use hotkey_settings::hotkey::KeyboardHub;
/// use hotkey_settings::page::new_shared_page;
///
/// # async fn example() {
/// let settings = ClientSettings::default();
/// let api = Arc::new(HttpConfigApi::from_settings(&settings.server));
/// let controller = SettingsController::new(
///     api,
///     new_shared_page(),
///     KeyboardHub::new(),
///     &settings,
///     tokio::runtime::Handle::current(),
/// );
/// let _ = controller.load().await;
/// # }
/// ```
#[derive(Clone)]
pub struct SettingsController {
    api: Arc<dyn ConfigApi>,
    page: SharedPage,
    capture: Arc<Mutex<HotkeyCapture>>,
    validator: LiveValidator,
    runtime: Handle,
    status_clear: Duration,
}

impl SettingsController {
    /// Create a controller.
    ///
    /// # Arguments
    ///
    /// * `api`      — config server client.
    /// * `page`     — page model, also read by the window.
    /// * `hub`      — keyboard hub where capture attaches its listener.
    /// * `settings` — debounce and status-clear timings.
    /// * `runtime`  — where timers and background requests are spawned.
    pub fn new(
        api: Arc<dyn ConfigApi>,
        page: SharedPage,
        hub: KeyboardHub,
        settings: &ClientSettings,
        runtime: Handle,
    ) -> Self {
        let validator = LiveValidator::new(
            Arc::clone(&api),
            Arc::clone(&page),
            runtime.clone(),
            Duration::from_millis(settings.validation.debounce_ms),
        );

        Self {
            api,
            page,
            capture: Arc::new(Mutex::new(HotkeyCapture::new(hub))),
            validator,
            runtime,
            status_clear: Duration::from_millis(settings.ui.status_clear_ms),
        }
    }

    pub fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }

    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    // Lock order: capture before page.
    fn capture(&self) -> MutexGuard<'_, HotkeyCapture> {
        self.capture.lock().unwrap_or_else(|p| p.into_inner())
    }

    // ── Config I/O ─────────────────────────────────────────────────────────

    /// Fetch the configuration and fill the form (startup).
    pub async fn load(&self) -> Result<(), LoadError> {
        match self.api.fetch_config().await {
            Ok(payload) => {
                fill_form(&mut lock_page(&self.page).form, &payload);
                log::info!("Configuration loaded");
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to load configuration: {e}");
                lock_page(&self.page).status.error(LOAD_FAILED);
                Err(LoadError::from(e))
            }
        }
    }

    /// Submit the form.
    ///
    /// An empty hotkey is rejected without a network call.  The form is
    /// busy and the save control disabled for the duration; a save
    /// requested meanwhile returns [`SaveError::Unavailable`].
    pub async fn save(&self) -> Result<(), SaveError> {
        let cfg = {
            let mut page = lock_page(&self.page);
            if page.form.hotkey.trim().is_empty() {
                page.status.error(EMPTY_HOTKEY);
                return Err(SaveError::EmptyHotkey);
            }
            if page.form.busy || !page.controls.save.enabled {
                log::debug!("Save ignored: a save is running or capture is active");
                return Err(SaveError::Unavailable);
            }
            page.form.busy = true;
            page.controls.save.enabled = false;
            page.status.info(SAVING);
            read_form(&page.form)
        };

        let result = self.api.post_config(&cfg).await;

        let capturing = self.is_capturing();
        let mut page = lock_page(&self.page);
        let outcome = match result {
            Ok(resp) if resp.ok => {
                log::info!(
                    "Configuration saved{}",
                    resp.path.map(|p| format!(" to {p}")).unwrap_or_default()
                );
                page.status.info(SAVED);
                Ok(())
            }
            Ok(resp) => {
                let msg = resp
                    .error
                    .clone()
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| SAVE_FAILED.to_string());
                log::warn!("Server rejected configuration: {msg}");
                page.status.error(msg);
                Err(SaveError::Rejected(resp.error))
            }
            Err(e) => {
                log::warn!("Save request failed: {e}");
                page.status.error(SAVE_FAILED);
                Err(SaveError::Transport(e))
            }
        };

        page.form.busy = false;
        // Capture mode keeps save disabled until it ends.
        if !capturing {
            page.controls.save.enabled = true;
        }
        outcome
    }

    /// Re-fetch the configuration, discarding unsaved edits, then validate
    /// the restored hotkey.
    pub async fn reset(&self) -> Result<(), LoadError> {
        let payload = match self.api.fetch_config().await {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Failed to reload configuration: {e}");
                lock_page(&self.page).status.error(RELOAD_FAILED);
                return Err(LoadError::from(e));
            }
        };

        let hotkey = {
            let mut page = lock_page(&self.page);
            fill_form(&mut page.form, &payload);
            page.status.info(RESET_DONE);
            page.form.hotkey.trim().to_string()
        };

        self.validator.validate_now(&hotkey).await;
        Ok(())
    }

    /// Ask the server to play the feedback beep.  Failures are ignored.
    pub async fn beep(&self) {
        match self.api.beep().await {
            Ok(resp) if resp.ok => log::debug!("Beep played"),
            Ok(_) => log::debug!("Beep preview failed: server answered ok=false"),
            Err(e) => log::debug!("Beep preview failed: {e}"),
        }
    }

    // ── Hotkey field ───────────────────────────────────────────────────────

    /// The hotkey field was edited: store the value and schedule debounced
    /// validation.
    pub fn on_hotkey_input(&self, value: &str) {
        lock_page(&self.page).form.hotkey = value.to_string();
        self.validator.schedule(value);
    }

    // ── Capture mode ───────────────────────────────────────────────────────

    pub fn is_capturing(&self) -> bool {
        self.capture().is_capturing()
    }

    /// Enter capture mode.  No-op (returns `false`) if already capturing.
    pub fn start_capture(&self) -> bool {
        let mut capture = self.capture();
        let mut page = lock_page(&self.page);
        capture.start(&mut page)
    }

    /// Leave capture mode.  No-op (returns `false`) if idle.
    pub fn stop_capture(&self) -> bool {
        let generation = {
            let mut capture = self.capture();
            let mut page = lock_page(&self.page);
            capture.stop(&mut page)
        };
        match generation {
            Some(g) => {
                self.schedule_status_clear(g);
                true
            }
            None => false,
        }
    }

    /// Route a key-down event through the capturing listener, if attached.
    ///
    /// Returns `true` when the event was consumed and must not reach any
    /// other handler.
    pub fn dispatch_key(&self, event: &KeyEvent) -> bool {
        let (outcome, generation) = {
            let mut capture = self.capture();
            let mut page = lock_page(&self.page);
            let outcome = capture.handle_key(event, &mut page);
            (outcome, page.status.generation())
        };

        match &outcome {
            CaptureOutcome::Captured(combo) => {
                let validator = self.validator.clone();
                let combo = combo.clone();
                self.runtime
                    .spawn(async move { validator.validate_now(&combo).await });
            }
            CaptureOutcome::Stopped => self.schedule_status_clear(generation),
            CaptureOutcome::NotCapturing | CaptureOutcome::Ignored => {}
        }
        outcome.consumed()
    }

    /// Clear the status after the configured delay, unless something newer
    /// has been written meanwhile.
    fn schedule_status_clear(&self, generation: u64) {
        let page = Arc::clone(&self.page);
        let delay = self.status_clear;
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock_page(&page).status.clear_if_current(generation);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
