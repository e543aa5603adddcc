//! Capture mode: the keyboard hub, the capture session handle, and the
//! Idle/Capturing controller.
//!
//! [`KeyboardHub`] is the registry of the capturing key listener.  At most
//! one may be registered at a time.  It routes nothing itself: the window
//! forwards key-down events to [`HotkeyCapture::handle_key`] while a
//! session is registered, ahead of every widget.
//!
//! [`CaptureSession`] is the registration of that listener.  It is not
//! `Clone`; [`CaptureSession::detach`] consumes it, and dropping it (e.g.
//! when the window goes away) detaches as well.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use super::{build_combo, KeyEvent};
use crate::page::SettingsPage;

pub const CAPTURE_PROMPT: &str = "Testing... Press your key combo. Press Esc or Stop to exit.";
pub const CAPTURE_STOPPED: &str = "Hotkey capture stopped";

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// Another capturing listener is already attached to the hub.
    #[error("a capturing key listener is already attached")]
    AlreadyAttached,
}

// ---------------------------------------------------------------------------
// KeyboardHub
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct HubState {
    capturing: Option<u64>,
    next_id: u64,
    attached_total: usize,
    detached_total: usize,
}

/// Registry holding at most one capturing listener.
///
/// Cheap to clone; all clones share the same registration state.
#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    state: Arc<Mutex<HubState>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Attach the capturing listener.
    ///
    /// Fails with [`CaptureError::AlreadyAttached`] if one is live.
    pub fn attach_capturing(&self) -> Result<CaptureSession, CaptureError> {
        let mut st = self.state();
        if st.capturing.is_some() {
            return Err(CaptureError::AlreadyAttached);
        }
        st.next_id += 1;
        let id = st.next_id;
        st.capturing = Some(id);
        st.attached_total += 1;
        log::debug!(
            "keyboard hub: capturing listener {id} attached ({} so far)",
            st.attached_total
        );

        Ok(CaptureSession {
            id,
            hub: self.clone(),
        })
    }

    fn detach(&self, id: u64) {
        let mut st = self.state();
        if st.capturing == Some(id) {
            st.capturing = None;
            st.detached_total += 1;
            log::debug!(
                "keyboard hub: capturing listener {id} detached ({} so far)",
                st.detached_total
            );
        }
    }

    /// Whether key events are currently intercepted.
    pub fn is_capturing(&self) -> bool {
        self.state().capturing.is_some()
    }

    /// Number of live listeners (0 or 1).
    #[cfg(test)]
    pub fn listener_count(&self) -> usize {
        usize::from(self.state().capturing.is_some())
    }

    /// Total attaches since the hub was created.
    #[cfg(test)]
    pub fn attach_count(&self) -> usize {
        self.state().attached_total
    }

    /// Total detaches since the hub was created.
    #[cfg(test)]
    pub fn detach_count(&self) -> usize {
        self.state().detached_total
    }
}

// ---------------------------------------------------------------------------
// CaptureSession
// ---------------------------------------------------------------------------

/// Owned registration of the capturing listener.
#[derive(Debug)]
pub struct CaptureSession {
    id: u64,
    hub: KeyboardHub,
}

impl CaptureSession {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Detach the listener, ending the session.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.hub.detach(self.id);
    }
}

// ---------------------------------------------------------------------------
// HotkeyCapture
// ---------------------------------------------------------------------------

/// What happened to a key event routed through [`HotkeyCapture::handle_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Not capturing; the event goes to its normal handlers.
    NotCapturing,
    /// Escape ended capture mode.  The event is not consumed.
    Stopped,
    /// A combo was written into the hotkey field and the event consumed.
    /// The caller should validate the combo.
    Captured(String),
    /// Capturing, but the event produced no combo (bare modifier).
    Ignored,
}

impl CaptureOutcome {
    /// Whether the event's default handling is prevented.
    pub fn consumed(&self) -> bool {
        matches!(self, CaptureOutcome::Captured(_))
    }
}

/// Idle/Capturing state machine.
#[derive(Debug)]
pub struct HotkeyCapture {
    hub: KeyboardHub,
    session: Option<CaptureSession>,
}

impl HotkeyCapture {
    pub fn new(hub: KeyboardHub) -> Self {
        Self { hub, session: None }
    }

    pub fn is_capturing(&self) -> bool {
        self.session.is_some()
    }

    /// Idle → Capturing.  Returns `false` (and changes nothing) if already
    /// capturing or if the hub refuses the listener.
    pub fn start(&mut self, page: &mut SettingsPage) -> bool {
        if self.session.is_some() {
            return false;
        }
        let session = match self.hub.attach_capturing() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Cannot start hotkey capture: {e}");
                return false;
            }
        };
        self.session = Some(session);

        let c = &mut page.controls;
        c.stop_hotkey.hidden = false;
        c.test_hotkey.enabled = false;
        c.test_hotkey.pressed = true;
        c.save.enabled = false;
        page.status.info(CAPTURE_PROMPT);

        log::info!("Hotkey capture started");
        true
    }

    /// Capturing → Idle.  Returns the status generation of the
    /// confirmation message so the caller can clear it later, or `None` if
    /// already idle.
    ///
    /// Save stays disabled while a save is in flight (`form.busy`); the
    /// save flow re-enables it when it finishes.
    pub fn stop(&mut self, page: &mut SettingsPage) -> Option<u64> {
        let session = self.session.take()?;
        session.detach();

        let c = &mut page.controls;
        c.stop_hotkey.hidden = true;
        c.test_hotkey.enabled = true;
        c.test_hotkey.pressed = false;
        c.save.enabled = !page.form.busy;

        log::info!("Hotkey capture stopped");
        Some(page.status.info(CAPTURE_STOPPED))
    }

    /// Route one key-down event through the capturing listener.
    pub fn handle_key(&mut self, event: &KeyEvent, page: &mut SettingsPage) -> CaptureOutcome {
        if self.session.is_none() {
            return CaptureOutcome::NotCapturing;
        }
        if event.is_escape() {
            self.stop(page);
            return CaptureOutcome::Stopped;
        }
        match build_combo(event) {
            Some(combo) => {
                page.form.hotkey = combo.clone();
                page.status.info(format!("Captured: {combo}"));
                log::debug!("Captured hotkey combo {combo}");
                CaptureOutcome::Captured(combo)
            }
            None => CaptureOutcome::Ignored,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::Modifiers;

    fn setup() -> (KeyboardHub, HotkeyCapture, SettingsPage) {
        let hub = KeyboardHub::new();
        let capture = HotkeyCapture::new(hub.clone());
        (hub, capture, SettingsPage::default())
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn start_twice_attaches_one_listener() {
        let (hub, mut capture, mut page) = setup();

        assert!(capture.start(&mut page));
        assert!(!capture.start(&mut page));

        assert_eq!(hub.listener_count(), 1);
        assert_eq!(hub.attach_count(), 1);
    }

    #[test]
    fn stop_twice_detaches_once() {
        let (hub, mut capture, mut page) = setup();
        capture.start(&mut page);

        assert!(capture.stop(&mut page).is_some());
        assert!(capture.stop(&mut page).is_none());

        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.detach_count(), 1);
    }

    #[test]
    fn stop_while_idle_changes_nothing() {
        let (hub, mut capture, mut page) = setup();
        let before = page.clone();

        assert!(capture.stop(&mut page).is_none());
        assert_eq!(page, before);
        assert_eq!(hub.detach_count(), 0);
    }

    #[test]
    fn start_updates_controls_and_status() {
        let (_hub, mut capture, mut page) = setup();
        capture.start(&mut page);

        assert!(!page.controls.stop_hotkey.hidden);
        assert!(!page.controls.test_hotkey.enabled);
        assert!(page.controls.test_hotkey.pressed);
        assert!(!page.controls.save.enabled);
        assert_eq!(page.status.text(), CAPTURE_PROMPT);
    }

    #[test]
    fn stop_restores_controls() {
        let (_hub, mut capture, mut page) = setup();
        capture.start(&mut page);
        capture.stop(&mut page);

        assert!(page.controls.stop_hotkey.hidden);
        assert!(page.controls.test_hotkey.enabled);
        assert!(!page.controls.test_hotkey.pressed);
        assert!(page.controls.save.enabled);
        assert_eq!(page.status.text(), CAPTURE_STOPPED);
    }

    #[test]
    fn stop_during_save_keeps_save_disabled() {
        let (_hub, mut capture, mut page) = setup();
        page.form.busy = true;
        page.controls.save.enabled = false;

        capture.start(&mut page);
        capture.stop(&mut page);

        assert!(!page.controls.save.enabled);
        assert!(page.controls.test_hotkey.enabled);
    }

    #[test]
    fn ctrl_k_is_written_into_hotkey_field() {
        let (_hub, mut capture, mut page) = setup();
        capture.start(&mut page);

        let first = capture.handle_key(&KeyEvent::new("Control", ctrl()), &mut page);
        assert_eq!(first, CaptureOutcome::Ignored);
        assert!(!first.consumed());

        let second = capture.handle_key(&KeyEvent::new("k", ctrl()), &mut page);
        assert_eq!(second, CaptureOutcome::Captured("ctrl+k".into()));
        assert!(second.consumed());
        assert_eq!(page.form.hotkey, "ctrl+k");
        assert_eq!(page.status.text(), "Captured: ctrl+k");
    }

    #[test]
    fn bare_shift_writes_nothing() {
        let (_hub, mut capture, mut page) = setup();
        page.form.hotkey = "f9".into();
        capture.start(&mut page);

        let shift = Modifiers {
            shift: true,
            ..Modifiers::NONE
        };
        let out = capture.handle_key(&KeyEvent::new("Shift", shift), &mut page);

        assert_eq!(out, CaptureOutcome::Ignored);
        assert_eq!(page.form.hotkey, "f9");
        assert_eq!(page.status.text(), CAPTURE_PROMPT);
    }

    #[test]
    fn escape_stops_capture() {
        let (hub, mut capture, mut page) = setup();
        capture.start(&mut page);

        let out = capture.handle_key(&KeyEvent::new("Escape", Modifiers::NONE), &mut page);

        assert_eq!(out, CaptureOutcome::Stopped);
        assert!(!capture.is_capturing());
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(page.status.text(), CAPTURE_STOPPED);
    }

    #[test]
    fn keys_pass_through_when_idle() {
        let (_hub, mut capture, mut page) = setup();
        let out = capture.handle_key(&KeyEvent::new("k", ctrl()), &mut page);
        assert_eq!(out, CaptureOutcome::NotCapturing);
        assert!(page.form.hotkey.is_empty());
    }

    #[test]
    fn hub_refuses_second_listener() {
        let hub = KeyboardHub::new();
        let _session = hub.attach_capturing().unwrap();
        assert_eq!(
            hub.attach_capturing().unwrap_err(),
            CaptureError::AlreadyAttached
        );
    }

    #[test]
    fn second_controller_on_same_hub_cannot_start() {
        let hub = KeyboardHub::new();
        let mut a = HotkeyCapture::new(hub.clone());
        let mut b = HotkeyCapture::new(hub.clone());
        let mut page = SettingsPage::default();

        assert!(a.start(&mut page));
        assert!(!b.start(&mut page));
        assert_eq!(hub.attach_count(), 1);
    }

    #[test]
    fn dropping_controller_detaches_listener() {
        let (hub, mut capture, mut page) = setup();
        capture.start(&mut page);
        drop(capture);

        assert!(!hub.is_capturing());
        assert_eq!(hub.detach_count(), 1);
    }
}
