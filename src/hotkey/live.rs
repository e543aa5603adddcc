//! Live hotkey validation against the config server.
//!
//! [`LiveValidator`] is a best-effort hint: the verdict is rendered under
//! the hotkey field, and any failure (transport, decode, `ok:false`) is
//! swallowed with a debug log.  Nothing here blocks saving.
//!
//! Debouncing uses a single timer slot.  Each [`LiveValidator::schedule`]
//! aborts the pending quiet period and starts a new one.  Once a quiet
//! period has elapsed the request runs detached, so a later keystroke does
//! not cancel an in-flight request.  Responses are not sequenced: a slow
//! earlier request can land after a faster later one.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::{ConfigApi, ValidateResponse};
use crate::page::{lock_page, SettingsPage, SharedPage};

pub const INVALID_HOTKEY: &str = "Invalid hotkey";

/// Debounced validator for the hotkey field.
#[derive(Clone)]
pub struct LiveValidator {
    api: Arc<dyn ConfigApi>,
    page: SharedPage,
    runtime: Handle,
    debounce: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl LiveValidator {
    /// Create a validator that spawns its timers on `runtime`.
    pub fn new(api: Arc<dyn ConfigApi>, page: SharedPage, runtime: Handle, debounce: Duration) -> Self {
        Self {
            api,
            page,
            runtime,
            debounce,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Validate `value` (trimmed) once the field has been quiet for the
    /// debounce period, cancelling any earlier pending call.
    pub fn schedule(&self, value: &str) {
        let value = value.trim().to_string();
        let this = self.clone();
        let delay = self.debounce;

        // Held across the spawn so concurrent calls fill the slot in call order.
        let mut slot = self.pending.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let runner = this.clone();
            this.runtime.spawn(async move { runner.validate_now(&value).await });
        }));
    }

    /// Validate `value` (trimmed) right away.
    pub async fn validate_now(&self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            clear(&mut lock_page(&self.page));
            return;
        }

        match self.api.validate_hotkey(value).await {
            Ok(response) => apply_verdict(&mut lock_page(&self.page), value, &response),
            Err(e) => log::debug!("Hotkey validation failed for {value:?}: {e}"),
        }
    }
}

/// Empty input: no verdict, no invalid marking.
fn clear(page: &mut SettingsPage) {
    page.hotkey_error.clear();
    page.form.hotkey_invalid = false;
}

/// Render a validator response into the page.
///
/// `ok:false` means the validator gave no verdict; the page is left alone.
pub fn apply_verdict(page: &mut SettingsPage, value: &str, response: &ValidateResponse) {
    if !response.ok {
        log::debug!("Validator returned no verdict for {value:?}");
        return;
    }
    if response.valid.unwrap_or(false) {
        let shown = response
            .normalized
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(value);
        page.hotkey_error.accept(format!("OK: {shown}"));
        page.form.hotkey_invalid = false;
    } else {
        page.hotkey_error.reject(INVALID_HOTKEY);
        page.form.hotkey_invalid = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConfigPayload, MockConfigApi};
    use crate::page::{new_shared_page, LiveRole};

    fn make(api: Arc<MockConfigApi>) -> (LiveValidator, SharedPage) {
        let page = new_shared_page();
        let v = LiveValidator::new(
            api,
            Arc::clone(&page),
            Handle::current(),
            Duration::from_millis(150),
        );
        (v, page)
    }

    #[test]
    fn invalid_verdict_marks_input() {
        let mut page = SettingsPage::default();
        let resp = ValidateResponse {
            ok: true,
            valid: Some(false),
            normalized: None,
        };
        apply_verdict(&mut page, "ctrl+", &resp);

        assert_eq!(page.hotkey_error.text, INVALID_HOTKEY);
        assert!(page.hotkey_error.error);
        assert_eq!(page.hotkey_error.role, LiveRole::Alert);
        assert!(page.form.hotkey_invalid);
    }

    #[test]
    fn valid_verdict_shows_normalized_and_clears_marking() {
        let mut page = SettingsPage::default();
        page.form.hotkey_invalid = true;
        let resp = ValidateResponse {
            ok: true,
            valid: Some(true),
            normalized: Some("ctrl+k".into()),
        };
        apply_verdict(&mut page, "CTRL+K", &resp);

        assert_eq!(page.hotkey_error.text, "OK: ctrl+k");
        assert!(!page.hotkey_error.error);
        assert_eq!(page.hotkey_error.role, LiveRole::Status);
        assert!(!page.form.hotkey_invalid);
    }

    #[test]
    fn valid_without_normalized_echoes_value() {
        let mut page = SettingsPage::default();
        let resp = ValidateResponse {
            ok: true,
            valid: Some(true),
            normalized: None,
        };
        apply_verdict(&mut page, "f9", &resp);
        assert_eq!(page.hotkey_error.text, "OK: f9");
    }

    #[test]
    fn no_verdict_leaves_page_alone() {
        let mut page = SettingsPage::default();
        page.hotkey_error.reject(INVALID_HOTKEY);
        let before = page.clone();

        apply_verdict(&mut page, "x", &ValidateResponse::default());
        assert_eq!(page, before);
    }

    #[tokio::test]
    async fn empty_value_clears_without_network() {
        let api = Arc::new(MockConfigApi::serving(ConfigPayload::default()));
        let (v, page) = make(Arc::clone(&api));
        {
            let mut p = lock_page(&page);
            p.hotkey_error.reject(INVALID_HOTKEY);
            p.form.hotkey_invalid = true;
        }

        v.validate_now("   ").await;

        let p = lock_page(&page);
        assert!(p.hotkey_error.text.is_empty());
        assert!(!p.form.hotkey_invalid);
        assert!(api.calls().validated.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_silent() {
        let api = Arc::new(MockConfigApi::unreachable());
        let (v, page) = make(Arc::clone(&api));

        v.validate_now("ctrl+k").await;

        let p = lock_page(&page);
        assert!(p.hotkey_error.text.is_empty());
        assert!(p.status.text().is_empty());
        assert_eq!(api.calls().validated, vec!["ctrl+k".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_keystrokes_collapse_into_one_call() {
        let api = Arc::new(MockConfigApi::serving(ConfigPayload::default()));
        let (v, page) = make(Arc::clone(&api));

        v.schedule("c");
        tokio::time::sleep(Duration::from_millis(50)).await;
        v.schedule("ct");
        tokio::time::sleep(Duration::from_millis(50)).await;
        v.schedule(" ctrl+k ");

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(api.calls().validated, vec!["ctrl+k".to_string()]);
        assert_eq!(lock_page(&page).hotkey_error.text, "OK: ctrl+k");
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_sent_before_quiet_period() {
        let api = Arc::new(MockConfigApi::serving(ConfigPayload::default()));
        let (v, _page) = make(Arc::clone(&api));

        v.schedule("ctrl+k");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(api.calls().validated.is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(api.calls().validated.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_keystrokes_each_validate() {
        let api = Arc::new(MockConfigApi::serving(ConfigPayload::default()));
        let (v, _page) = make(Arc::clone(&api));

        v.schedule("f8");
        tokio::time::sleep(Duration::from_millis(200)).await;
        v.schedule("f9");
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(
            api.calls().validated,
            vec!["f8".to_string(), "f9".to_string()]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_schedules_keep_one_pending_call() {
        let api = Arc::new(MockConfigApi::serving(ConfigPayload::default()));
        let (v, _page) = make(Arc::clone(&api));

        let threads: Vec<_> = ["a", "b", "c", "d"]
            .into_iter()
            .map(|prefix| {
                let v = v.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        v.schedule(&format!("{prefix}{i}"));
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        v.schedule("ctrl+k");

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(api.calls().validated, vec!["ctrl+k".to_string()]);
    }
}
