//! Form binder: configuration ⇄ form field state.

use crate::api::{ConfigPayload, Configuration, Language, ModelSize};

/// Current values of the form controls.
///
/// `hotkey` is the raw text of the input, untrimmed; [`read_form`] trims it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub hotkey: String,
    pub language: Language,
    pub model: ModelSize,
    pub audio_feedback: bool,
    /// Accessible invalid-state marking of the hotkey input.
    pub hotkey_invalid: bool,
    /// Accessible busy marking of the whole form (set while saving).
    pub busy: bool,
}

/// Write `cfg` into the form controls, applying defaults for anything
/// absent: empty hotkey, Japanese, `small`, feedback off.
///
/// A model the select does not offer falls back to the default.  A
/// language code it does not offer is kept as [`Language::Other`] so the
/// next save writes it back unchanged.
pub fn fill_form(form: &mut FormState, cfg: &ConfigPayload) {
    form.hotkey = cfg.hotkey.clone().unwrap_or_default();

    form.language = match cfg.language.as_deref().filter(|s| !s.is_empty()) {
        None => Language::default(),
        Some(code) => {
            let language = Language::parse(code);
            if !language.is_offered() {
                log::warn!("Language {code:?} from server is not in the list; keeping it");
            }
            language
        }
    };

    form.model = match cfg.model.as_deref().filter(|s| !s.is_empty()) {
        None => ModelSize::default(),
        Some(name) => ModelSize::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown model {name:?} from server; using default");
            ModelSize::default()
        }),
    };

    form.audio_feedback = cfg.audio_feedback.unwrap_or(false);
}

/// Read the controls back into a [`Configuration`], trimming the hotkey.
pub fn read_form(form: &FormState) -> Configuration {
    Configuration {
        hotkey: form.hotkey.trim().to_string(),
        language: form.language.clone(),
        model: form.model,
        audio_feedback: form.audio_feedback,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_configs() -> Vec<Configuration> {
        let mut out = Vec::new();
        for (i, language) in Language::ALL.into_iter().enumerate() {
            for model in ModelSize::ALL {
                out.push(Configuration {
                    hotkey: if i % 2 == 0 { "ctrl+space".into() } else { "cmd+shift+k".into() },
                    language: language.clone(),
                    model,
                    audio_feedback: i % 3 == 0,
                });
            }
        }
        out
    }

    #[test]
    fn fill_then_read_round_trips() {
        for cfg in sample_configs() {
            let mut form = FormState::default();
            fill_form(&mut form, &ConfigPayload::from(&cfg));
            assert_eq!(read_form(&form), cfg);
        }
    }

    #[test]
    fn absent_fields_get_defaults() {
        let mut form = FormState {
            hotkey: "stale".into(),
            language: Language::Fr,
            model: ModelSize::Large,
            audio_feedback: true,
            ..FormState::default()
        };
        fill_form(&mut form, &ConfigPayload::default());

        assert_eq!(form.hotkey, "");
        assert_eq!(form.language, Language::Ja);
        assert_eq!(form.model, ModelSize::Small);
        assert!(!form.audio_feedback);
    }

    #[test]
    fn empty_strings_get_defaults() {
        let mut form = FormState::default();
        let payload = ConfigPayload {
            hotkey: Some(String::new()),
            language: Some(String::new()),
            model: Some(String::new()),
            audio_feedback: Some(true),
        };
        fill_form(&mut form, &payload);

        assert_eq!(form.language, Language::Ja);
        assert_eq!(form.model, ModelSize::Small);
        assert!(form.audio_feedback);
    }

    #[test]
    fn unknown_model_falls_back_to_default() {
        let mut form = FormState::default();
        let payload = ConfigPayload {
            hotkey: Some("f9".into()),
            language: None,
            model: Some("enormous".into()),
            audio_feedback: None,
        };
        fill_form(&mut form, &payload);

        assert_eq!(form.hotkey, "f9");
        assert_eq!(form.model, ModelSize::Small);
    }

    #[test]
    fn unlisted_language_is_written_back() {
        let mut form = FormState::default();
        let payload = ConfigPayload {
            hotkey: Some("f9".into()),
            language: Some("it".into()),
            model: Some("base".into()),
            audio_feedback: Some(true),
        };
        fill_form(&mut form, &payload);

        assert_eq!(form.language, Language::Other("it".into()));
        assert_eq!(read_form(&form).language.code(), "it");
        assert_eq!(ConfigPayload::from(&read_form(&form)), payload);
    }

    #[test]
    fn read_form_trims_hotkey() {
        let form = FormState {
            hotkey: "  ctrl+k \t".into(),
            ..FormState::default()
        };
        assert_eq!(read_form(&form).hotkey, "ctrl+k");
    }

    #[test]
    fn fill_leaves_accessibility_flags_alone() {
        let mut form = FormState {
            hotkey_invalid: true,
            busy: true,
            ..FormState::default()
        };
        fill_form(&mut form, &ConfigPayload::default());
        assert!(form.hotkey_invalid);
        assert!(form.busy);
    }
}
