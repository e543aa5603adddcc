//! Settings window — egui/eframe application.
//!
//! # Architecture
//!
//! [`SettingsApp`] is the top-level [`eframe::App`].  It renders the shared
//! [`SettingsPage`](crate::page::SettingsPage) every frame and forwards user
//! actions to the [`SettingsController`], spawning the async ones on the
//! tokio runtime.
//!
//! While capture mode is active, key presses are routed to the controller
//! before any widget sees them; consumed presses (and all typed text) are
//! removed from the frame's input so the hotkey field is not edited twice.
//!
//! # Layout
//!
//! | Row | Widgets |
//! |-----|---------|
//! | Hotkey | text field, Test / Stop, inline verdict |
//! | Language | select |
//! | Model | select |
//! | Audio feedback | checkbox, Beep |
//! | Actions | Save, Reset, status line |

use std::time::Duration;

use eframe::egui;

use crate::api::{Language, ModelSize};
use crate::controller::SettingsController;
use crate::hotkey::{KeyEvent, Modifiers};
use crate::page::{lock_page, ButtonState, Tone};

const CRIMSON: egui::Color32 = egui::Color32::from_rgb(220, 20, 60);
const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

/// Browser `KeyboardEvent.key` value for keys whose egui name differs.
fn web_key_name(key: egui::Key) -> Option<&'static str> {
    use egui::Key;
    let name = match key {
        Key::Space => " ",
        Key::ArrowUp => "ArrowUp",
        Key::ArrowDown => "ArrowDown",
        Key::ArrowLeft => "ArrowLeft",
        Key::ArrowRight => "ArrowRight",
        Key::Minus => "-",
        Key::Plus => "+",
        Key::Equals => "=",
        Key::Comma => ",",
        Key::Period => ".",
        Key::Semicolon => ";",
        Key::Colon => ":",
        Key::Slash => "/",
        Key::Backslash => "\\",
        Key::Pipe => "|",
        Key::Questionmark => "?",
        Key::OpenBracket => "[",
        Key::CloseBracket => "]",
        Key::Backtick => "`",
        _ => return None,
    };
    Some(name)
}

/// Convert an egui key press into the web-style [`KeyEvent`] the capture
/// controller understands.
///
/// Punctuation keys become their symbol (`ctrl+-`, not `ctrl+minus`).
/// egui only reports the Command key on macOS, so meta is never set on
/// other platforms.
pub fn key_event_from_egui(key: egui::Key, modifiers: egui::Modifiers) -> KeyEvent {
    let name = web_key_name(key).unwrap_or_else(|| key.name()).to_string();
    KeyEvent::new(
        name,
        Modifiers {
            meta: modifiers.mac_cmd,
            ctrl: modifiers.ctrl,
            alt: modifiers.alt,
            shift: modifiers.shift,
        },
    )
}

/// User actions collected while the page is locked for rendering.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    HotkeyInput(String),
    StartCapture,
    StopCapture,
    Beep,
    Save,
    Reset,
}

// ---------------------------------------------------------------------------
// SettingsApp
// ---------------------------------------------------------------------------

/// eframe application — the settings window.
pub struct SettingsApp {
    controller: SettingsController,
}

impl SettingsApp {
    pub fn new(controller: SettingsController) -> Self {
        Self { controller }
    }

    /// Route key presses through the capturing listener, dropping the ones
    /// it consumes.
    fn intercept_keys(&self, ctx: &egui::Context) {
        if !self.controller.is_capturing() {
            return;
        }
        let controller = &self.controller;
        ctx.input_mut(|input| {
            input.events.retain(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => !controller.dispatch_key(&key_event_from_egui(*key, *modifiers)),
                egui::Event::Text(_) => false,
                _ => true,
            });
        });
    }

    fn run(&self, action: Action) {
        let c = self.controller.clone();
        match action {
            Action::HotkeyInput(value) => c.on_hotkey_input(&value),
            Action::StartCapture => {
                c.start_capture();
            }
            Action::StopCapture => {
                c.stop_capture();
            }
            Action::Beep => {
                self.controller.runtime().spawn(async move { c.beep().await });
            }
            Action::Save => {
                self.controller.runtime().spawn(async move {
                    if let Err(e) = c.save().await {
                        log::debug!("Save did not complete: {e}");
                    }
                });
            }
            Action::Reset => {
                self.controller.runtime().spawn(async move {
                    if let Err(e) = c.reset().await {
                        log::debug!("Reset did not complete: {e}");
                    }
                });
            }
        }
    }

    /// Draw the page; returns the actions the user triggered this frame.
    fn draw(&self, ui: &mut egui::Ui) -> Vec<Action> {
        let mut actions = Vec::new();
        let page = self.controller.page();
        let mut page = lock_page(&page);

        egui::Grid::new("settings-form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // ── Hotkey ───────────────────────────────────────────────
                ui.label("Hotkey");
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        let invalid = page.form.hotkey_invalid;
                        let mut edit = egui::TextEdit::singleline(&mut page.form.hotkey)
                            .hint_text("ctrl+space")
                            .desired_width(160.0);
                        if invalid {
                            edit = edit.text_color(CRIMSON);
                        }
                        let resp = ui.add(edit);
                        if resp.changed() {
                            actions.push(Action::HotkeyInput(page.form.hotkey.clone()));
                        }
                        if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            actions.push(Action::Save);
                        }

                        let test = page.controls.test_hotkey;
                        if button(ui, test, "Test hotkey") {
                            actions.push(Action::StartCapture);
                        }
                        let stop = page.controls.stop_hotkey;
                        if button(ui, stop, "Stop") {
                            actions.push(Action::StopCapture);
                        }
                    });

                    let verdict = &page.hotkey_error;
                    if !verdict.text.is_empty() {
                        let color = if verdict.error { CRIMSON } else { OK_GREEN };
                        ui.label(egui::RichText::new(verdict.text.as_str()).color(color).small());
                    }
                });
                ui.end_row();

                // ── Language ─────────────────────────────────────────────
                ui.label("Language");
                let current = page.form.language.clone();
                egui::ComboBox::from_id_salt("language")
                    .selected_text(current.label())
                    .show_ui(ui, |ui| {
                        for lang in Language::ALL {
                            let label = lang.label().to_string();
                            ui.selectable_value(&mut page.form.language, lang, label);
                        }
                        // A code the server holds but the list lacks stays selectable.
                        if !current.is_offered() {
                            let label = current.label().to_string();
                            ui.selectable_value(&mut page.form.language, current.clone(), label);
                        }
                    });
                ui.end_row();

                // ── Model ────────────────────────────────────────────────
                ui.label("Model");
                egui::ComboBox::from_id_salt("model")
                    .selected_text(page.form.model.name())
                    .show_ui(ui, |ui| {
                        for model in ModelSize::ALL {
                            ui.selectable_value(&mut page.form.model, model, model.name());
                        }
                    });
                ui.end_row();

                // ── Audio feedback ───────────────────────────────────────
                ui.label("Audio feedback");
                ui.horizontal(|ui| {
                    ui.checkbox(&mut page.form.audio_feedback, "Beep on start/stop");
                    let beep = page.controls.beep;
                    if button(ui, beep, "Preview") {
                        actions.push(Action::Beep);
                    }
                });
                ui.end_row();
            });

        ui.separator();

        ui.horizontal(|ui| {
            let save = page.controls.save;
            if button(ui, save, "Save") {
                actions.push(Action::Save);
            }
            let reset = page.controls.reset;
            if button(ui, reset, "Reset") {
                actions.push(Action::Reset);
            }
            if page.form.busy {
                ui.spinner();
            }
        });

        let status = &page.status;
        if !status.text().is_empty() {
            let color = match status.tone() {
                Tone::Normal => ui.visuals().text_color(),
                Tone::Error => CRIMSON,
            };
            ui.label(egui::RichText::new(status.text()).color(color));
        }

        actions
    }
}

/// Render a button according to its state; `true` when clicked.
fn button(ui: &mut egui::Ui, state: ButtonState, text: &str) -> bool {
    if state.hidden {
        return false;
    }
    ui.add_enabled(
        state.enabled,
        egui::Button::new(text).selected(state.pressed),
    )
    .clicked()
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for SettingsApp {
    /// Called every frame by eframe.  Routes captured keys, renders the
    /// page, then runs the collected actions with the page unlocked.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.intercept_keys(ctx);

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Push-to-talk settings");
            ui.add_space(6.0);
            actions = self.draw(ui);
        });

        for action in actions {
            self.run(action);
        }

        // Background tasks update the page; poll it a few times a second.
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.stop_capture();
        log::info!("Settings window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
