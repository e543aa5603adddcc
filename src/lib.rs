//! Settings window for a push-to-talk speech-to-text utility.
//!
//! The window edits the utility's configuration through its local config
//! server: it loads the configuration, lets the user change the hotkey,
//! language, model and audio feedback, validates the hotkey live against
//! the server, captures a hotkey from real key presses, and saves the
//! result back.
//!
//! * [`api`] — config server client.
//! * [`page`] — page model rendered by the window.
//! * [`hotkey`] — combo building, capture mode, live validation.
//! * [`controller`] — user action handling.
//! * [`config`] — client settings.
//! * [`app`] — the eframe window.

pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod hotkey;
pub mod page;
