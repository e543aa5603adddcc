//! Application entry point — push-to-talk settings window.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`ClientSettings`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the config server client ([`HttpConfigApi`]) from settings.
//! 5. Build the page model, keyboard hub and [`SettingsController`].
//! 6. Spawn the initial configuration load on the runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use hotkey_settings::{
    api::{ConfigApi, HttpConfigApi},
    app::SettingsApp,
    config::ClientSettings,
    controller::SettingsController,
    hotkey::KeyboardHub,
    page::new_shared_page,
};

fn native_options(settings: &ClientSettings) -> eframe::NativeOptions {
    let (w, h) = settings.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_title("Push-to-talk settings")
        .with_inner_size([w, h])
        .with_min_inner_size([360.0, 260.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Settings window starting up");

    // 2. Settings
    let settings = ClientSettings::load().unwrap_or_else(|e| {
        log::warn!("Failed to load settings ({e}); using defaults");
        ClientSettings::default()
    });
    log::info!("Config server: {}", settings.server.base_url);

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    // 4. Config server client
    let api: Arc<dyn ConfigApi> = Arc::new(HttpConfigApi::from_settings(&settings.server));

    // 5. Page model + controller
    let controller = SettingsController::new(
        api,
        new_shared_page(),
        KeyboardHub::new(),
        &settings,
        rt.handle().clone(),
    );

    // 6. Initial load (failure is reported in the status line)
    {
        let c = controller.clone();
        rt.spawn(async move {
            let _ = c.load().await;
        });
    }

    // 7. Window (blocks until closed)
    let app = SettingsApp::new(controller);
    let options = native_options(&settings);

    eframe::run_native(
        "Push-to-talk settings",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
