//! Taskboard Terminal UI.
//!
//! A terminal client for the Taskboard API: browse, filter, add, edit,
//! and delete tasks.

use tokio::sync::mpsc;
use tracing::info;

mod api;
mod app;
mod backend;
mod event;
mod store;
mod views;

use api::ApiClient;
use app::App;
use event::{Command, UiEvent};

fn main() -> eyre::Result<()> {
    // Write logs to a file so they do not interfere with the terminal UI
    if let Ok(file) = std::fs::File::create("/tmp/taskboard-tui.log") {
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter("taskboard_tui=debug")
            .with_ansi(false)
            .init();
    }

    let base_url = core_config::env_or_default("TASKBOARD_API_URL", "http://localhost:8080");
    info!(%base_url, "Starting Taskboard TUI");

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(100);

    // Spawn background thread with its own tokio runtime
    let client = ApiClient::new(base_url);
    let bg_handle = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create tokio runtime");
                return;
            }
        };
        rt.block_on(backend::run_backend(client, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    // Run UI loop on main thread
    let mut app = App::new();
    let result = app.run(terminal, ui_rx, cmd_tx);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    // Wait for background thread to finish
    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| eyre::eyre!("terminal error: {}", e))
}
