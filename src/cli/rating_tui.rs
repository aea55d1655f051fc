//! TUI mode for rating cars.
//!
//! This module provides the entry point for the interactive rating panel. It
//! builds the local host from configuration, hands the startup context to the
//! TUI through module-level storage, and runs the bubbletea-rs program.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;

use carrate::telemetry::{NoopTelemetrySink, TelemetrySink};
use carrate::tui::{
    RatingApp, set_host_runtime, set_initial_terminal_size, set_telemetry_sink,
    set_toast_timings,
};
use carrate::{AppError, RatingsConfig};

/// Runs the interactive rating panel.
///
/// # Errors
///
/// Returns an error if:
/// - The extension id or access token is invalid
/// - The TUI fails to initialise or exits abnormally
pub async fn run(config: &RatingsConfig) -> Result<(), AppError> {
    let telemetry: Arc<dyn TelemetrySink> = Arc::new(panel_telemetry_sink());
    let host = config.local_host()?.with_telemetry(Arc::clone(&telemetry));
    tracing::debug!(
        "starting rating panel for extension {}",
        config.extension_id
    );

    // Startup context is read by `RatingApp::init()`. If already set (e.g.
    // re-running the TUI in the same process), the existing values remain.
    let _ = set_host_runtime(Arc::new(host));
    let _ = set_toast_timings(config.toast_timings());
    let _ = set_telemetry_sink(telemetry);
    if let Ok((width, height)) = crossterm::terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    run_tui().await.map_err(|error| AppError::Terminal {
        message: error.to_string(),
    })
}

/// Returns the sink for host and panel telemetry while the TUI runs.
///
/// The alternate screen owns the terminal, so nothing may write JSON lines to
/// stderr underneath it; `--migrate-db` is the only stderr telemetry mode.
const fn panel_telemetry_sink() -> NoopTelemetrySink {
    NoopTelemetrySink
}

/// Runs the bubbletea-rs program with the `RatingApp` model.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<RatingApp>::builder().alt_screen(true).build()?;

    program.run().await?;

    // Ensure stdout is flushed
    io::stdout().flush().ok();

    Ok(())
}
