//! Startup context storage for the rating TUI.
//!
//! This module owns the global `OnceLock` values used during TUI bootstrapping
//! and provides the setter/getter functions consumed by CLI wiring and app
//! handlers.

use std::sync::{Arc, OnceLock};

use crossterm::terminal;

use crate::host::{self, HostRuntime};
use crate::panel::{PanelEvent, ToastTimings};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

/// Global storage for the host runtime the panel connects through.
static HOST_RUNTIME: OnceLock<Arc<dyn HostRuntime>> = OnceLock::new();

/// Global storage for toast timer settings.
static TOAST_TIMINGS: OnceLock<ToastTimings> = OnceLock::new();

/// Global storage for initial terminal dimensions.
///
/// This is set before the TUI program starts and read by `RatingApp::init()`
/// so the first frame uses the actual terminal size.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

/// Global storage for telemetry sink.
static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Static fallback telemetry sink to avoid allocations on each call.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Sets the host runtime used for the startup handshake.
///
/// This must be called before starting the bubbletea-rs program; without it
/// the handshake fails and store operations report that the data store is
/// not ready.
///
/// # Returns
///
/// `true` if the host was set, `false` if it was already set.
pub fn set_host_runtime(host: Arc<dyn HostRuntime>) -> bool {
    HOST_RUNTIME.set(host).is_ok()
}

/// Sets the toast timer settings.
///
/// # Returns
///
/// `true` if the timings were set, `false` if they were already set.
pub fn set_toast_timings(timings: ToastTimings) -> bool {
    TOAST_TIMINGS.set(timings).is_ok()
}

/// Sets the initial terminal dimensions for the TUI application.
///
/// # Returns
///
/// `true` if the dimensions were set, `false` if they were already set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the telemetry sink for the TUI application.
///
/// Without this, a no-op sink is used.
///
/// # Returns
///
/// `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Gets the configured toast timings, or the defaults.
pub(crate) fn get_toast_timings() -> ToastTimings {
    TOAST_TIMINGS.get().copied().unwrap_or_default()
}

/// Gets the telemetry sink, returning a no-op sink if not configured.
fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Records the outcome of clearing the ratings collection.
pub(crate) fn record_clear_telemetry(deleted: usize, failed: usize) {
    get_telemetry_sink().record(TelemetryEvent::RatingsCleared { deleted, failed });
}

/// Gets the initial terminal dimensions from storage.
///
/// Returns the stored dimensions, the live terminal size, or fallback
/// dimensions, in that order.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}

/// Runs the host handshake through the stored host runtime.
///
/// Returns the panel event describing the outcome.
pub(crate) async fn connect_store() -> PanelEvent {
    let Some(runtime) = HOST_RUNTIME.get().cloned() else {
        return PanelEvent::ConnectFailed("no host runtime configured".to_owned());
    };
    let telemetry = get_telemetry_sink();

    match host::connect(runtime.as_ref(), telemetry.as_ref()).await {
        Ok(handle) => PanelEvent::Connected(handle),
        Err(error) => PanelEvent::ConnectFailed(error.to_string()),
    }
}
