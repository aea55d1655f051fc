//! Terminal User Interface for the car rating panel.
//!
//! This module provides an interactive TUI for searching, editing, and
//! saving car ratings using the bubbletea-rs framework.
//!
//! # Architecture
//!
//! The TUI follows the Model-View-Update (MVU) pattern:
//!
//! - **Model**: Application state in [`app::RatingApp`], wrapping the
//!   [`RatingPanel`](crate::panel::RatingPanel) reducer
//! - **View**: Rendering logic in [`components`]
//! - **Update**: Message-driven state transitions in `update()`; panel
//!   effects become bubbletea commands
//!
//! # Modules
//!
//! - [`app`]: Main application model and entry point
//! - [`messages`]: Message types for the update loop
//! - [`components`]: Stateless UI components
//! - [`input`]: Focus-aware key-to-message mapping
//!
//! # Startup Context
//!
//! Because bubbletea-rs's `Model` trait requires `init()` to be a static
//! function, startup context (host runtime, toast timings, telemetry sink and
//! terminal size) is handed over through module-level storage. Call the
//! `set_*` functions before starting the program.

pub mod app;
pub mod components;
pub mod input;
pub mod messages;
mod storage;

pub use app::RatingApp;
pub use storage::{
    set_host_runtime, set_initial_terminal_size, set_telemetry_sink, set_toast_timings,
};
pub(crate) use storage::{
    connect_store, get_initial_terminal_size, get_toast_timings, record_clear_telemetry,
};
