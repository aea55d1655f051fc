//! Carrate library crate providing a car rating panel.
//!
//! Ratings are small JSON documents kept in a per-extension document store.
//! The library provides the rating model, the panel state machine with its
//! transient toast, the host handshake that hands out a scoped store, a local
//! `SQLite` backend with Diesel migrations, and a terminal UI built on
//! bubbletea-rs.

pub mod config;
pub mod error;
pub mod host;
pub mod panel;
pub mod persistence;
pub mod rating;
pub mod store;
pub mod telemetry;
pub mod tui;

pub use config::{OperationMode, RatingsConfig};
pub use error::AppError;
pub use host::{HostError, HostRuntime, LocalHost};
pub use panel::{PanelEffect, PanelEvent, RatingPanel};
pub use rating::{Rating, RatingAxis, Score};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError, StoreHandle};
