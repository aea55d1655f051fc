//! Top-level error type for the `carrate` binary.

use thiserror::Error;

use crate::host::HostError;
use crate::persistence::PersistenceError;

/// Errors that end a `carrate` run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// The local database could not be prepared.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The host handshake failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The terminal program failed.
    #[error("terminal UI error: {message}")]
    Terminal {
        /// Error detail from the TUI framework.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
