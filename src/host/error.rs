//! Errors raised during the host handshake.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Failures of a host handshake step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The host never finished initialising.
    #[error("host runtime is not ready: {message}")]
    NotReady {
        /// Host-provided detail.
        message: String,
    },

    /// The host returned an empty access token.
    #[error("host returned a blank access token")]
    InvalidAccessToken,

    /// No service is registered under the requested id.
    #[error("unknown host service: {service_id}")]
    UnknownService {
        /// Id that was requested.
        service_id: String,
    },

    /// The extension context is unavailable or has no id.
    #[error("extension context is unavailable")]
    MissingExtensionContext,

    /// The data service refused the credential.
    #[error("data service rejected the access token for {extension_id}")]
    Unauthorised {
        /// Extension the data manager was requested for.
        extension_id: String,
    },

    /// The data manager's backing store could not be opened.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
