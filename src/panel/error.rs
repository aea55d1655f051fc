//! Errors raised by rating panel operations.
//!
//! The display form of each variant is the notice shown to the user, so the
//! panel can surface an error by showing its string.

use thiserror::Error;

use crate::store::StoreError;

/// Failures of a rating panel operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelError {
    /// Load was requested without a car name.
    #[error("Search query required.")]
    MissingSearchQuery,

    /// Save was requested for a draft without a car name.
    #[error("Car name required.")]
    MissingCarName,

    /// Load failed, for whatever reason.
    ///
    /// Missing documents, backend failures and undecodable documents all
    /// collapse into this one variant.
    #[error("Car rating not found: {id}")]
    NotFoundOrFetch {
        /// The id that was searched for.
        id: String,
        /// Underlying store failure.
        cause: StoreError,
    },

    /// Writing the draft failed.
    #[error("Failed to save car rating {id}: {cause}")]
    Persistence {
        /// Id of the draft that was being saved.
        id: String,
        /// Underlying store failure.
        cause: StoreError,
    },

    /// A store operation was requested before the host handshake finished.
    #[error("Data store is not ready.")]
    NotReady,
}
