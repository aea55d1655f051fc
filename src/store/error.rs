//! Error types for document store operations.

use thiserror::Error;

/// Errors surfaced by a [`DocumentStore`](super::DocumentStore).
///
/// The stores make no attempt to classify backend failures further; callers
/// such as the rating panel collapse most of these into a single message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No document exists under the requested key.
    #[error("document {id:?} not found in collection {collection:?}")]
    NotFound {
        /// Collection that was searched.
        collection: String,
        /// Requested document id.
        id: String,
    },

    /// A document was written without a non-empty string `id` field.
    #[error("document must carry a non-empty string id")]
    MissingDocumentId,

    /// A document could not be encoded or decoded.
    #[error("document serialisation failed: {message}")]
    Serialization {
        /// Detail from `serde_json`.
        message: String,
    },

    /// The backing storage failed.
    #[error("document store backend error: {message}")]
    Backend {
        /// Error detail from the backend.
        message: String,
    },
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}
