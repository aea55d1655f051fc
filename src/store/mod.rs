//! Key/value document store used to persist ratings.
//!
//! Documents are JSON objects addressed by a collection name and the string
//! value of their `id` field. The [`DocumentStore`] trait is the seam between
//! the rating panel and whichever backend the host hands out; the in-memory
//! implementation lives here and the `SQLite` implementation lives in
//! [`crate::persistence`].

mod error;
mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use error::StoreError;
pub use memory::InMemoryDocumentStore;

use crate::rating::Rating;

/// Collection holding car ratings.
pub const RATINGS_COLLECTION: &str = "ratings";

/// Asynchronous document store scoped to a single extension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetches one document by id.
    ///
    /// Fails with [`StoreError::NotFound`] when the document does not exist.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    /// Fetches every document in `collection`, ordered by id.
    async fn get_documents(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Inserts or replaces a document keyed by its `id` field and returns the
    /// stored document.
    async fn set_document(&self, collection: &str, document: &Value)
    -> Result<Value, StoreError>;

    /// Deletes one document by id.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Shared handle to a connected document store.
///
/// Produced by the host handshake and owned by the rating panel once the
/// connection is established.
#[derive(Clone)]
pub struct StoreHandle(Arc<dyn DocumentStore>);

impl StoreHandle {
    /// Wraps an already shared store.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self(store)
    }

    /// Wraps an owned store.
    #[must_use]
    pub fn from_store(store: impl DocumentStore + 'static) -> Self {
        Self(Arc::new(store))
    }

    /// Borrows the underlying store.
    #[must_use]
    pub fn store(&self) -> &dyn DocumentStore {
        self.0.as_ref()
    }
}

impl fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoreHandle(..)")
    }
}

impl PartialEq for StoreHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Returns the non-empty string `id` of a document, if it has one.
#[must_use]
pub fn document_id(document: &Value) -> Option<&str> {
    document
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Loads a rating from the ratings collection.
///
/// # Errors
///
/// Returns the store's error, or [`StoreError::Serialization`] when the
/// stored document is not a valid rating.
pub async fn fetch_rating(store: &dyn DocumentStore, id: &str) -> Result<Rating, StoreError> {
    let document = store.get_document(RATINGS_COLLECTION, id).await?;
    Ok(serde_json::from_value(document)?)
}

/// Writes a rating to the ratings collection and returns what was stored.
///
/// # Errors
///
/// Returns [`StoreError::MissingDocumentId`] for unnamed drafts, otherwise
/// the store's error.
pub async fn save_rating(store: &dyn DocumentStore, rating: &Rating) -> Result<Rating, StoreError> {
    if !rating.has_id() {
        return Err(StoreError::MissingDocumentId);
    }
    let document = serde_json::to_value(rating)?;
    let stored = store.set_document(RATINGS_COLLECTION, &document).await?;
    Ok(serde_json::from_value(stored)?)
}

/// Lists every rating in the ratings collection.
///
/// # Errors
///
/// Returns the store's error, or [`StoreError::Serialization`] when any
/// stored document is not a valid rating.
pub async fn list_ratings(store: &dyn DocumentStore) -> Result<Vec<Rating>, StoreError> {
    store
        .get_documents(RATINGS_COLLECTION)
        .await?
        .into_iter()
        .map(|document| serde_json::from_value(document).map_err(StoreError::from))
        .collect()
}
