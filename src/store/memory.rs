//! In-memory document store.
//!
//! Used when no database is configured and as a test double. Documents live
//! in a `BTreeMap` per collection so listing is naturally ordered by id.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, StoreError, document_id};

type Collections = BTreeMap<String, BTreeMap<String, Value>>;

/// Document store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<Collections>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `documents` in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingDocumentId`] when a document has no id.
    pub fn with_documents(
        collection: &str,
        documents: impl IntoIterator<Item = Value>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut collections = store.lock()?;
            let entries = collections.entry(collection.to_owned()).or_default();
            for document in documents {
                let id = document_id(&document).ok_or(StoreError::MissingDocumentId)?;
                entries.insert(id.to_owned(), document.clone());
            }
        }
        Ok(store)
    }

    /// Returns the number of documents held in `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if the store lock is poisoned.
    pub fn document_count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self
            .lock()?
            .get(collection)
            .map_or(0, BTreeMap::len))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, StoreError> {
        self.collections.lock().map_err(|error| StoreError::Backend {
            message: error.to_string(),
        })
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        self.lock()?
            .get(collection)
            .and_then(|entries| entries.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_owned(),
                id: id.to_owned(),
            })
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self
            .lock()?
            .get(collection)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn set_document(
        &self,
        collection: &str,
        document: &Value,
    ) -> Result<Value, StoreError> {
        let id = document_id(document).ok_or(StoreError::MissingDocumentId)?;
        self.lock()?
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), document.clone());
        Ok(document.clone())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let removed = self
            .lock()?
            .get_mut(collection)
            .and_then(|entries| entries.remove(id));
        removed.map(drop).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_owned(),
            id: id.to_owned(),
        })
    }
}
