//! Extension document store backed by `SQLite`.
//!
//! Every document is stored as JSON text under `(scope, collection, id)`,
//! where `scope` is the extension id the data manager was opened for. Each
//! call opens its own connection; the async [`DocumentStore`] methods move
//! that blocking work onto Tokio's blocking pool.
//!
//! Connections wait up to [`BUSY_TIMEOUT_MS`] for a competing writer, and
//! writes take the write lock up front with `BEGIN IMMEDIATE`, so concurrent
//! deletes queue behind each other instead of failing with
//! `database is locked`.

use async_trait::async_trait;
use diesel::Connection;
use diesel::connection::SimpleConnection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use serde_json::Value;

use crate::store::{DocumentStore, StoreError, document_id};

use super::PersistenceError;

const DOCUMENTS_TABLE: &str = "extension_documents";

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// SQLite-backed document store scoped to one extension.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    database_url: String,
    scope: String,
}

#[derive(Debug, QueryableByName)]
struct BodyRow {
    #[diesel(sql_type = Text)]
    body: String,
}

impl SqliteDocumentStore {
    /// Creates a store for `scope` targeting `database_url`.
    ///
    /// The database must already be migrated; see
    /// [`migrate_database`](super::migrate_database).
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] or
    /// [`PersistenceError::BlankScope`] for blank inputs.
    pub fn new(
        database_url: impl Into<String>,
        scope: impl Into<String>,
    ) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        let scope_string = scope.into();
        if scope_string.trim().is_empty() {
            return Err(PersistenceError::BlankScope);
        }
        Ok(Self {
            database_url: database_url_string.trim().to_owned(),
            scope: scope_string,
        })
    }

    /// Returns the scope documents are stored under.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Reads one document, returning `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, the query fails or the stored body is not JSON.
    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, PersistenceError> {
        let mut connection = self.establish_connection()?;

        let row: Option<BodyRow> = sql_query(
            "SELECT body FROM extension_documents \
             WHERE scope = ? AND collection = ? AND id = ? \
             LIMIT 1;",
        )
        .bind::<Text, _>(self.scope.as_str())
        .bind::<Text, _>(collection)
        .bind::<Text, _>(id)
        .get_result(&mut connection)
        .optional()
        .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        row.map(|found| Self::decode_body(&found.body)).transpose()
    }

    /// Reads every document in `collection`, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, the query fails or a stored body is not JSON.
    pub fn list(&self, collection: &str) -> Result<Vec<Value>, PersistenceError> {
        let mut connection = self.establish_connection()?;

        let rows: Vec<BodyRow> = sql_query(
            "SELECT body FROM extension_documents \
             WHERE scope = ? AND collection = ? \
             ORDER BY id;",
        )
        .bind::<Text, _>(self.scope.as_str())
        .bind::<Text, _>(collection)
        .load(&mut connection)
        .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        rows.iter().map(|row| Self::decode_body(&row.body)).collect()
    }

    /// Inserts or replaces a document keyed by `id`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing or the write fails.
    pub fn upsert(
        &self,
        collection: &str,
        id: &str,
        document: &Value,
    ) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;
        let body = document.to_string();

        connection
            .immediate_transaction::<_, diesel::result::Error, _>(|transaction| {
                sql_query(
                    "INSERT INTO extension_documents (scope, collection, id, body) \
                     VALUES (?, ?, ?, ?) \
                     ON CONFLICT(scope, collection, id) DO UPDATE SET \
                       body = excluded.body, \
                       updated_at = CURRENT_TIMESTAMP;",
                )
                .bind::<Text, _>(self.scope.as_str())
                .bind::<Text, _>(collection)
                .bind::<Text, _>(id)
                .bind::<Text, _>(body.as_str())
                .execute(transaction)
            })
            .map(drop)
            .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Deletes a document, returning whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing or the delete fails.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool, PersistenceError> {
        let mut connection = self.establish_connection()?;

        let affected = connection
            .immediate_transaction::<_, diesel::result::Error, _>(|transaction| {
                sql_query(
                    "DELETE FROM extension_documents \
                     WHERE scope = ? AND collection = ? AND id = ?;",
                )
                .bind::<Text, _>(self.scope.as_str())
                .bind::<Text, _>(collection)
                .bind::<Text, _>(id)
                .execute(transaction)
            })
            .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        Ok(affected > 0)
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|error| {
                StoreError::from(PersistenceError::TaskFailed {
                    message: error.to_string(),
                })
            })?
    }

    fn decode_body(body: &str) -> Result<Value, PersistenceError> {
        serde_json::from_str(body).map_err(|error| PersistenceError::QueryFailed {
            message: format!("stored document is not valid JSON: {error}"),
        })
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        let mut connection = SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })?;
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(|error| PersistenceError::ConnectionFailed {
                message: format!("failed to set busy timeout: {error}"),
            })?;
        Ok(connection)
    }

    fn documents_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            one: i64,
        }

        let exists: Option<Row> = sql_query(
            "SELECT 1 AS one FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1;",
        )
        .bind::<Text, _>(DOCUMENTS_TABLE)
        .get_result(connection)
        .optional()?;

        Ok(exists.is_some_and(|row| row.one == 1))
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::documents_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Value, StoreError> {
        let collection_name = collection.to_owned();
        let document_key = id.to_owned();
        self.run_blocking(move |store| {
            store
                .get(&collection_name, &document_key)?
                .ok_or(StoreError::NotFound {
                    collection: collection_name,
                    id: document_key,
                })
        })
        .await
    }

    async fn get_documents(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let collection_name = collection.to_owned();
        self.run_blocking(move |store| Ok(store.list(&collection_name)?))
            .await
    }

    async fn set_document(
        &self,
        collection: &str,
        document: &Value,
    ) -> Result<Value, StoreError> {
        let id = document_id(document)
            .ok_or(StoreError::MissingDocumentId)?
            .to_owned();
        let collection_name = collection.to_owned();
        let stored = document.clone();
        self.run_blocking(move |store| {
            store.upsert(&collection_name, &id, &stored)?;
            Ok(stored)
        })
        .await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let collection_name = collection.to_owned();
        let document_key = id.to_owned();
        self.run_blocking(move |store| {
            if store.delete(&collection_name, &document_key)? {
                Ok(())
            } else {
                Err(StoreError::NotFound {
                    collection: collection_name,
                    id: document_key,
                })
            }
        })
        .await
    }
}
