//! Host runtime for running the panel outside a hosting application.
//!
//! [`LocalHost`] answers the handshake from configuration: it is always
//! ready, issues a token derived from the extension id unless one is
//! configured, and hands out document stores backed either by `SQLite` or by
//! process memory.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{
    AccessToken, EXTENSION_DATA_SERVICE_ID, ExtensionContext, ExtensionDataService, HostError,
    HostRuntime,
};
use crate::persistence::{PersistenceError, SqliteDocumentStore, migrate_database};
use crate::store::{InMemoryDocumentStore, StoreHandle};
use crate::telemetry::{NoopTelemetrySink, TelemetrySink};

/// Where a [`LocalDataService`] keeps documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// A `SQLite` database, migrated before the first data manager is
    /// handed out.
    Sqlite {
        /// Path or URL of the database.
        database_url: String,
    },
    /// Process memory; contents are lost on exit.
    InMemory,
}

/// Returns the token [`LocalHost`] issues when none is configured.
#[must_use]
pub fn local_access_token(extension_id: &str) -> String {
    format!("local-token:{extension_id}")
}

/// Extension data service backed by [`StoreBackend`].
#[derive(Clone)]
pub struct LocalDataService {
    backend: StoreBackend,
    expected_token: AccessToken,
    telemetry: Arc<dyn TelemetrySink>,
    memory: Arc<Mutex<BTreeMap<String, Arc<InMemoryDocumentStore>>>>,
}

impl LocalDataService {
    fn memory_store(&self, extension_id: &str) -> Result<StoreHandle, HostError> {
        let mut stores = self
            .memory
            .lock()
            .map_err(|error| PersistenceError::TaskFailed {
                message: error.to_string(),
            })?;
        let store = stores
            .entry(extension_id.to_owned())
            .or_insert_with(|| Arc::new(InMemoryDocumentStore::new()));
        Ok(StoreHandle::new(store.clone()))
    }

    async fn sqlite_store(
        &self,
        database_url: &str,
        extension_id: &str,
    ) -> Result<StoreHandle, HostError> {
        let url = database_url.to_owned();
        let telemetry = Arc::clone(&self.telemetry);
        tokio::task::spawn_blocking(move || migrate_database(&url, telemetry.as_ref()))
            .await
            .map_err(|error| PersistenceError::TaskFailed {
                message: error.to_string(),
            })??;

        let store = SqliteDocumentStore::new(database_url, extension_id)?;
        Ok(StoreHandle::from_store(store))
    }
}

#[async_trait]
impl ExtensionDataService for LocalDataService {
    async fn data_manager(
        &self,
        extension_id: &str,
        token: &AccessToken,
    ) -> Result<StoreHandle, HostError> {
        if token != &self.expected_token {
            return Err(HostError::Unauthorised {
                extension_id: extension_id.to_owned(),
            });
        }

        match &self.backend {
            StoreBackend::Sqlite { database_url } => {
                self.sqlite_store(database_url, extension_id).await
            }
            StoreBackend::InMemory => self.memory_store(extension_id),
        }
    }
}

/// Host runtime configured locally.
#[derive(Clone)]
pub struct LocalHost {
    context: ExtensionContext,
    token: AccessToken,
    service: LocalDataService,
}

impl LocalHost {
    /// Creates a host for `extension_id` storing documents in `backend`.
    ///
    /// `access_token` overrides the token derived from the extension id.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::MissingExtensionContext`] for a blank extension
    /// id and [`HostError::InvalidAccessToken`] for a blank token.
    pub fn new(
        extension_id: impl Into<String>,
        access_token: Option<String>,
        backend: StoreBackend,
    ) -> Result<Self, HostError> {
        let id = extension_id.into();
        if id.trim().is_empty() {
            return Err(HostError::MissingExtensionContext);
        }
        let token = AccessToken::new(access_token.unwrap_or_else(|| local_access_token(&id)))?;

        Ok(Self {
            service: LocalDataService {
                backend,
                expected_token: token.clone(),
                telemetry: Arc::new(NoopTelemetrySink),
                memory: Arc::default(),
            },
            context: ExtensionContext { id },
            token,
        })
    }

    /// Records migration telemetry through `telemetry`.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.service.telemetry = telemetry;
        self
    }

    /// Returns the configured storage backend.
    #[must_use]
    pub const fn backend(&self) -> &StoreBackend {
        &self.service.backend
    }
}

#[async_trait]
impl HostRuntime for LocalHost {
    async fn ready(&self) -> Result<(), HostError> {
        Ok(())
    }

    async fn access_token(&self) -> Result<AccessToken, HostError> {
        Ok(self.token.clone())
    }

    async fn data_service(
        &self,
        service_id: &str,
    ) -> Result<Box<dyn ExtensionDataService>, HostError> {
        if service_id != EXTENSION_DATA_SERVICE_ID {
            return Err(HostError::UnknownService {
                service_id: service_id.to_owned(),
            });
        }
        Ok(Box::new(self.service.clone()))
    }

    fn extension_context(&self) -> Result<ExtensionContext, HostError> {
        Ok(self.context.clone())
    }
}
