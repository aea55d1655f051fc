//! Host runtime handshake.
//!
//! The rating panel does not open its document store directly. It asks the
//! host runtime for an access token and the extension data service, then
//! asks that service for a data manager scoped to the current extension.
//! [`connect`] runs that sequence; [`LocalHost`] is the host used by the
//! terminal application.

mod error;
mod local;

use std::fmt;
use std::time::Instant;

use async_trait::async_trait;

pub use error::HostError;
pub use local::{LocalDataService, LocalHost, StoreBackend, local_access_token};

use crate::store::StoreHandle;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

/// Well-known id of the extension data service.
pub const EXTENSION_DATA_SERVICE_ID: &str = "ms.vss-features.extension-data-service";

/// Opaque credential handed to the data service.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token value.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidAccessToken`] when `value` is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, HostError> {
        let token = value.into();
        if token.trim().is_empty() {
            return Err(HostError::InvalidAccessToken);
        }
        Ok(Self(token))
    }

    /// Returns the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Identity of the running extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionContext {
    /// Fully qualified extension id; documents are scoped to it.
    pub id: String,
}

/// Services offered by the host the panel is embedded in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Completes when the host has finished initialising.
    async fn ready(&self) -> Result<(), HostError>;

    /// Returns a credential for the data service.
    async fn access_token(&self) -> Result<AccessToken, HostError>;

    /// Resolves a service by its well-known id.
    async fn data_service(
        &self,
        service_id: &str,
    ) -> Result<Box<dyn ExtensionDataService>, HostError>;

    /// Returns the identity of the running extension.
    fn extension_context(&self) -> Result<ExtensionContext, HostError>;
}

/// Hands out document stores scoped to an extension.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtensionDataService: Send + Sync {
    /// Returns the data manager for `extension_id`.
    async fn data_manager(
        &self,
        extension_id: &str,
        token: &AccessToken,
    ) -> Result<StoreHandle, HostError>;
}

/// Runs the host handshake and returns the scoped store handle.
///
/// The steps run strictly in order (ready, access token, data service, data
/// manager) and the first failure ends the handshake.
///
/// # Errors
///
/// Returns the [`HostError`] of the step that failed.
pub async fn connect(
    host: &dyn HostRuntime,
    telemetry: &dyn TelemetrySink,
) -> Result<StoreHandle, HostError> {
    let started = Instant::now();

    host.ready().await?;
    tracing::debug!("host runtime ready");

    let token = host.access_token().await?;
    tracing::debug!("obtained access token");

    let service = host.data_service(EXTENSION_DATA_SERVICE_ID).await?;
    tracing::debug!(service_id = EXTENSION_DATA_SERVICE_ID, "resolved data service");

    let context = host.extension_context()?;
    let handle = service.data_manager(&context.id, &token).await?;
    tracing::debug!(extension_id = %context.id, "resolved data manager");

    telemetry.record(TelemetryEvent::StoreConnected {
        extension_id: context.id,
        latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
    });
    Ok(handle)
}
