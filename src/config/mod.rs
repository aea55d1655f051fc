//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.carrate.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CARRATE_DATABASE_URL`,
//!    `CARRATE_EXTENSION_ID`, and friends
//! 4. **Command-line arguments** – `--database-url`, `--extension-id`, ...
//!
//! # Configuration File
//!
//! ```toml
//! database_url = "ratings.sqlite"
//! extension_id = "local.car-ratings"
//! toast_duration_ms = 3000
//! ```

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::host::{HostError, LocalHost, StoreBackend};
use crate::panel::ToastTimings;

/// Extension id used when none is configured.
pub const DEFAULT_EXTENSION_ID: &str = "local.car-ratings";

const DEFAULT_TOAST_DURATION_MS: u64 = 2_000;
const DEFAULT_TOAST_FADE_MS: u64 = 250;

/// Operation mode determined by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply database migrations and exit.
    MigrateDatabase,
    /// Run the interactive rating panel.
    RatingPanel,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CARRATE_DATABASE_URL` or `--database-url`: Local `SQLite` database path
/// - `CARRATE_EXTENSION_ID` or `--extension-id`: Scope for stored ratings
/// - `CARRATE_ACCESS_TOKEN` or `--access-token`: Data service credential
/// - `CARRATE_TOAST_DURATION_MS` / `CARRATE_TOAST_FADE_MS`: Toast timing
///
/// # Example
///
/// ```no_run
/// use carrate::RatingsConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = RatingsConfig::load().expect("failed to load configuration");
/// config.validate().expect("configuration should be consistent");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CARRATE",
    discovery(
        dotfile_name = ".carrate.toml",
        config_file_name = "carrate.toml",
        app_name = "carrate"
    )
)]
pub struct RatingsConfig {
    /// Local `SQLite` database URL/path used for persistence.
    ///
    /// When absent, ratings are kept in memory for the lifetime of the
    /// process.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>` or `-d <PATH>`
    /// - Environment: `CARRATE_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    #[ortho_config(cli_short = 'd')]
    pub database_url: Option<String>,

    /// Extension id the stored ratings are scoped to.
    ///
    /// Can be provided via:
    /// - CLI: `--extension-id <ID>` or `-e <ID>`
    /// - Environment: `CARRATE_EXTENSION_ID`
    /// - Config file: `extension_id = "..."`
    #[ortho_config(cli_short = 'e')]
    pub extension_id: String,

    /// Credential handed to the extension data service.
    ///
    /// Defaults to a local token derived from the extension id.
    ///
    /// Can be provided via:
    /// - CLI: `--access-token <TOKEN>`
    /// - Environment: `CARRATE_ACCESS_TOKEN`
    /// - Config file: `access_token = "..."`
    #[ortho_config()]
    pub access_token: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--migrate-db`
    /// - Config file: `migrate_db = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so `CARRATE_MIGRATE_DB` is not supported.
    #[ortho_config()]
    pub migrate_db: bool,

    /// How long a toast stays fully visible, in milliseconds.
    ///
    /// Defaults to 2000.
    #[ortho_config()]
    pub toast_duration_ms: u64,

    /// Length of the toast fade-out, in milliseconds.
    ///
    /// Defaults to 250.
    #[ortho_config()]
    pub toast_fade_ms: u64,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            extension_id: DEFAULT_EXTENSION_ID.to_owned(),
            access_token: None,
            migrate_db: false,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            toast_fade_ms: DEFAULT_TOAST_FADE_MS,
        }
    }
}

impl RatingsConfig {
    /// Checks the configuration for values that cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] for a blank extension id, a blank
    /// database URL, or a zero toast duration.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.extension_id.trim().is_empty() {
            return Err(configuration("extension id must not be blank"));
        }
        if self
            .database_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(configuration(
                "database URL must not be blank (omit it to keep ratings in memory)",
            ));
        }
        if self.toast_duration_ms == 0 {
            return Err(configuration("toast duration must be greater than zero"));
        }
        Ok(())
    }

    /// Determines the operation mode.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else {
            OperationMode::RatingPanel
        }
    }

    /// Returns the toast timer settings.
    #[must_use]
    pub const fn toast_timings(&self) -> ToastTimings {
        ToastTimings {
            hide_after: Duration::from_millis(self.toast_duration_ms),
            fade: Duration::from_millis(self.toast_fade_ms),
        }
    }

    /// Returns where documents should be stored.
    #[must_use]
    pub fn store_backend(&self) -> StoreBackend {
        self.database_url
            .as_ref()
            .map_or(StoreBackend::InMemory, |url| StoreBackend::Sqlite {
                database_url: url.clone(),
            })
    }

    /// Builds the local host runtime described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] for a blank extension id or access token.
    pub fn local_host(&self) -> Result<LocalHost, HostError> {
        LocalHost::new(
            self.extension_id.clone(),
            self.access_token.clone(),
            self.store_backend(),
        )
    }
}

fn configuration(message: &str) -> AppError {
    AppError::Configuration {
        message: message.to_owned(),
    }
}

#[cfg(test)]
mod tests;
