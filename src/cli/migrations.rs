//! Database migration operations.

use carrate::persistence::{PersistenceError, migrate_database};
use carrate::telemetry::StderrJsonlTelemetrySink;
use carrate::{AppError, RatingsConfig};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] if the database URL is missing or blank.
/// Returns [`AppError::Persistence`] for connection or migration failures.
pub fn run(config: &RatingsConfig) -> Result<(), AppError> {
    let database_url =
        config
            .database_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })?;

    let telemetry = StderrJsonlTelemetrySink;
    let version = migrate_database(database_url, &telemetry).map_err(map_persistence_error)?;
    tracing::info!("database schema is at version {}", version.as_str());
    Ok(())
}

/// Maps a persistence error to an application error.
///
/// A blank URL is a configuration problem; everything else is reported as a
/// persistence failure.
fn map_persistence_error(error: PersistenceError) -> AppError {
    if is_configuration_error(&error) {
        AppError::Configuration {
            message: error.to_string(),
        }
    } else {
        AppError::Persistence(error)
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}
