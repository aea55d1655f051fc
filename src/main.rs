//! Carrate CLI entrypoint for the car rating panel.

use std::io::{self, Write};
use std::process::ExitCode;

use carrate::{AppError, OperationMode, RatingsConfig};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = load_config()?;
    config.validate()?;

    match config.operation_mode() {
        OperationMode::MigrateDatabase => cli::migrations::run(&config),
        OperationMode::RatingPanel => cli::rating_tui::run(&config).await,
    }
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RatingsConfig, AppError> {
    RatingsConfig::load().map_err(|error| AppError::Configuration {
        message: error.to_string(),
    })
}
