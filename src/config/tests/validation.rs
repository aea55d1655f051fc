//! Tests for configuration validation and derived settings.

use std::time::Duration;

use rstest::rstest;

use crate::RatingsConfig;
use crate::config::OperationMode;
use crate::error::AppError;
use crate::host::StoreBackend;

#[rstest]
fn default_configuration_is_valid() {
    assert_eq!(RatingsConfig::default().validate(), Ok(()));
}

#[rstest]
#[case::blank_extension_id(RatingsConfig {
    extension_id: "  ".to_owned(),
    ..Default::default()
})]
#[case::blank_database_url(RatingsConfig {
    database_url: Some(String::new()),
    ..Default::default()
})]
#[case::zero_toast_duration(RatingsConfig {
    toast_duration_ms: 0,
    ..Default::default()
})]
fn rejects_unusable_values(#[case] config: RatingsConfig) {
    let result = config.validate();

    assert!(
        matches!(result, Err(AppError::Configuration { .. })),
        "expected a configuration error, got {result:?}"
    );
}

#[rstest]
fn zero_fade_is_allowed() {
    let config = RatingsConfig {
        toast_fade_ms: 0,
        ..Default::default()
    };

    assert_eq!(config.validate(), Ok(()));
}

#[rstest]
#[case(false, OperationMode::RatingPanel)]
#[case(true, OperationMode::MigrateDatabase)]
fn operation_mode_follows_migrate_flag(#[case] migrate_db: bool, #[case] expected: OperationMode) {
    let config = RatingsConfig {
        migrate_db,
        ..Default::default()
    };

    assert_eq!(config.operation_mode(), expected);
}

#[rstest]
fn toast_timings_use_configured_milliseconds() {
    let config = RatingsConfig {
        toast_duration_ms: 3_000,
        toast_fade_ms: 100,
        ..Default::default()
    };

    let timings = config.toast_timings();

    assert_eq!(timings.hide_after, Duration::from_millis(3_000));
    assert_eq!(timings.fade, Duration::from_millis(100));
}

#[rstest]
#[case(None, StoreBackend::InMemory)]
#[case(
    Some("ratings.sqlite"),
    StoreBackend::Sqlite { database_url: "ratings.sqlite".to_owned() }
)]
fn store_backend_follows_database_url(
    #[case] database_url: Option<&str>,
    #[case] expected: StoreBackend,
) {
    let config = RatingsConfig {
        database_url: database_url.map(str::to_owned),
        ..Default::default()
    };

    assert_eq!(config.store_backend(), expected);
}

#[rstest]
fn local_host_rejects_blank_access_token() {
    let config = RatingsConfig {
        access_token: Some(" ".to_owned()),
        ..Default::default()
    };

    assert!(config.local_host().is_err());
}
