//! Local persistence and database migrations.
//!
//! Ratings persist to a local `SQLite` database when one is configured. The
//! schema is managed with Diesel migrations so the database can be created
//! and upgraded consistently across machines.

mod documents;
mod error;
mod migrator;

pub use documents::SqliteDocumentStore;
pub use error::PersistenceError;
pub use migrator::{
    CURRENT_SCHEMA_VERSION, INITIAL_SCHEMA_VERSION, SchemaVersion, migrate_database,
};
