//! Configuration for the reporting portal.
//!
//! The database path is an explicit setting injected into every entry point.
//! There is intentionally no module-level global: tests point a `Settings` at
//! a temporary fixture database.

use std::path::PathBuf;

use crate::repository::ReportRepository;

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_FILE: &str = "immunisation.db";

/// Runtime settings for the portal.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the pre-existing statistics database. Opened read-only.
    pub database: PathBuf,
}

impl Settings {
    /// Build settings from an optional CLI/env override.
    pub fn load(database: Option<PathBuf>) -> Self {
        Self {
            database: database.unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE)),
        }
    }

    /// Create a repository bound to the configured database.
    pub fn repository(&self) -> ReportRepository {
        ReportRepository::new(self.database.clone())
    }
}
