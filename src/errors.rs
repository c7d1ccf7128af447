//! Error types for configuration storage
//!
//! `ConfigError` is returned by [`crate::services::ConfigService`] and mapped
//! onto structured GraphQL errors at the API boundary.

use thiserror::Error;

use crate::bench_file::ParseError;

/// Configuration storage errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration with this primary key
    #[error("Config {0} not found")]
    NotFound(i32),

    /// No configuration with this name
    #[error("Config named '{0}' not found")]
    NameNotFound(String),

    /// More than one configuration shares the requested name
    #[error("{count} configs are named '{name}'")]
    DuplicateName {
        /// Requested name
        name: String,
        /// Number of matching rows
        count: usize,
    },

    /// A bench configuration file could not be read
    #[error("Invalid bench file: {0}")]
    BenchFile(#[from] ParseError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl ConfigError {
    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::NotFound(_) | ConfigError::NameNotFound(_))
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) | ConfigError::NameNotFound(_) => "NOT_FOUND",
            ConfigError::DuplicateName { .. } => "CONFLICT",
            ConfigError::BenchFile(_) => "VALIDATION_FAILED",
            ConfigError::Database(_) => "DATABASE_ERROR",
        }
    }
}
