//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for fancy diagnostic output and thiserror for derive macros.
//! The error types are storage-backend agnostic.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(itinerary::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Invalid data: {message} (hint: {help})")]
    #[diagnostic(code(itinerary::db::invalid_data))]
    InvalidData { message: String, help: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(itinerary::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(itinerary::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(itinerary::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(itinerary::db::connection_error))]
    Connection { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(code(itinerary::db::constraint))]
    Constraint { message: String },
}

impl DbError {
    /// Whether the storage layer itself rejected the operation.
    ///
    /// Write-path failures split into storage failures (this returns true)
    /// and creation failures caused by the input (this returns false).
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            DbError::Database { .. }
                | DbError::Migration { .. }
                | DbError::Connection { .. }
                | DbError::Constraint { .. }
        )
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
