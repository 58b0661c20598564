//! Error types for RookDB

use crate::types::DataType;
use thiserror::Error;

/// The main error type for RookDB operations
#[derive(Error, Debug)]
pub enum Error {
    // Schema errors
    #[error("Table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column already exists: {0}")]
    ColumnAlreadyExists(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    // Type errors
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: DataType, got: DataType },

    // Storage errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using RookDB's Error
pub type Result<T> = std::result::Result<T, Error>;
