//! RookDB Common - Core types shared across all crates
//!
//! This crate provides the foundational types used throughout RookDB:
//! - `DataType`: the fixed-width column type system
//! - `Value`: runtime value representation
//! - `Error`: unified error types

pub mod error;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use types::DataType;
pub use value::Value;
