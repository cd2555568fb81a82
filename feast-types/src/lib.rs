//! Core type definitions for the Feast entity model.
//!
//! This crate defines the plugin-agnostic pieces every entity conversion
//! depends on:
//! - [`ValueType`], the closed enumeration of join-key data kinds
//! - Timestamp conversion between `chrono`, the protobuf well-known
//!   `Timestamp`, and RFC 3339 text
//!
//! The entity type itself and its representations live in `feast-model`.

pub mod timestamp;
mod value_type;

pub use value_type::ValueType;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value type: {0}")]
    InvalidValueType(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
