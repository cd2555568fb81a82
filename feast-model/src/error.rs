//! Error types for the entity model.

use thiserror::Error;

/// Result type for entity operations.
pub type FeastResult<T> = Result<T, FeastError>;

/// Errors that can occur while validating or converting entities.
#[derive(Debug, Error)]
pub enum FeastError {
    /// Entity failed local validation.
    #[error("{0}")]
    Validation(String),

    /// An entity was compared against a value of another type.
    #[error("comparisons should only involve Entity objects, found {found}")]
    TypeMismatch { found: String },

    /// YAML input could not be turned into the requested documents.
    #[error("invalid YAML provided: {0}")]
    Loader(String),

    /// Reading a YAML file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or rendering failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Dictionary did not match the entity message shape.
    #[error("dictionary error: {0}")]
    Dict(#[from] serde_json::Error),

    /// Protobuf bytes could not be decoded.
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Value type or timestamp conversion failed.
    #[error(transparent)]
    Types(#[from] feast_types::Error),
}
