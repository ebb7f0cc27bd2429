//! Error handling module for fnmodels
//!
//! This module defines the crate-wide error type. Field-level failures are
//! described by [`crate::models::ValidationError`] and reach callers either
//! inside a [`Error::Decode`] (when raised through serde) or as
//! [`Error::Validation`].

use thiserror::Error;

/// Result type alias for fnmodels operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fnmodels
#[derive(Error, Debug)]
pub enum Error {
    /// A payload could not be decoded into the named entity
    #[error("Failed to decode {entity}: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Validation errors outside of serde decoding
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors, e.g. when rendering a decoded record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload kind outside the decodable set
    #[error("Unknown payload kind: {0}")]
    UnknownKind(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a decode error for `entity`
    pub fn decode(entity: &'static str, source: serde_json::Error) -> Self {
        Error::Decode { entity, source }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// The wire key a decode failed on, when the failure was a missing key
    pub fn missing_field(&self) -> Option<String> {
        let Error::Decode { source, .. } = self else {
            return None;
        };
        // serde reports "missing field `name`", optionally followed by a position
        let message = source.to_string();
        let rest = message.split_once("missing field `")?.1;
        rest.split_once('`').map(|(field, _)| field.to_string())
    }

    /// Check if this error came from malformed input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::Decode { .. } | Error::Validation(_) | Error::UnknownKind(_)
        )
    }

    /// Short machine-readable name of the error variant
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::Decode { .. } => "decode_error",
            Error::Validation(_) => "validation_error",
            Error::Serialization(_) => "serialization_error",
            Error::Config(_) => "configuration_error",
            Error::Io(_) => "io_error",
            Error::UnknownKind(_) => "unknown_kind",
            Error::Internal(_) => "internal_error",
        }
    }
}

/// Convert from envconfig::Error to our Error type
impl From<envconfig::Error> for Error {
    fn from(err: envconfig::Error) -> Self {
        Error::Config(err.to_string())
    }
}
