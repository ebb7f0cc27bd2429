//! Field-level validation errors for decoded models
//!
//! These errors describe why a single wire field could not be turned into its
//! typed counterpart. They surface through serde as decode failures and convert
//! into the crate-wide [`crate::error::Error`].

use std::fmt;
use thiserror::Error;

/// A wire field that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The kind of validation error
    pub kind: ValidationErrorKind,
    /// The wire name of the field that failed validation
    pub field: String,
    /// Optional additional context
    pub context: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            context: None,
        }
    }

    /// Create a validation error with additional context
    pub fn with_context(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            context: Some(context.into()),
        }
    }

    /// Shorthand for a required field that was absent
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::RequiredField, field)
    }

    /// Shorthand for a string outside a closed set
    pub fn invalid_enum(field: impl Into<String>, value: &str, expected: &'static str) -> Self {
        Self::with_context(
            ValidationErrorKind::InvalidEnumValue { expected },
            field,
            format!("got {:?}", value),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(ctx) => write!(
                f,
                "Validation failed for field '{}': {} - {}",
                self.field, self.kind, ctx
            ),
            None => write!(
                f,
                "Validation failed for field '{}': {}",
                self.field, self.kind
            ),
        }
    }
}

/// Specific validation error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Field is required but missing
    #[error("Required field is missing")]
    RequiredField,

    /// String is not one of the known values
    #[error("Unknown value (expected one of: {expected})")]
    InvalidEnumValue { expected: &'static str },

    /// Invalid ISO-8601 / unix timestamp
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Invalid calendar date
    #[error("Invalid date (expected YYYY-MM-DD)")]
    InvalidDate,

    /// Template id without a `Type:id` separator
    #[error("Invalid template id (expected Type:id)")]
    InvalidTemplateId,

    /// Discriminator value with no matching variant
    #[error("No variant matches discriminator")]
    UnknownDiscriminator,

    /// Rating board named after an unknown authority
    #[error("Unknown rating authority")]
    UnknownRatingAuthority,

    /// Rating value not issued by the board's authority
    #[error("Rating does not belong to authority")]
    InvalidRating,

    /// Custom validation error
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collection of validation errors
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation error to the collection
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record the error side of a result, passing the value through
    pub fn check<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(e);
                None
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Convert to a Result
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed with {} error(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  - {}", error)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}

impl From<ValidationErrors> for crate::error::Error {
    fn from(err: ValidationErrors) -> Self {
        crate::error::Error::validation(err.to_string())
    }
}
