use thiserror::Error;

/// Errors raised while checking a field against the catalogue.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The `type` discriminant is not part of the catalogue.
    #[error("unknown field type: {0}")]
    UnknownType(String),
    /// The field type declares required options but none were given.
    #[error("field type '{field_type}' requires options")]
    MissingOptions { field_type: &'static str },
    /// The options bag does not match the shape of the field type.
    #[error("invalid options for field type '{field_type}': {message}")]
    InvalidOptions {
        field_type: &'static str,
        message: String,
    },
}

/// Convenience alias for field model results.
pub type Result<T> = std::result::Result<T, FieldError>;
