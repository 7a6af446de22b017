use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A path setting is empty.
    #[error("`{0}` cannot be empty")]
    EmptyPath(&'static str),
    /// A field has a value that violates its constraint.
    #[error("Invalid value for `{field}`: {constraint}")]
    InvalidFieldValue {
        field: &'static str,
        constraint: &'static str,
    },
}
