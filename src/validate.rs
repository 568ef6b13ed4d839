//! Precondition checks shared by constructors.

use crate::error::ValidationError;

/// Returns `value` unchanged if it is strictly positive.
///
/// # Errors
///
/// Returns `ValidationError::NonPositive` naming `field` if `value <= 0`.
pub fn require_positive(value: i64, field: &str) -> Result<i64, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// Unwraps a required builder argument.
///
/// # Errors
///
/// Returns `ValidationError::MissingArgument` naming `field` if `value` is `None`.
pub fn require_present<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::MissingArgument {
        field: field.to_string(),
    })
}
