use thiserror::Error;

/// Validation errors for claim primitives and record fields.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a required text field is empty or whitespace-only.
    #[error("{field} must not be empty")]
    Blank {
        /// Field name that was blank.
        field: &'static str,
    },
    /// When a numeric value is NaN or infinite.
    #[error("{field} ({value}) is not a finite number")]
    NonFinite {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// When a numeric value exceeds its bounds.
    #[error("{field} ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Trims `value` and returns it, or a [`ValidationError::Blank`] when
/// nothing remains.
pub fn require_nonblank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}

/// Rejects NaN and infinities.
pub fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field, value });
    }
    Ok(value)
}
