//! Errors returned by the bill calculation.

use thiserror::Error;

/// An input value violates a semantic constraint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input: {field} {message}")]
pub struct ValidationError {
    /// Name of the offending input field (e.g. `"solar_units"`).
    pub field: &'static str,
    /// Violated constraint.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure of a bill calculation. No partial result is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BillError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no tariff schedule registered for {utility} / {network} / {category}")]
    UnknownTariff {
        utility: String,
        network: String,
        category: String,
    },
}

/// Rejects negative or non-finite values.
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("must be >= 0, got {value}"),
        ));
    }
    Ok(())
}
