//! Domain error model.

use thiserror::Error;

/// Result alias for every pure domain operation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business-rule failure.
///
/// Storage, token and access failures have their own error types in the
/// crates that own those concerns.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before any state changed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A derived-state rule would be broken (e.g. negative stock).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An id string did not parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("not found")]
    NotFound,

    /// Stale version on write-back.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// Reject blank (empty or whitespace-only) text fields.
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Reject NaN, infinite and negative amounts (prices, salaries).
pub fn require_non_negative_amount(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a finite, non-negative amount"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_non_blank("name", "Widget").is_ok());
        assert_eq!(
            require_non_blank("name", "   "),
            Err(DomainError::validation("name cannot be empty"))
        );
    }

    #[test]
    fn amounts_must_be_finite_and_non_negative() {
        assert!(require_non_negative_amount("price", 0.0).is_ok());
        assert!(require_non_negative_amount("price", 12.5).is_ok());
        assert!(require_non_negative_amount("price", -0.01).is_err());
        assert!(require_non_negative_amount("price", f64::NAN).is_err());
        assert!(require_non_negative_amount("price", f64::INFINITY).is_err());
    }
}
