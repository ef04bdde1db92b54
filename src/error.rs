// src/error.rs
use thiserror::Error;

/// Error taxonomy for the pricing core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Input outside the accepted range (non-positive strike, zero path count, ...)
    #[error("Invalid argument '{parameter}' = {value}: {constraint}")]
    InvalidArgument {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Input for which the model formula is undefined (σ = 0 or T = 0 in d1)
    #[error("Domain error for '{parameter}' = {value}: {reason}")]
    DomainError {
        parameter: String,
        value: f64,
        reason: String,
    },

    /// Computation produced a non-finite or otherwise unusable value
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },
}

impl PricingError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PricingError::InvalidArgument { .. })
    }

    pub fn is_domain_error(&self) -> bool {
        matches!(self, PricingError::DomainError { .. })
    }
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    fn invalid(name: &str, value: f64, constraint: &str) -> PricingError {
        PricingError::InvalidArgument {
            parameter: name.to_string(),
            value,
            constraint: constraint.to_string(),
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(invalid(name, value, "must be finite (not NaN or infinite)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(invalid(name, value, "must be positive (> 0)"))
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is finite and non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(invalid(name, value, "must be non-negative (≥ 0)"))
        } else {
            Ok(())
        }
    }

    /// Reject a zero value whose presence would make a formula undefined
    pub fn validate_nonzero_domain(name: &str, value: f64, reason: &str) -> PricingResult<()> {
        if value == 0.0 {
            Err(PricingError::DomainError {
                parameter: name.to_string(),
                value,
                reason: reason.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a strike price
    pub fn validate_strike(k: f64) -> PricingResult<()> {
        validate_positive("k", k)
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> PricingResult<()> {
        if paths == 0 {
            Err(invalid("n_paths", 0.0, "must be at least 1"))
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> PricingResult<()> {
        if steps == 0 {
            Err(invalid("n_steps", 0.0, "must be at least 1"))
        } else {
            Ok(())
        }
    }

    /// Validate that an ensemble of `paths × (steps + 1)` prices is addressable
    pub fn validate_ensemble_size(paths: usize, steps: usize) -> PricingResult<usize> {
        validate_paths(paths)?;
        validate_steps(steps)?;
        steps
            .checked_add(1)
            .and_then(|cols| cols.checked_mul(paths))
            .ok_or_else(|| {
                invalid(
                    "n_paths",
                    paths as f64,
                    &format!("ensemble of {} paths x {} steps overflows memory", paths, steps),
                )
            })
    }
}
