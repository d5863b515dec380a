//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors raised through the pricer contract
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Categorised pricing errors.
///
/// Returned by implementors of [`VolPricer`](crate::traits::pricer::VolPricer),
/// typically when a quoted price cannot be inverted to a volatility.
///
/// # Examples
/// ```
/// use sabr_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative expiry".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative expiry");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `InvalidBracket`: Bracket endpoints are not finite or not ordered
/// - `InvalidConfig`: Solver configuration is out of range
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use sabr_core::types::SolverError;
///
/// let err = SolverError::NoBracket { a: 0.0, b: 10.0 };
/// assert!(format!("{}", err).contains("same sign"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Bracket endpoints are not finite or `a >= b`.
    #[error("Invalid bracket [{a}, {b}]")]
    InvalidBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Solver configuration is out of range.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::InvalidBracket { .. } | SolverError::InvalidConfig(_) => {
                PricingError::InvalidInput(err.to_string())
            }
            _ => PricingError::NumericalInstability(err.to_string()),
        }
    }
}
