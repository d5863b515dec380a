//! Error type for the SABR models.

use sabr_core::types::{PricingError, SolverError};
use thiserror::Error;

/// SABR model errors.
///
/// # Variants
///
/// - `InvalidParameter`: a parameter is outside its domain
/// - `ShapeMismatch`: strike and forward slices cannot be broadcast together
/// - `Pricing`: the underlying pricer rejected its inputs (e.g. the market
///   price is outside no-arbitrage bounds)
/// - `RootBracketFailure`: the sigma search bracket contains no sign change
/// - `CalibrationFailed`: the root finder did not converge
///
/// # Examples
///
/// ```
/// use sabr_models::models::sabr::SabrError;
///
/// let err = SabrError::InvalidParameter {
///     name: "rho",
///     value: 1.5,
///     reason: "must lie in (-1, 1)",
/// };
/// assert!(format!("{}", err).contains("rho = 1.5"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SabrError {
    /// Parameter outside its domain.
    #[error("Invalid SABR parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
        /// Domain the value must lie in
        reason: &'static str,
    },

    /// Strike and forward slices have different, non-unit lengths.
    #[error("Shape mismatch: {strikes} strikes cannot broadcast against {forwards} forwards")]
    ShapeMismatch {
        /// Number of strikes
        strikes: usize,
        /// Number of forwards
        forwards: usize,
    },

    /// Error from the underlying lognormal/normal pricer.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// No sigma inside the search bracket reproduces the target volatility.
    #[error(
        "Root bracket failure: no sigma in [{lower}, {upper}] reproduces target volatility {target_vol}"
    )]
    RootBracketFailure {
        /// Lower end of the sigma bracket
        lower: f64,
        /// Upper end of the sigma bracket
        upper: f64,
        /// Volatility implied by the market price
        target_vol: f64,
    },

    /// The root finder gave up before converging.
    #[error("Sigma calibration failed: {0}")]
    CalibrationFailed(SolverError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = SabrError::InvalidParameter {
            name: "beta",
            value: 1.2,
            reason: "must lie in [0, 1]",
        };
        assert_eq!(
            format!("{}", err),
            "Invalid SABR parameter: beta = 1.2 (must lie in [0, 1])"
        );
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = SabrError::ShapeMismatch {
            strikes: 3,
            forwards: 2,
        };
        assert!(format!("{}", err).contains("3 strikes"));
    }

    #[test]
    fn test_root_bracket_failure_message() {
        let err = SabrError::RootBracketFailure {
            lower: 0.0,
            upper: 10.0,
            target_vol: 12.5,
        };
        assert_eq!(
            format!("{}", err),
            "Root bracket failure: no sigma in [0, 10] reproduces target volatility 12.5"
        );
    }

    #[test]
    fn test_from_pricing_error() {
        let err: SabrError = PricingError::InvalidInput("price below intrinsic".to_string()).into();
        match err {
            SabrError::Pricing(inner) => assert!(inner.to_string().contains("intrinsic")),
            other => panic!("Expected Pricing, got {:?}", other),
        }
    }

    #[test]
    fn test_calibration_failed_wraps_solver_error() {
        let err = SabrError::CalibrationFailed(SolverError::MaxIterationsExceeded { iterations: 100 });
        assert!(format!("{}", err).contains("100 iterations"));
    }
}
