//! Error types for the analytical pricers.

use sabr_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidExpiry`: Negative or non-finite time to expiry
/// - `PriceOutOfBounds`: Quoted price violates no-arbitrage bounds
/// - `NumericalInstability`: Implied volatility search failed
///
/// # Examples
/// ```
/// use sabr_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Volatility is negative or not finite.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Time to expiry is negative or not finite.
    #[error("Invalid expiry: T = {texp}")]
    InvalidExpiry {
        /// The invalid expiry
        texp: f64,
    },

    /// Option price lies outside `[lower, upper)`; no volatility reproduces it.
    #[error("Price {price} outside no-arbitrage bounds [{lower}, {upper})")]
    PriceOutOfBounds {
        /// Quoted price
        price: f64,
        /// Discounted intrinsic value
        lower: f64,
        /// Price as volatility tends to infinity
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidExpiry { .. }
            | AnalyticalError::PriceOutOfBounds { .. } => PricingError::InvalidInput(err.to_string()),
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
