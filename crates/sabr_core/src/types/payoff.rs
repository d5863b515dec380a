//! Call/put payoff direction.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::PricingError;

/// Direction of a vanilla European payoff.
///
/// Closed type over the +1 call / -1 put sign convention;
/// [`PayoffType::sign`] recovers the numeric sign for the pricing formulas.
///
/// # Examples
/// ```
/// use sabr_core::types::PayoffType;
///
/// assert_eq!(PayoffType::Call.sign::<f64>(), 1.0);
/// assert_eq!(PayoffType::from_sign(-1).unwrap(), PayoffType::Put);
/// assert_eq!("put".parse::<PayoffType>().unwrap(), PayoffType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PayoffType {
    /// Call option: max(S - K, 0)
    #[default]
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl PayoffType {
    /// +1 for a call, -1 for a put.
    #[inline]
    pub fn sign<T: Float>(self) -> T {
        match self {
            PayoffType::Call => T::one(),
            PayoffType::Put => -T::one(),
        }
    }

    /// Convert an integer sign convention into a payoff type.
    ///
    /// # Errors
    /// Returns `PricingError::InvalidInput` for anything other than +1 or -1.
    pub fn from_sign(cp_sign: i32) -> Result<Self, PricingError> {
        match cp_sign {
            1 => Ok(PayoffType::Call),
            -1 => Ok(PayoffType::Put),
            other => Err(PricingError::InvalidInput(format!(
                "cp_sign must be +1 or -1, got {}",
                other
            ))),
        }
    }

    /// Intrinsic value `max(sign·(forward - strike), 0)`.
    #[inline]
    pub fn intrinsic<T: Float>(self, forward: T, strike: T) -> T {
        (self.sign::<T>() * (forward - strike)).max(T::zero())
    }
}

impl FromStr for PayoffType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(PayoffType::Call),
            "put" | "p" => Ok(PayoffType::Put),
            _ => Err(PricingError::InvalidInput(format!(
                "unknown payoff type: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => write!(f, "call"),
            PayoffType::Put => write!(f, "put"),
        }
    }
}
