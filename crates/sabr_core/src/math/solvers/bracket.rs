//! Search brackets and the bracketing solver abstraction.

use num_traits::Float;

use crate::types::SolverError;

/// Closed search interval `[lower, upper]` for a bracketing root finder.
///
/// Invariant: both endpoints are finite and `lower < upper`.
///
/// # Example
///
/// ```
/// use sabr_core::math::solvers::Bracket;
///
/// let bracket = Bracket::new(0.0_f64, 10.0).unwrap();
/// assert_eq!(bracket.lower(), 0.0);
/// assert!(bracket.contains(5.0));
///
/// assert!(Bracket::new(1.0_f64, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBracket<T>"))]
pub struct Bracket<T: Float> {
    lower: T,
    upper: T,
}

/// Unchecked wire form; deserialisation goes through [`Bracket::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBracket<T> {
    lower: T,
    upper: T,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<RawBracket<T>> for Bracket<T> {
    type Error = SolverError;

    fn try_from(raw: RawBracket<T>) -> Result<Self, Self::Error> {
        Self::new(raw.lower, raw.upper)
    }
}

impl<T: Float> Bracket<T> {
    /// Create a bracket.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidBracket` if an endpoint is not finite or
    /// `lower >= upper`.
    pub fn new(lower: T, upper: T) -> Result<Self, SolverError> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(SolverError::InvalidBracket {
                a: lower.to_f64().unwrap_or(f64::NAN),
                b: upper.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Search range `[0, 10]` for the sigma of the lognormal SABR model.
    pub fn lognormal_sigma() -> Self {
        Self {
            lower: T::zero(),
            upper: T::from(10.0).unwrap(),
        }
    }

    /// Search range `[0, 50]` for the sigma of the normal SABR model.
    ///
    /// Normal vols are quoted on the price scale and need the wider range.
    pub fn normal_sigma() -> Self {
        Self {
            lower: T::zero(),
            upper: T::from(50.0).unwrap(),
        }
    }

    /// Left endpoint.
    #[inline]
    pub fn lower(&self) -> T {
        self.lower
    }

    /// Right endpoint.
    #[inline]
    pub fn upper(&self) -> T {
        self.upper
    }

    /// Whether `x` lies inside the closed interval.
    #[inline]
    pub fn contains(&self, x: T) -> bool {
        x >= self.lower && x <= self.upper
    }
}

/// A 1-D root finder that searches a [`Bracket`].
///
/// Implementations must fail with [`SolverError::NoBracket`] when the
/// function does not change sign over the bracket, rather than returning
/// an endpoint or an extrapolated value.
pub trait BracketingSolver<T: Float> {
    /// Find a root of `f` inside `bracket`.
    fn find_root_in<F>(&self, f: F, bracket: &Bracket<T>) -> Result<T, SolverError>
    where
        F: Fn(T) -> T;
}
