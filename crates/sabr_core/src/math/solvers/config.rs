//! Solver configuration types.

use num_traits::Float;

use crate::types::SolverError;

/// Configuration for root-finding algorithms.
///
/// Provides common settings shared across all solver implementations,
/// including convergence tolerance and iteration limits.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use sabr_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
/// assert!(config.max_iterations >= 50);
///
/// // Custom configuration
/// let custom = SolverConfig::new(1e-12, 200).unwrap();
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance for root finding.
    ///
    /// The solver stops when `|f(x)| < tolerance` or when the bracket
    /// half-width falls below it.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    ///
    /// If the solver doesn't converge within this limit,
    /// it returns `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values:
    /// - `tolerance`: 1e-10
    /// - `max_iterations`: 100
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::InvalidConfig` if `tolerance` is not a positive
    /// finite number or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        let config = Self {
            tolerance,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check a configuration that was built field-by-field (e.g. deserialised).
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > T::zero()) || !self.tolerance.is_finite() {
            return Err(SolverError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Tighter tolerance (1e-14) and more iterations (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap(),
            max_iterations: 500,
        }
    }

    /// Relaxed tolerance (1e-6) and fewer iterations (50).
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-6).unwrap(),
            max_iterations: 50,
        }
    }
}
