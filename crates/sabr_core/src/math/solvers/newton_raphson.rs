//! Newton-Raphson root-finding solver.

use num_traits::Float;

use super::{Bracket, SolverConfig};
use crate::types::SolverError;

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)`. Converges quadratically near a
/// simple root but may fail when the derivative vanishes or the starting
/// point is far away; the pricers therefore fall back to [`BrentSolver`]
/// when it reports an error.
///
/// [`BrentSolver`]: super::BrentSolver
///
/// # Example
///
/// ```
/// use sabr_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x * x - x - 2.0;
/// let f_prime = |x: f64| 3.0 * x * x - 1.0;
///
/// let root = solver.find_root(f, f_prime, 1.5).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` starting from `x0`, using the derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small to divide by
    /// * `Err(SolverError::NumericalInstability)` - An iterate became NaN or infinite
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0, |x| Ok(x))
    }

    /// Like [`find_root`](Self::find_root), but every iterate is clamped into
    /// `bracket`. Used where the unknown has a natural domain (volatility > 0).
    pub fn find_root_bounded<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        bracket: &Bracket<T>,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let clamp = |x: T| -> Result<T, SolverError> {
            Ok(x.max(bracket.lower()).min(bracket.upper()))
        };
        let start = clamp(x0)?;
        self.iterate(f, f_prime, start, clamp)
    }

    fn iterate<F, G, C>(&self, f: F, f_prime: G, x0: T, project: C) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
        C: Fn(T) -> Result<T, SolverError>,
    {
        let tiny = T::from(1e-30).unwrap();
        let mut x = x0;

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let slope = f_prime(x);
            if slope.abs() < tiny || slope.is_nan() {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            let next = x - f_val / slope;
            if !next.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
            x = project(next)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
