//! Brent's method root-finding solver.

use num_traits::Float;

use super::{Bracket, BracketingSolver, SolverConfig};
use crate::types::SolverError;

/// Brent's method root finder.
///
/// Combines bisection, the secant rule and inverse quadratic interpolation.
/// No derivative is needed and convergence is guaranteed for a continuous
/// function whose values at the two endpoints differ in sign. This is the
/// default solver behind the SABR sigma calibration.
///
/// # Example
///
/// ```
/// use sabr_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> Default for BrentSolver<T> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` between `a` and `b`.
    ///
    /// The endpoints may be given in either order. A root sitting exactly on
    /// an endpoint is accepted. Every point evaluated after the endpoints
    /// lies strictly between them, so the returned root is always inside
    /// the starting interval.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket has shrunk below tolerance
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let zero = T::zero();
        let (mut prev, mut best) = (a, b);
        let (mut f_prev, mut f_best) = (f(prev), f(best));

        if f_prev * f_best > zero || f_prev.is_nan() || f_best.is_nan() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }
        if f_prev == zero {
            return Ok(prev);
        }
        if f_best == zero {
            return Ok(best);
        }

        let two = T::from(2.0).unwrap();
        let half = T::from(0.5).unwrap();
        let tol = self.config.tolerance;

        // `contra` brackets the root together with `best`: f(contra)·f(best) < 0
        let mut contra = best;
        let mut f_contra = f_best;
        let mut step = best - prev;
        let mut last_step = step;

        for _ in 0..self.config.max_iterations {
            if !opposite_sign(f_best, f_contra) {
                contra = prev;
                f_contra = f_prev;
                step = best - prev;
                last_step = step;
            }

            // `best` always carries the smallest |f| seen so far
            if f_contra.abs() < f_best.abs() {
                prev = best;
                best = contra;
                contra = prev;
                f_prev = f_best;
                f_best = f_contra;
                f_contra = f_prev;
            }

            let tol_step = two * T::epsilon() * best.abs() + half * tol;
            let half_width = half * (contra - best);
            if f_best.abs() < tol || half_width.abs() <= tol_step {
                return Ok(best);
            }

            let interpolated = if last_step.abs() >= tol_step && f_prev.abs() > f_best.abs() {
                interpolation_step(
                    (prev, f_prev),
                    (best, f_best),
                    (contra, f_contra),
                    half_width,
                    last_step,
                    tol_step,
                )
            } else {
                None
            };
            match interpolated {
                Some(candidate) => {
                    last_step = step;
                    step = candidate;
                }
                None => {
                    step = half_width;
                    last_step = half_width;
                }
            }

            prev = best;
            f_prev = f_best;
            best = if step.abs() > tol_step {
                best + step
            } else if half_width > zero {
                best + tol_step
            } else {
                best - tol_step
            };
            f_best = f(best);
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

impl<T: Float> BracketingSolver<T> for BrentSolver<T> {
    fn find_root_in<F>(&self, f: F, bracket: &Bracket<T>) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let root = self.find_root(f, bracket.lower(), bracket.upper())?;
        debug_assert!(bracket.contains(root));
        Ok(root)
    }
}

#[inline]
fn opposite_sign<T: Float>(x: T, y: T) -> bool {
    (x > T::zero() && y < T::zero()) || (x < T::zero() && y > T::zero())
}

/// Inverse quadratic (or secant) step from `b` towards `c`, or `None` when
/// bisection is safer.
///
/// The step is accepted only if it lands inside `[b, b + 3/4·(c - b)]` and
/// is smaller than half the step before last.
fn interpolation_step<T: Float>(
    (a, fa): (T, T),
    (b, fb): (T, T),
    (c, fc): (T, T),
    half_width: T,
    last_step: T,
    tol_step: T,
) -> Option<T> {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();

    let s = fb / fa;
    let (mut p, mut q) = if a == c {
        (two * half_width * s, one - s)
    } else {
        let q = fa / fc;
        let r = fb / fc;
        (
            s * (two * half_width * q * (q - r) - (b - a) * (r - one)),
            (q - one) * (r - one) * (s - one),
        )
    };

    // Fold the direction into q so that p >= 0 and p/q points towards c
    if p > T::zero() {
        q = -q;
    }
    p = p.abs();

    let max_interp = three * half_width * q - (tol_step * q).abs();
    let max_shrink = (last_step * q).abs();
    if two * p < max_interp.min(max_shrink) {
        Some(p / q)
    } else {
        None
    }
}
