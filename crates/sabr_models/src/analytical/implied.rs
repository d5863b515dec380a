//! Shared implied-volatility search for the analytical pricers.

use num_traits::Float;
use sabr_core::math::solvers::{
    Bracket, BracketingSolver, BrentSolver, NewtonRaphsonSolver, SolverConfig,
};
use tracing::debug;

use super::error::AnalyticalError;

/// Absolute price tolerance of the implied volatility search.
const IMPVOL_TOLERANCE: f64 = 1e-12;

/// Smallest volatility the search will return (other than an exact zero).
const MIN_IMPLIED_VOL: f64 = 1e-8;

/// Search bracket `[MIN_IMPLIED_VOL, upper]`.
pub(crate) fn vol_bracket<T: Float>(upper: T) -> Result<Bracket<T>, AnalyticalError> {
    Bracket::new(T::from(MIN_IMPLIED_VOL).unwrap(), upper).map_err(|err| {
        AnalyticalError::NumericalInstability {
            message: err.to_string(),
        }
    })
}

/// Solve `objective(vol) = 0` with bounded Newton on `vega`, then Brent.
///
/// `objective` must be increasing in vol, i.e. model price minus quote.
pub(crate) fn solve_implied_vol<T, F, G>(
    objective: F,
    vega: G,
    guess: T,
    bracket: &Bracket<T>,
) -> Result<T, AnalyticalError>
where
    T: Float,
    F: Fn(T) -> T,
    G: Fn(T) -> T,
{
    let config = SolverConfig {
        tolerance: T::from(IMPVOL_TOLERANCE).unwrap(),
        max_iterations: 100,
    };

    match NewtonRaphsonSolver::new(config).find_root_bounded(&objective, &vega, guess, bracket) {
        Ok(vol) => return Ok(vol),
        Err(err) => debug!(error = %err, "newton implied vol failed, falling back to brent"),
    }

    BrentSolver::new(config)
        .find_root_in(&objective, bracket)
        .map_err(|err| AnalyticalError::NumericalInstability {
            message: format!("implied volatility search failed: {}", err),
        })
}
