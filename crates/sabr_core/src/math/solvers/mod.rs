//! Root-finding solvers for volatility inversion and SABR calibration.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Brackets
//!
//! Bracketing searches take an explicit [`Bracket`] rather than bare endpoints
//! hidden inside the caller. [`Bracket::lognormal_sigma`] and
//! [`Bracket::normal_sigma`] are the default search ranges for the SABR
//! sigma calibration. Any solver implementing [`BracketingSolver`] can be
//! injected into the SABR models.
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use sabr_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let config = SolverConfig::default();
//! let solver = NewtonRaphsonSolver::new(config);
//!
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let root = solver.find_root(f, f_prime, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```
//!
//! ```
//! use sabr_core::math::solvers::{Bracket, BracketingSolver, BrentSolver};
//! use sabr_core::types::SolverError;
//!
//! let solver: BrentSolver<f64> = BrentSolver::with_defaults();
//!
//! // x² + 1 has no sign change anywhere: the search fails loudly
//! let result = solver.find_root_in(|x| x * x + 1.0, &Bracket::lognormal_sigma());
//! assert!(matches!(result, Err(SolverError::NoBracket { .. })));
//! ```

mod bracket;
mod brent;
mod config;
mod newton_raphson;

// Re-export public types at module level
pub use bracket::{Bracket, BracketingSolver};
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
