//! # sabr_core: Numerical Foundation for Hagan SABR Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! sabr_core is the bottom layer of the workspace, providing:
//! - Root-finding solvers and validated search brackets (`math::solvers`)
//! - The pricer contract implemented by lognormal and normal pricers (`traits::pricer`)
//! - Call/put payoff sign type (`types::payoff`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other sabr_* crates:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use sabr_core::math::solvers::{Bracket, BracketingSolver, BrentSolver};
//! use sabr_core::types::PayoffType;
//!
//! // Bracketed root search
//! let solver: BrentSolver<f64> = BrentSolver::with_defaults();
//! let bracket = Bracket::new(0.0, 2.0).unwrap();
//! let root = solver.find_root_in(|x| x * x - 2.0, &bracket).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//!
//! // Payoff signs
//! assert_eq!(PayoffType::Put.sign::<f64>(), -1.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for solver configuration, brackets,
//!   payoff types and solver errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
