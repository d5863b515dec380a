//! Core value and error types.
//!
//! This module provides:
//! - `payoff`: Call/put direction and its sign
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! - [`PayoffType`] from `payoff`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod payoff;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use payoff::PayoffType;
