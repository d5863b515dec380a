//! Core traits shared by the pricing layers.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait)
//! - The volatility-driven pricer contract (`VolPricer` trait)
//!
//! Implementors are used through static dispatch: the SABR models take the
//! pricer as a type parameter rather than a trait object.

/// Generic floating-point trait for numeric computations.
///
/// # Examples
/// ```
/// use sabr_core::traits::Float;
///
/// fn forward<T: Float>(spot: T, carry: T, texp: T) -> T {
///     spot * (carry * texp).exp()
/// }
///
/// let fwd: f64 = forward(100.0, 0.05, 1.0);
/// assert!((fwd - 105.127110).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod pricer;

pub use pricer::VolPricer;
