//! Numerical methods shared by the pricing layers.
//!
//! - [`solvers`]: root finders and search brackets

pub mod solvers;
