//! Analytical pricers for European options.
//!
//! The two distributions the SABR expansions map onto:
//! - [`BlackScholes`]: lognormal dynamics, driven by a Black volatility
//! - [`Bachelier`]: normal dynamics, driven by an absolute (price-unit) volatility
//!
//! Both implement [`VolPricer`](sabr_core::traits::VolPricer): pricing with
//! optional expiry/volatility overrides and price → volatility inversion.
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**
//! - **Degenerate inputs are values, not errors**: expired options and zero
//!   volatilities price at (discounted) intrinsic value
//! - **Implied vol**: bounded Newton on vega, Brent fallback

pub mod bachelier;
pub mod black_scholes;
pub mod distributions;
pub mod error;
mod implied;

// Re-export main types at module level
pub use bachelier::Bachelier;
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
