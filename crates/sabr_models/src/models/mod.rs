//! Volatility models built on the analytical pricers.
//!
//! - [`sabr`]: Hagan SABR, lognormal and normal variants

pub mod sabr;

pub use sabr::{HaganSabr, SabrConfig, SabrError, SabrHagan, SabrNormalHagan, SabrParams};
