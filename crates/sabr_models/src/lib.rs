//! # sabr_models: Hagan SABR Pricing
//!
//! ## Layer 2 Role
//!
//! Built on `sabr_core`, this crate provides:
//! - Black-Scholes and Bachelier pricers with implied volatility (`analytical`)
//! - Hagan's lognormal and normal equivalent volatilities (`models::sabr::mapper`)
//! - The lognormal and normal SABR models with sigma calibration (`models::sabr`)
//!
//! ## Design Principles
//!
//! - **Static dispatch**: a SABR model is generic over its pricer and its
//!   root finder, with defaults for the common case
//! - **Per-instance configuration**: every model owns a validated
//!   [`SabrConfig`](models::sabr::SabrConfig)
//! - **Loud failures**: a market price no sigma in the bracket can reproduce
//!   is an error, never a best-effort number
//!
//! ## Usage Example
//!
//! ```rust
//! use sabr_core::types::PayoffType;
//! use sabr_models::models::sabr::{SabrConfig, SabrHagan, SabrParams};
//!
//! let params = SabrParams::new(0.2_f64, 0.4, -0.3, 1.0).unwrap();
//! let mut model = SabrHagan::new(SabrConfig::new(0.5, params, 0.01, 0.0).unwrap()).unwrap();
//!
//! let smile = model.equivalent_vol_many(&[80.0, 100.0, 120.0], 100.0, None, None);
//! assert!(smile[0] > smile[1] && smile[1] > smile[2]);
//!
//! let quote = model.price(95.0, 100.0, None, Some(0.25), PayoffType::Put);
//! model
//!     .calibrate_sigma(quote, 95.0, 100.0, None, PayoffType::Put, true)
//!     .unwrap();
//! assert!((model.sigma() - 0.25).abs() < 1e-6);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for `SabrParams` and `SabrConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod models;
