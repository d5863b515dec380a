//! Hagan SABR models.
//!
//! The SABR model describes a forward `F` and its volatility `σ` by
//! ```text
//! dF = σ·F^β·dW_F
//! dσ = α·σ·dW_σ
//! E[dW_F·dW_σ] = ρ·dt
//! ```
//! where:
//! - σ = volatility level (`sigma`)
//! - α = vol-of-vol (`alpha`)
//! - β = CEV exponent (0: normal, 1: lognormal)
//! - ρ = correlation between forward and volatility
//!
//! Hagan et al. (2002) give closed-form asymptotic volatilities that make a
//! Black or Bachelier pricer reproduce the SABR price. This module has:
//!
//! - [`mapper`]: the two equivalent-volatility functions and their slice forms
//! - [`HaganSabr`]: the model, generic over a [`HaganExpansion`] marker
//! - [`SabrHagan`]: lognormal model over a [`BlackScholes`](crate::analytical::BlackScholes) pricer
//! - [`SabrNormalHagan`]: normal model over a [`Bachelier`](crate::analytical::Bachelier) pricer
//!
//! ## Data Flow
//!
//! ```text
//! params ──mapper──▶ equivalent vol ──pricer──▶ price
//! price ──pricer.impvol──▶ target vol ──root finder──▶ sigma
//! ```
//!
//! ## Example
//!
//! ```
//! use sabr_models::models::sabr::{bsm_equiv_vol, SabrConfig, SabrHagan, SabrParams};
//!
//! // At the money with beta = 1: σ·(1 + T·((2-3ρ²)α²/24 + σαρ/4))
//! let vol = bsm_equiv_vol(100.0_f64, 100.0, 1.0, 0.2, 0.3, -0.3, 1.0);
//! assert!((vol - 0.2003975).abs() < 1e-12);
//!
//! let params = SabrParams::new(0.2, 0.3, -0.3, 1.0).unwrap();
//! let model = SabrHagan::new(SabrConfig::new(1.0, params, 0.0, 0.0).unwrap()).unwrap();
//! assert_eq!(model.equivalent_vol(100.0, 100.0, None, None), vol);
//! ```

mod error;
mod expansion;
mod hagan;
pub mod mapper;
mod normal_hagan;
mod params;

pub use error::SabrError;
pub use expansion::{HaganExpansion, Lognormal, Normal};
pub use hagan::{HaganSabr, SabrHagan};
pub use mapper::{
    bsm_equiv_vol, bsm_equiv_vol_many, normal_equiv_vol, normal_equiv_vol_many, x_over_z,
};
pub use normal_hagan::SabrNormalHagan;
pub use params::{SabrConfig, SabrParams};
