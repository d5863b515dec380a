//! Normal SABR model: Hagan's normal volatility fed to a Bachelier pricer.

use num_traits::Float;
use sabr_core::math::solvers::{Bracket, BrentSolver};

use super::error::SabrError;
use super::expansion::Normal;
use super::hagan::HaganSabr;
use super::params::SabrConfig;
use crate::analytical::Bachelier;

/// SABR model with `beta = 0`, priced through its normal equivalent volatility.
///
/// Same surface as [`SabrHagan`](super::SabrHagan), with the normal
/// expansion, a normal pricer and a default sigma bracket of `[0, 50]` since
/// normal volatilities are quoted in price units. `params.beta` is ignored.
///
/// # Examples
///
/// ```
/// use sabr_core::types::PayoffType;
/// use sabr_models::models::sabr::{SabrConfig, SabrNormalHagan, SabrParams};
///
/// let params = SabrParams::normal(20.0_f64, 0.3, 0.1).unwrap();
/// let config = SabrConfig::new(1.0, params, 0.0, 0.0).unwrap();
/// let mut model = SabrNormalHagan::new(config).unwrap();
///
/// let price = model.price(110.0, 100.0, None, Some(25.0), PayoffType::Call);
/// let sigma = model
///     .calibrate_sigma(price, 110.0, 100.0, None, PayoffType::Call, true)
///     .unwrap();
/// assert!((sigma - 25.0).abs() < 1e-6);
/// assert_eq!(model.sigma(), sigma);
/// ```
pub type SabrNormalHagan<T, P = Bachelier<T>, S = BrentSolver<T>> = HaganSabr<T, Normal, P, S>;

impl<T: Float> HaganSabr<T, Normal, Bachelier<T>, BrentSolver<T>> {
    /// Normal SABR model with a Bachelier pricer and Brent on `[0, 50]`.
    pub fn new(config: SabrConfig<T>) -> Result<Self, SabrError> {
        Self::with_solver(config, BrentSolver::with_defaults(), Bracket::normal_sigma())
    }
}
