//! Static dispatch over the two Hagan model variants.
//!
//! Commands hold a [`SabrModel`] and never branch on the configured kind
//! themselves.

use sabr_core::types::PayoffType;
use sabr_models::models::{SabrHagan, SabrNormalHagan};

use crate::config::{CliConfig, ModelKind};
use crate::Result;

/// A configured SABR model, lognormal or normal.
#[derive(Debug, Clone)]
pub enum SabrModel {
    /// Black equivalent volatility
    Lognormal(SabrHagan<f64>),
    /// Bachelier equivalent volatility
    Normal(SabrNormalHagan<f64>),
}

impl SabrModel {
    /// Build the model, solver and bracket described by `config`.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let sabr = config.sabr_config()?;
        let solver = config.solver()?;
        let bracket = config.bracket()?;

        let model = match config.model.kind {
            ModelKind::Lognormal => {
                let model: SabrHagan<f64> = SabrHagan::with_solver(sabr, solver, bracket)?;
                SabrModel::Lognormal(model)
            }
            ModelKind::Normal => {
                let model: SabrNormalHagan<f64> =
                    SabrNormalHagan::with_solver(sabr, solver, bracket)?;
                SabrModel::Normal(model)
            }
        };
        Ok(model)
    }

    /// Configured kind.
    pub fn kind(&self) -> ModelKind {
        match self {
            SabrModel::Lognormal(_) => ModelKind::Lognormal,
            SabrModel::Normal(_) => ModelKind::Normal,
        }
    }

    /// Current sigma.
    pub fn sigma(&self) -> f64 {
        match self {
            SabrModel::Lognormal(m) => m.sigma(),
            SabrModel::Normal(m) => m.sigma(),
        }
    }

    /// Forward of `spot` at the model expiry.
    pub fn forward(&self, spot: f64) -> f64 {
        match self {
            SabrModel::Lognormal(m) => m.forward(spot, None),
            SabrModel::Normal(m) => m.forward(spot, None),
        }
    }

    /// Equivalent volatility for each strike.
    pub fn equivalent_vols(&self, strikes: &[f64], spot: f64) -> Vec<f64> {
        match self {
            SabrModel::Lognormal(m) => m.equivalent_vol_many(strikes, spot, None, None),
            SabrModel::Normal(m) => m.equivalent_vol_many(strikes, spot, None, None),
        }
    }

    /// Option price for each strike.
    pub fn prices(&self, strikes: &[f64], spot: f64, payoff: PayoffType) -> Vec<f64> {
        match self {
            SabrModel::Lognormal(m) => m.price_many(strikes, spot, None, None, payoff),
            SabrModel::Normal(m) => m.price_many(strikes, spot, None, None, payoff),
        }
    }

    /// Calibrate sigma to one quote and keep it.
    pub fn calibrate_sigma(
        &mut self,
        price: f64,
        strike: f64,
        spot: f64,
        payoff: PayoffType,
    ) -> Result<f64> {
        let sigma = match self {
            SabrModel::Lognormal(m) => m.calibrate_sigma(price, strike, spot, None, payoff, true)?,
            SabrModel::Normal(m) => m.calibrate_sigma(price, strike, spot, None, payoff, true)?,
        };
        Ok(sigma)
    }
}
