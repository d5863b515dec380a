//! Calibrate command implementation
//!
//! Solves for the sigma that reproduces one quoted option price.

use sabr_core::types::PayoffType;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::model::SabrModel;
use crate::output::{emit, OutputFormat};
use crate::Result;

/// Calibration outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationRow {
    pub strike: f64,
    pub price: f64,
    pub sigma: f64,
    /// Price of the calibrated model at the same strike.
    pub repriced: f64,
}

/// Calibrate sigma to the quote and reprice with the result.
pub fn compute(
    config: &CliConfig,
    price: f64,
    strike: f64,
    spot: f64,
    payoff: PayoffType,
) -> Result<CalibrationRow> {
    let mut model = SabrModel::from_config(config)?;
    let sigma = model.calibrate_sigma(price, strike, spot, payoff).map_err(|err| {
        warn!(price, strike, spot, error = %err, "Calibration failed");
        err
    })?;
    let repriced = model.prices(&[strike], spot, payoff)[0];

    Ok(CalibrationRow {
        strike,
        price,
        sigma,
        repriced,
    })
}

/// Run the calibrate command
pub fn run(
    config: &CliConfig,
    price: f64,
    strike: f64,
    spot: f64,
    payoff: PayoffType,
    format: OutputFormat,
) -> Result<()> {
    info!(kind = %config.model.kind, price, strike, spot, %payoff, "Starting calibration");

    let row = compute(config, price, strike, spot, payoff)?;
    info!(sigma = row.sigma, "Calibration complete");

    let table = vec![vec![row.strike, row.price, row.sigma, row.repriced]];
    emit(format, &["Strike", "Price", "Sigma", "Repriced"], &table, &row)
}
