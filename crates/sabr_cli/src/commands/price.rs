//! Price command implementation
//!
//! Prices a European option strip with the configured SABR model.

use sabr_core::types::PayoffType;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::model::SabrModel;
use crate::output::{emit, OutputFormat};
use crate::{CliError, Result};

/// One priced strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub strike: f64,
    pub vol: f64,
    pub price: f64,
}

/// Price every strike, returning rows in input order.
pub fn compute(
    config: &CliConfig,
    strikes: &[f64],
    spot: f64,
    payoff: PayoffType,
) -> Result<Vec<PriceRow>> {
    if strikes.is_empty() {
        return Err(CliError::invalid_argument("at least one strike is required"));
    }
    let model = SabrModel::from_config(config)?;
    let vols = model.equivalent_vols(strikes, spot);
    let prices = model.prices(strikes, spot, payoff);

    Ok(strikes
        .iter()
        .zip(vols)
        .zip(prices)
        .map(|((&strike, vol), price)| PriceRow { strike, vol, price })
        .collect())
}

/// Run the price command
pub fn run(
    config: &CliConfig,
    strikes: &[f64],
    spot: f64,
    payoff: PayoffType,
    format: OutputFormat,
) -> Result<()> {
    info!(
        kind = %config.model.kind,
        strikes = strikes.len(),
        spot,
        %payoff,
        "Pricing strike strip"
    );

    let rows = compute(config, strikes, spot, payoff)?;
    let table: Vec<Vec<f64>> = rows.iter().map(|r| vec![r.strike, r.vol, r.price]).collect();
    emit(format, &["Strike", "Vol", "Price"], &table, &rows)
}
