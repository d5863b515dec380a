//! Vol command implementation
//!
//! Prints the SABR equivalent volatility smile.

use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::model::SabrModel;
use crate::output::{emit, OutputFormat};
use crate::{CliError, Result};

/// One point of the smile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolRow {
    pub strike: f64,
    pub forward: f64,
    pub vol: f64,
}

/// Equivalent volatility at every strike.
pub fn compute(config: &CliConfig, strikes: &[f64], spot: f64) -> Result<Vec<VolRow>> {
    if strikes.is_empty() {
        return Err(CliError::invalid_argument("at least one strike is required"));
    }
    let model = SabrModel::from_config(config)?;
    let forward = model.forward(spot);

    Ok(strikes
        .iter()
        .zip(model.equivalent_vols(strikes, spot))
        .map(|(&strike, vol)| VolRow {
            strike,
            forward,
            vol,
        })
        .collect())
}

/// Run the vol command
pub fn run(config: &CliConfig, strikes: &[f64], spot: f64, format: OutputFormat) -> Result<()> {
    info!(kind = %config.model.kind, strikes = strikes.len(), spot, "Computing smile");

    let rows = compute(config, strikes, spot)?;
    let table: Vec<Vec<f64>> = rows.iter().map(|r| vec![r.strike, r.forward, r.vol]).collect();
    emit(format, &["Strike", "Forward", "Vol"], &table, &rows)
}
