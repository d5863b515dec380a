//! CLI configuration management
//!
//! Settings are layered, highest priority first:
//! 1. Environment variables prefixed with `SABR_` (`SABR_MODEL__ALPHA=0.4`)
//! 2. The TOML configuration file (default `sabr.toml`, optional)
//! 3. Built-in defaults

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use sabr_core::math::solvers::{Bracket, BrentSolver, SolverConfig};
use sabr_models::models::{SabrConfig, SabrParams};
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "SABR";

/// Which Hagan expansion the commands run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Black (lognormal) equivalent volatility, `SabrHagan`
    #[default]
    Lognormal,
    /// Bachelier (normal) equivalent volatility, `SabrNormalHagan`
    Normal,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::Lognormal => write!(f, "lognormal"),
            ModelKind::Normal => write!(f, "normal"),
        }
    }
}

/// `[model]` table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelSection {
    pub kind: ModelKind,
    pub texp: f64,
    pub sigma: f64,
    pub alpha: f64,
    pub rho: f64,
    /// Ignored by the normal model.
    pub beta: f64,
    pub intr: f64,
    pub divr: f64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            kind: ModelKind::Lognormal,
            texp: 1.0,
            sigma: 0.2,
            alpha: 0.0,
            rho: 0.0,
            beta: 1.0,
            intr: 0.0,
            divr: 0.0,
        }
    }
}

/// `[solver]` table.
///
/// `lower` and `upper` fall back to the default sigma range of the model
/// kind when omitted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverSection {
    pub tolerance: f64,
    pub max_iterations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

impl Default for SolverSection {
    fn default() -> Self {
        let defaults: SolverConfig<f64> = SolverConfig::default();
        Self {
            tolerance: defaults.tolerance,
            max_iterations: defaults.max_iterations,
            lower: None,
            upper: None,
        }
    }
}

/// Fully resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub model: ModelSection,
    pub solver: SolverSection,
}

impl CliConfig {
    /// Load from `path` (skipped if absent) and `SABR_*` environment variables.
    ///
    /// # Errors
    ///
    /// `CliError::Config` when a source cannot be parsed or a value is out
    /// of range.
    pub fn load(path: &Path) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(environment());
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value by building the model inputs.
    pub fn validate(&self) -> Result<()> {
        self.sabr_config()?;
        self.solver_config()?;
        self.bracket()?;
        Ok(())
    }

    /// Model configuration. The normal kind ignores `beta`.
    pub fn sabr_config(&self) -> Result<SabrConfig<f64>> {
        let m = &self.model;
        let params = match m.kind {
            ModelKind::Lognormal => SabrParams::new(m.sigma, m.alpha, m.rho, m.beta),
            ModelKind::Normal => SabrParams::normal(m.sigma, m.alpha, m.rho),
        }
        .map_err(|e| CliError::config(e.to_string()))?;

        SabrConfig::new(m.texp, params, m.intr, m.divr).map_err(|e| CliError::config(e.to_string()))
    }

    /// Root finder settings for sigma calibration.
    pub fn solver_config(&self) -> Result<SolverConfig<f64>> {
        Ok(SolverConfig::new(
            self.solver.tolerance,
            self.solver.max_iterations,
        )?)
    }

    /// Brent solver built from [`solver_config`](Self::solver_config).
    pub fn solver(&self) -> Result<BrentSolver<f64>> {
        Ok(BrentSolver::new(self.solver_config()?))
    }

    /// Sigma search bracket, defaulting per model kind.
    pub fn bracket(&self) -> Result<Bracket<f64>> {
        let default = match self.model.kind {
            ModelKind::Lognormal => Bracket::lognormal_sigma(),
            ModelKind::Normal => Bracket::normal_sigma(),
        };
        match (self.solver.lower, self.solver.upper) {
            (None, None) => Ok(default),
            (lower, upper) => Ok(Bracket::new(
                lower.unwrap_or(default.lower()),
                upper.unwrap_or(default.upper()),
            )?),
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
