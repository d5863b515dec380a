//! SABR parameter and model configuration records.

use num_traits::Float;

use super::error::SabrError;

/// SABR model parameters.
///
/// # Fields
///
/// * `sigma` - volatility level (sigma > 0)
/// * `alpha` - vol-of-vol (alpha >= 0)
/// * `rho` - correlation between forward and volatility (-1 < rho < 1)
/// * `beta` - CEV exponent (0 <= beta <= 1); ignored by the normal model
///
/// Fields are public for configuration loading; [`SabrParams::new`] and
/// [`SabrParams::validate`] enforce the domains, and every model validates
/// its parameters at construction.
///
/// # Examples
///
/// ```
/// use sabr_models::models::sabr::SabrParams;
///
/// let params = SabrParams::new(0.2_f64, 0.3, -0.3, 1.0).unwrap();
/// assert_eq!(params.alpha, 0.3);
///
/// assert!(SabrParams::new(0.2_f64, 0.3, -1.0, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrParams<T: Float> {
    /// Volatility level (σ)
    pub sigma: T,
    /// Vol-of-vol (α)
    pub alpha: T,
    /// Correlation (ρ)
    pub rho: T,
    /// CEV exponent (β)
    pub beta: T,
}

impl<T: Float> SabrParams<T> {
    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// `SabrError::InvalidParameter` naming the first parameter out of range.
    pub fn new(sigma: T, alpha: T, rho: T, beta: T) -> Result<Self, SabrError> {
        let params = Self {
            sigma,
            alpha,
            rho,
            beta,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters for the normal model, with `beta` fixed at zero.
    pub fn normal(sigma: T, alpha: T, rho: T) -> Result<Self, SabrError> {
        Self::new(sigma, alpha, rho, T::zero())
    }

    /// Check every parameter against its domain.
    pub fn validate(&self) -> Result<(), SabrError> {
        check_sigma(self.sigma)?;

        if !(self.alpha >= T::zero()) || !self.alpha.is_finite() {
            return Err(invalid("alpha", self.alpha, "must be finite and >= 0"));
        }
        if !(self.rho > -T::one() && self.rho < T::one()) {
            return Err(invalid("rho", self.rho, "must lie in (-1, 1)"));
        }
        if !(self.beta >= T::zero() && self.beta <= T::one()) {
            return Err(invalid("beta", self.beta, "must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Per-instance model configuration.
///
/// Everything a SABR model needs at construction: expiry, parameters and
/// carry rates. Each model owns its own copy.
///
/// # Examples
///
/// ```
/// use sabr_models::models::sabr::{SabrConfig, SabrParams};
///
/// let params = SabrParams::new(0.2_f64, 0.3, -0.3, 1.0).unwrap();
/// let config = SabrConfig::new(1.0, params, 0.0, 0.0).unwrap();
/// assert_eq!(config.texp, 1.0);
///
/// assert!(SabrConfig::new(-1.0, params, 0.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrConfig<T: Float> {
    /// Default time to expiry in years (>= 0)
    pub texp: T,
    /// SABR parameters
    pub params: SabrParams<T>,
    /// Risk-free rate
    pub intr: T,
    /// Dividend / convenience yield
    pub divr: T,
}

impl<T: Float> SabrConfig<T> {
    /// Create a validated configuration.
    pub fn new(texp: T, params: SabrParams<T>, intr: T, divr: T) -> Result<Self, SabrError> {
        let config = Self {
            texp,
            params,
            intr,
            divr,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check expiry, rates and parameters.
    pub fn validate(&self) -> Result<(), SabrError> {
        if !(self.texp >= T::zero()) || !self.texp.is_finite() {
            return Err(invalid("texp", self.texp, "must be finite and >= 0"));
        }
        if !self.intr.is_finite() {
            return Err(invalid("intr", self.intr, "must be finite"));
        }
        if !self.divr.is_finite() {
            return Err(invalid("divr", self.divr, "must be finite"));
        }
        self.params.validate()
    }
}

pub(super) fn check_sigma<T: Float>(sigma: T) -> Result<(), SabrError> {
    if !(sigma > T::zero()) || !sigma.is_finite() {
        return Err(invalid("sigma", sigma, "must be finite and > 0"));
    }
    Ok(())
}

fn invalid<T: Float>(name: &'static str, value: T, reason: &'static str) -> SabrError {
    SabrError::InvalidParameter {
        name,
        value: value.to_f64().unwrap_or(f64::NAN),
        reason,
    }
}
