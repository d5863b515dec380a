//! Hagan SABR model generic over its expansion, and the lognormal variant.

use std::marker::PhantomData;

use num_traits::Float;
use sabr_core::math::solvers::{Bracket, BracketingSolver, BrentSolver};
use sabr_core::traits::VolPricer;
use sabr_core::types::{PayoffType, SolverError};
use tracing::{debug, warn};

use super::error::SabrError;
use super::expansion::{HaganExpansion, Lognormal};
use super::params::{check_sigma, SabrConfig, SabrParams};
use crate::analytical::BlackScholes;

/// SABR model priced through a Hagan equivalent volatility.
///
/// `E` selects the expansion, `P` the pricer that consumes its volatility and
/// `S` the bracketing root finder used for sigma calibration. The model owns
/// one pricer built from the same expiry, sigma and rates, plus the sigma
/// search bracket. Expiry and sigma may be overridden per call; the override
/// is passed to both the expansion and the pricer and never stored.
///
/// Sigma is the only state that changes after construction, and only through
/// [`calibrate_sigma`](Self::calibrate_sigma) with `setval = true` or
/// [`set_sigma`](Self::set_sigma). All other methods take `&self`, so a model
/// can be shared across threads for read-only pricing.
///
/// Use the [`SabrHagan`] and [`SabrNormalHagan`](super::SabrNormalHagan)
/// aliases rather than naming `E` directly.
#[derive(Debug, Clone)]
pub struct HaganSabr<T: Float, E, P, S> {
    config: SabrConfig<T>,
    pricer: P,
    solver: S,
    bracket: Bracket<T>,
    expansion: PhantomData<E>,
}

/// SABR model priced through its lognormal equivalent volatility.
///
/// Defaults to a Black-Scholes pricer and Brent on a sigma bracket of `[0, 10]`.
///
/// # Examples
///
/// ```
/// use sabr_core::types::PayoffType;
/// use sabr_models::models::sabr::{SabrConfig, SabrHagan, SabrParams};
///
/// let params = SabrParams::new(0.2_f64, 0.3, -0.3, 1.0).unwrap();
/// let config = SabrConfig::new(1.0, params, 0.0, 0.0).unwrap();
/// let model = SabrHagan::new(config).unwrap();
///
/// let price = model.price(105.0, 100.0, None, None, PayoffType::Call);
/// let sigma = model
///     .implied_sigma(price, 105.0, 100.0, None, PayoffType::Call)
///     .unwrap();
/// assert!((sigma - 0.2).abs() < 1e-6);
/// ```
pub type SabrHagan<T, P = BlackScholes<T>, S = BrentSolver<T>> = HaganSabr<T, Lognormal, P, S>;

impl<T: Float> HaganSabr<T, Lognormal, BlackScholes<T>, BrentSolver<T>> {
    /// Lognormal SABR model with a Black-Scholes pricer and Brent on `[0, 10]`.
    ///
    /// # Errors
    ///
    /// - `SabrError::InvalidParameter` if the configuration is out of range
    /// - `SabrError::Pricing` if the pricer rejects expiry or sigma
    pub fn new(config: SabrConfig<T>) -> Result<Self, SabrError> {
        Self::with_solver(config, BrentSolver::with_defaults(), Bracket::lognormal_sigma())
    }
}

impl<T, E, P, S> HaganSabr<T, E, P, S>
where
    T: Float,
    E: HaganExpansion,
    P: VolPricer<T>,
    S: BracketingSolver<T>,
{
    /// Model with an explicit pricer type, root finder and sigma bracket.
    pub fn with_solver(config: SabrConfig<T>, solver: S, bracket: Bracket<T>) -> Result<Self, SabrError> {
        config.validate()?;
        let pricer = P::build(config.texp, config.params.sigma, config.intr, config.divr)?;
        Ok(Self {
            config,
            pricer,
            solver,
            bracket,
            expansion: PhantomData,
        })
    }

    /// Model configuration.
    #[inline]
    pub fn config(&self) -> &SabrConfig<T> {
        &self.config
    }

    /// SABR parameters.
    #[inline]
    pub fn params(&self) -> &SabrParams<T> {
        &self.config.params
    }

    /// Default time to expiry.
    #[inline]
    pub fn texp(&self) -> T {
        self.config.texp
    }

    /// Current sigma.
    #[inline]
    pub fn sigma(&self) -> T {
        self.config.params.sigma
    }

    /// Vol-of-vol.
    #[inline]
    pub fn alpha(&self) -> T {
        self.config.params.alpha
    }

    /// Correlation.
    #[inline]
    pub fn rho(&self) -> T {
        self.config.params.rho
    }

    /// CEV exponent used by the expansion; always zero for the normal model.
    #[inline]
    pub fn beta(&self) -> T {
        E::beta(&self.config.params)
    }

    /// Risk-free rate.
    #[inline]
    pub fn intr(&self) -> T {
        self.config.intr
    }

    /// Dividend / convenience yield.
    #[inline]
    pub fn divr(&self) -> T {
        self.config.divr
    }

    /// The owned pricer.
    #[inline]
    pub fn pricer(&self) -> &P {
        &self.pricer
    }

    /// Sigma search bracket used by calibration.
    #[inline]
    pub fn bracket(&self) -> &Bracket<T> {
        &self.bracket
    }

    /// Root finder used by calibration.
    #[inline]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Forward `spot·exp(texp·(intr - divr))`.
    pub fn forward(&self, spot: T, texp: Option<T>) -> T {
        let texp = texp.unwrap_or(self.config.texp);
        spot * (texp * (self.config.intr - self.config.divr)).exp()
    }

    /// Volatility equivalent to this SABR model at `strike`, in the units the
    /// pricer quotes.
    pub fn equivalent_vol(&self, strike: T, spot: T, texp: Option<T>, sigma: Option<T>) -> T {
        let texp = texp.unwrap_or(self.config.texp);
        let sigma = sigma.unwrap_or(self.config.params.sigma);
        E::equivalent_vol(strike, self.forward(spot, Some(texp)), texp, sigma, &self.config.params)
    }

    /// [`equivalent_vol`](Self::equivalent_vol) over a strike strip.
    pub fn equivalent_vol_many(
        &self,
        strikes: &[T],
        spot: T,
        texp: Option<T>,
        sigma: Option<T>,
    ) -> Vec<T> {
        strikes
            .iter()
            .map(|&strike| self.equivalent_vol(strike, spot, texp, sigma))
            .collect()
    }

    /// Option price: equivalent vol fed to the pricer.
    pub fn price(&self, strike: T, spot: T, texp: Option<T>, sigma: Option<T>, payoff: PayoffType) -> T {
        let texp = texp.unwrap_or(self.config.texp);
        let vol = self.equivalent_vol(strike, spot, Some(texp), sigma);
        self.pricer.price(strike, spot, Some(texp), Some(vol), payoff)
    }

    /// [`price`](Self::price) over a strike strip.
    pub fn price_many(
        &self,
        strikes: &[T],
        spot: T,
        texp: Option<T>,
        sigma: Option<T>,
        payoff: PayoffType,
    ) -> Vec<T> {
        strikes
            .iter()
            .map(|&strike| self.price(strike, spot, texp, sigma, payoff))
            .collect()
    }

    /// Sigma that reproduces a market price, leaving the model unchanged.
    ///
    /// The price is first inverted to a volatility by the pricer, then sigma
    /// is searched inside the model's bracket so that the equivalent
    /// volatility matches it.
    ///
    /// # Errors
    ///
    /// - `SabrError::InvalidParameter` if the expiry is not positive, or if
    ///   the price has no time value (the pricer inverts it to a zero
    ///   volatility, which no sigma > 0 reproduces)
    /// - `SabrError::Pricing` if the pricer cannot invert the price
    /// - `SabrError::RootBracketFailure` if no sigma in the bracket matches
    /// - `SabrError::CalibrationFailed` if the root finder does not converge
    pub fn implied_sigma(
        &self,
        price: T,
        strike: T,
        spot: T,
        texp: Option<T>,
        payoff: PayoffType,
    ) -> Result<T, SabrError> {
        let texp = calibration_expiry(texp.unwrap_or(self.config.texp))?;
        let target_vol = self.pricer.impvol(price, strike, spot, Some(texp), payoff)?;
        if !(target_vol > T::zero()) {
            return Err(SabrError::InvalidParameter {
                name: "price",
                value: price.to_f64().unwrap_or(f64::NAN),
                reason: "has no time value; no positive sigma reproduces it",
            });
        }

        let forward = self.forward(spot, Some(texp));
        let sigma = self.solve_sigma(target_vol, |sigma| {
            E::equivalent_vol(strike, forward, texp, sigma, &self.config.params)
        })?;
        check_sigma(sigma)?;
        Ok(sigma)
    }

    /// [`implied_sigma`](Self::implied_sigma), storing the result as the
    /// model's sigma when `setval` is true.
    pub fn calibrate_sigma(
        &mut self,
        price: T,
        strike: T,
        spot: T,
        texp: Option<T>,
        payoff: PayoffType,
        setval: bool,
    ) -> Result<T, SabrError> {
        let sigma = self.implied_sigma(price, strike, spot, texp, payoff)?;
        if setval {
            self.set_sigma(sigma)?;
        }
        Ok(sigma)
    }

    /// Replace sigma.
    ///
    /// # Errors
    ///
    /// `SabrError::InvalidParameter` unless `sigma` is finite and positive.
    pub fn set_sigma(&mut self, sigma: T) -> Result<(), SabrError> {
        check_sigma(sigma)?;
        self.config.params.sigma = sigma;
        Ok(())
    }

    /// Find sigma with `equiv_vol(sigma) = target_vol` inside the bracket.
    fn solve_sigma<F>(&self, target_vol: T, equiv_vol: F) -> Result<T, SabrError>
    where
        F: Fn(T) -> T,
    {
        let vol_target = target_vol.to_f64().unwrap_or(f64::NAN);
        let lower = self.bracket.lower().to_f64().unwrap_or(f64::NAN);
        let upper = self.bracket.upper().to_f64().unwrap_or(f64::NAN);
        debug!(model = E::NAME, target_vol = vol_target, lower, upper, "calibrating sabr sigma");

        match self
            .solver
            .find_root_in(|sigma| equiv_vol(sigma) - target_vol, &self.bracket)
        {
            Ok(sigma) => {
                debug!(model = E::NAME, sigma = sigma.to_f64().unwrap_or(f64::NAN), "sabr sigma calibrated");
                Ok(sigma)
            }
            Err(SolverError::NoBracket { .. }) => {
                warn!(model = E::NAME, target_vol = vol_target, lower, upper, "no sign change in sigma bracket");
                Err(SabrError::RootBracketFailure {
                    lower,
                    upper,
                    target_vol: vol_target,
                })
            }
            Err(err) => {
                warn!(model = E::NAME, error = %err, "sigma root finder failed");
                Err(SabrError::CalibrationFailed(err))
            }
        }
    }
}

/// Calibration needs time value: reject `texp <= 0`.
fn calibration_expiry<T: Float>(texp: T) -> Result<T, SabrError> {
    if texp > T::zero() && texp.is_finite() {
        Ok(texp)
    } else {
        Err(SabrError::InvalidParameter {
            name: "texp",
            value: texp.to_f64().unwrap_or(f64::NAN),
            reason: "must be positive to calibrate sigma",
        })
    }
}
