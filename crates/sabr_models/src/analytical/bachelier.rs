//! Bachelier (normal) pricer for European options.
//!
//! Prices under arithmetic dynamics of the forward, so forwards and strikes
//! may be zero or negative. Used by the normal SABR model.
//!
//! ## Mathematical Formulas
//!
//! **Price**: V = D·(ω(F - K)·N(ω·d) + σ√T·φ(d))
//!
//! Where:
//! - F = S·e^((r-q)T), D = e^(-rT), ω = +1 call, -1 put
//! - d = (F - K) / (σ√T)
//! - N(·) is the standard normal CDF
//! - φ(·) is the standard normal PDF

use num_traits::Float;
use sabr_core::traits::VolPricer;
use sabr_core::types::{PayoffType, PricingError};

use super::black_scholes::validate_inputs;
use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use super::implied::{solve_implied_vol, vol_bracket};

/// Bachelier (normal) model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use sabr_core::traits::VolPricer;
/// use sabr_core::types::PayoffType;
/// use sabr_models::analytical::Bachelier;
///
/// let model = Bachelier::new(1.0_f64, 0.005, 0.0, 0.0).unwrap();
/// let call = model.price(0.01, 0.01, None, None, PayoffType::Call);
/// let put = model.price(0.01, 0.01, None, None, PayoffType::Put);
///
/// // ATM: call and put coincide
/// assert!((call - put).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Bachelier<T: Float> {
    /// Time to expiry in years
    texp: T,
    /// Normal volatility, in price units per √year
    vol: T,
    /// Risk-free interest rate
    intr: T,
    /// Dividend / convenience yield
    divr: T,
}

impl<T: Float> Bachelier<T> {
    /// Creates a new Bachelier pricer.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidExpiry` if texp < 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if vol < 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use sabr_models::analytical::Bachelier;
    ///
    /// assert!(Bachelier::new(1.0_f64, 20.0, 0.0, 0.0).is_ok());
    /// assert!(Bachelier::new(1.0_f64, -0.01, 0.0, 0.0).is_err());
    /// ```
    pub fn new(texp: T, vol: T, intr: T, divr: T) -> Result<Self, AnalyticalError> {
        validate_inputs(texp, vol)?;
        Ok(Self {
            texp,
            vol,
            intr,
            divr,
        })
    }

    /// Vega ∂V/∂σ = D·√T·φ(d).
    pub fn vega(&self, strike: T, spot: T, texp: Option<T>, vol: Option<T>) -> T {
        let texp = texp.unwrap_or(self.texp);
        let vol = vol.unwrap_or(self.vol);
        if texp <= T::zero() || vol <= T::zero() {
            return T::zero();
        }

        let sqrt_t = texp.sqrt();
        let d = (self.forward(spot, Some(texp)) - strike) / (vol * sqrt_t);
        self.discount_factor(Some(texp)) * sqrt_t * norm_pdf(d)
    }
}

impl<T: Float> VolPricer<T> for Bachelier<T> {
    fn build(texp: T, vol: T, intr: T, divr: T) -> Result<Self, PricingError> {
        Ok(Self::new(texp, vol, intr, divr)?)
    }

    #[inline]
    fn texp(&self) -> T {
        self.texp
    }

    #[inline]
    fn vol(&self) -> T {
        self.vol
    }

    #[inline]
    fn intr(&self) -> T {
        self.intr
    }

    #[inline]
    fn divr(&self) -> T {
        self.divr
    }

    fn price(&self, strike: T, spot: T, texp: Option<T>, vol: Option<T>, payoff: PayoffType) -> T {
        let texp = texp.unwrap_or(self.texp);
        let vol = vol.unwrap_or(self.vol);

        if texp <= T::zero() {
            return payoff.intrinsic(spot, strike);
        }

        let forward = self.forward(spot, Some(texp));
        let df = self.discount_factor(Some(texp));
        if vol <= T::zero() {
            return df * payoff.intrinsic(forward, strike);
        }

        let omega = payoff.sign::<T>();
        let std_dev = vol * texp.sqrt();
        let d = (forward - strike) / std_dev;

        df * (omega * (forward - strike) * norm_cdf(omega * d) + std_dev * norm_pdf(d))
    }

    /// Normal implied volatility.
    ///
    /// The search runs over `[1e-8, 10·max(|F|, |K|, 1)]`.
    ///
    /// # Errors
    /// - `InvalidInput` if the expiry is not positive or `price` is below
    ///   the discounted intrinsic value
    /// - `NumericalInstability` if no volatility in the search range matches
    fn impvol(
        &self,
        price: T,
        strike: T,
        spot: T,
        texp: Option<T>,
        payoff: PayoffType,
    ) -> Result<T, PricingError> {
        let texp = texp.unwrap_or(self.texp);
        if !(texp > T::zero()) || !texp.is_finite() {
            return Err(AnalyticalError::InvalidExpiry {
                texp: texp.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }

        let forward = self.forward(spot, Some(texp));
        let df = self.discount_factor(Some(texp));
        let lower = df * payoff.intrinsic(forward, strike);

        if !(price >= lower) || !price.is_finite() {
            return Err(AnalyticalError::PriceOutOfBounds {
                price: price.to_f64().unwrap_or(f64::NAN),
                lower: lower.to_f64().unwrap_or(f64::NAN),
                upper: f64::INFINITY,
            }
            .into());
        }
        if price == lower {
            return Ok(T::zero());
        }

        // ATM price = D·σ√T/√(2π)
        let two_pi = T::from(2.0 * std::f64::consts::PI).unwrap();
        let guess = (two_pi / texp).sqrt() * price / df;

        let scale = forward.abs().max(strike.abs()).max(T::one());
        let bracket = vol_bracket(T::from(10.0).unwrap() * scale)?;
        let vol = solve_implied_vol(
            |v| self.price(strike, spot, Some(texp), Some(v), payoff) - price,
            |v| self.vega(strike, spot, Some(texp), Some(v)),
            guess,
            &bracket,
        )?;
        Ok(vol)
    }
}
