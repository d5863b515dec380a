//! Black-Scholes (lognormal) pricer for European options.
//!
//! ## Mathematical Formulas
//!
//! With forward F = S·e^((r-q)T) and discount factor D = e^(-rT):
//!
//! **Price**: V = D·ω·(F·N(ω·d₁) - K·N(ω·d₂)), ω = +1 call, -1 put
//!
//! Where:
//! - d₁ = ln(F/K) / (σ√T) + σ√T/2
//! - d₂ = d₁ - σ√T

use num_traits::Float;
use sabr_core::traits::VolPricer;
use sabr_core::types::{PayoffType, PricingError};

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use super::implied::{solve_implied_vol, vol_bracket};

/// Upper end of the lognormal implied volatility search.
const MAX_LOGNORMAL_VOL: f64 = 10.0;

/// Black-Scholes model for European option pricing.
///
/// Holds the default expiry and volatility plus the carry rates; every
/// pricing call may override expiry and volatility.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use sabr_core::traits::VolPricer;
/// use sabr_core::types::PayoffType;
/// use sabr_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(1.0_f64, 0.2, 0.05, 0.0).unwrap();
/// let call = bs.price(100.0, 100.0, None, None, PayoffType::Call);
/// let put = bs.price(100.0, 100.0, None, None, PayoffType::Put);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Time to expiry in years
    texp: T,
    /// Lognormal volatility (σ)
    vol: T,
    /// Risk-free interest rate (r)
    intr: T,
    /// Dividend yield (q)
    divr: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes pricer.
    ///
    /// # Arguments
    /// * `texp` - Default time to expiry (must be >= 0)
    /// * `vol` - Default volatility (must be >= 0)
    /// * `intr` - Risk-free rate
    /// * `divr` - Dividend yield
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidExpiry` if texp < 0 or not finite
    /// - `AnalyticalError::InvalidVolatility` if vol < 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use sabr_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(1.0_f64, 0.2, 0.0, 0.0).is_ok());
    /// assert!(BlackScholes::new(1.0_f64, -0.2, 0.0, 0.0).is_err());
    /// assert!(BlackScholes::new(-1.0_f64, 0.2, 0.0, 0.0).is_err());
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

    /// d₁ for a given forward, expiry and volatility (both positive).
    #[inline]
    fn d1(strike: T, forward: T, texp: T, vol: T) -> T {
        let half = T::from(0.5).unwrap();
        let std_dev = vol * texp.sqrt();
        (forward / strike).ln() / std_dev + half * std_dev
    }

    /// Vega ∂V/∂σ = D·F·√T·φ(d₁), identical for calls and puts.
    ///
    /// Returns zero when the option has expired or the volatility is zero.
    pub fn vega(&self, strike: T, spot: T, texp: Option<T>, vol: Option<T>) -> T {
        let texp = texp.unwrap_or(self.texp);
        let vol = vol.unwrap_or(self.vol);
        if texp <= T::zero() || vol <= T::zero() {
            return T::zero();
        }

        let forward = self.forward(spot, Some(texp));
        let df = self.discount_factor(Some(texp));
        df * forward * texp.sqrt() * norm_pdf(Self::d1(strike, forward, texp, vol))
    }
}

impl<T: Float> VolPricer<T> for BlackScholes<T> {
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

    /// Discounted Black-Scholes price.
    ///
    /// Expired options pay `max(ω(S - K), 0)`; a zero volatility gives the
    /// discounted forward intrinsic value.
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
        let d1 = Self::d1(strike, forward, texp, vol);
        let d2 = d1 - vol * texp.sqrt();

        df * omega * (forward * norm_cdf(omega * d1) - strike * norm_cdf(omega * d2))
    }

    /// Lognormal implied volatility.
    ///
    /// # Errors
    /// - `InvalidInput` if the expiry is not positive
    /// - `InvalidInput` if `price` is below the discounted intrinsic value or
    ///   at/above the discounted forward (call) or strike (put)
    /// - `NumericalInstability` if no volatility in `[1e-8, 10]` matches
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
        let upper = match payoff {
            PayoffType::Call => df * forward,
            PayoffType::Put => df * strike,
        };

        if !(price >= lower && price < upper) {
            return Err(AnalyticalError::PriceOutOfBounds {
                price: price.to_f64().unwrap_or(f64::NAN),
                lower: lower.to_f64().unwrap_or(f64::NAN),
                upper: upper.to_f64().unwrap_or(f64::NAN),
            }
            .into());
        }
        if price == lower {
            return Ok(T::zero());
        }

        // Brenner-Subrahmanyam: ATM price ≈ D·F·σ√T/√(2π)
        let two_pi = T::from(2.0 * std::f64::consts::PI).unwrap();
        let guess = (two_pi / texp).sqrt() * price / (df * forward);

        let bracket = vol_bracket(T::from(MAX_LOGNORMAL_VOL).unwrap())?;
        let vol = solve_implied_vol(
            |v| self.price(strike, spot, Some(texp), Some(v), payoff) - price,
            |v| self.vega(strike, spot, Some(texp), Some(v)),
            guess,
            &bracket,
        )?;
        Ok(vol)
    }
}

/// Expiry and volatility must be finite and non-negative.
pub(crate) fn validate_inputs<T: Float>(texp: T, vol: T) -> Result<(), AnalyticalError> {
    if !(texp >= T::zero()) || !texp.is_finite() {
        return Err(AnalyticalError::InvalidExpiry {
            texp: texp.to_f64().unwrap_or(f64::NAN),
        });
    }
    if !(vol >= T::zero()) || !vol.is_finite() {
        return Err(AnalyticalError::InvalidVolatility {
            volatility: vol.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}
