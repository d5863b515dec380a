//! Contract for vanilla option pricers parameterised by a single volatility.
//!
//! The lognormal (Black-Scholes) and normal (Bachelier) pricers in
//! `sabr_models::analytical` implement [`VolPricer`]. The SABR models only
//! depend on this trait: they map their parameters to an equivalent
//! volatility and hand it to the pricer, and invert quoted prices with
//! [`VolPricer::impvol`] before calibrating sigma.

use num_traits::Float;

use crate::types::{PayoffType, PricingError};

/// A European option pricer driven by one volatility number.
///
/// # Conventions
///
/// - `texp`: time to expiry in years; `texp <= 0` means no time value
/// - `intr`: continuously compounded risk-free rate
/// - `divr`: continuous dividend / convenience yield
/// - The forward is derived, never stored: `spot · exp(texp · (intr - divr))`
/// - Optional `texp` / `vol` arguments fall back to the pricer's own fields
///
/// # Example
///
/// ```
/// use sabr_core::traits::pricer::VolPricer;
/// use sabr_core::types::{PayoffType, PricingError};
///
/// /// Undiscounted intrinsic-value pricer.
/// struct Intrinsic {
///     texp: f64,
/// }
///
/// impl VolPricer<f64> for Intrinsic {
///     fn build(texp: f64, _vol: f64, _intr: f64, _divr: f64) -> Result<Self, PricingError> {
///         Ok(Self { texp })
///     }
///     fn texp(&self) -> f64 { self.texp }
///     fn vol(&self) -> f64 { 0.0 }
///     fn intr(&self) -> f64 { 0.0 }
///     fn divr(&self) -> f64 { 0.0 }
///     fn price(&self, strike: f64, spot: f64, _texp: Option<f64>, _vol: Option<f64>, payoff: PayoffType) -> f64 {
///         payoff.intrinsic(spot, strike)
///     }
///     fn impvol(&self, _price: f64, _strike: f64, _spot: f64, _texp: Option<f64>, _payoff: PayoffType) -> Result<f64, PricingError> {
///         Err(PricingError::ModelFailure("no volatility".to_string()))
///     }
/// }
///
/// let pricer = Intrinsic::build(1.0, 0.2, 0.0, 0.0).unwrap();
/// assert_eq!(pricer.price(90.0, 100.0, None, None, PayoffType::Call), 10.0);
/// assert_eq!(pricer.forward(100.0, None), 100.0);
/// ```
pub trait VolPricer<T: Float>: Sized {
    /// Construct a pricer from expiry, volatility, rate and dividend yield.
    fn build(texp: T, vol: T, intr: T, divr: T) -> Result<Self, PricingError>;

    /// Default time to expiry.
    fn texp(&self) -> T;

    /// Default volatility.
    fn vol(&self) -> T;

    /// Risk-free rate.
    fn intr(&self) -> T;

    /// Dividend / convenience yield.
    fn divr(&self) -> T;

    /// Forward price `spot · exp(texp · (intr - divr))`.
    fn forward(&self, spot: T, texp: Option<T>) -> T {
        let texp = texp.unwrap_or_else(|| self.texp());
        spot * (texp * (self.intr() - self.divr())).exp()
    }

    /// Discount factor `exp(-texp · intr)`.
    fn discount_factor(&self, texp: Option<T>) -> T {
        let texp = texp.unwrap_or_else(|| self.texp());
        (-texp * self.intr()).exp()
    }

    /// Discounted European option price.
    fn price(&self, strike: T, spot: T, texp: Option<T>, vol: Option<T>, payoff: PayoffType)
        -> T;

    /// Volatility that reproduces `price` under this pricer's distribution.
    fn impvol(
        &self,
        price: T,
        strike: T,
        spot: T,
        texp: Option<T>,
        payoff: PayoffType,
    ) -> Result<T, PricingError>;
}
