//! Hagan expansion markers.
//!
//! A [`HaganExpansion`] picks which asymptotic volatility a
//! [`HaganSabr`](super::HaganSabr) feeds to its pricer. The two markers are
//! zero-sized, so the choice is resolved at compile time.

use std::fmt;

use num_traits::Float;

use super::mapper::{bsm_equiv_vol, normal_equiv_vol};
use super::params::SabrParams;

/// Maps SABR parameters to the volatility quoted by one pricer family.
pub trait HaganExpansion: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Short name used in log events.
    const NAME: &'static str;

    /// Equivalent volatility at `strike` for the given forward, expiry and sigma.
    fn equivalent_vol<T: Float>(strike: T, forward: T, texp: T, sigma: T, params: &SabrParams<T>) -> T;

    /// CEV exponent the expansion actually uses.
    fn beta<T: Float>(params: &SabrParams<T>) -> T;
}

/// Black (lognormal) volatility, [`bsm_equiv_vol`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lognormal;

impl HaganExpansion for Lognormal {
    const NAME: &'static str = "lognormal";

    #[inline]
    fn equivalent_vol<T: Float>(strike: T, forward: T, texp: T, sigma: T, params: &SabrParams<T>) -> T {
        bsm_equiv_vol(strike, forward, texp, sigma, params.alpha, params.rho, params.beta)
    }

    #[inline]
    fn beta<T: Float>(params: &SabrParams<T>) -> T {
        params.beta
    }
}

/// Bachelier (normal) volatility, [`normal_equiv_vol`]. Ignores `params.beta`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normal;

impl HaganExpansion for Normal {
    const NAME: &'static str = "normal";

    #[inline]
    fn equivalent_vol<T: Float>(strike: T, forward: T, texp: T, sigma: T, params: &SabrParams<T>) -> T {
        normal_equiv_vol(strike, forward, texp, sigma, params.alpha, params.rho)
    }

    #[inline]
    fn beta<T: Float>(_params: &SabrParams<T>) -> T {
        T::zero()
    }
}
