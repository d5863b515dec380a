//! Hagan's asymptotic equivalent volatilities.
//!
//! Maps SABR parameters to the single volatility that reproduces the SABR
//! price under a lognormal ([`bsm_equiv_vol`]) or normal
//! ([`normal_equiv_vol`]) pricer.
//!
//! ## Lognormal
//!
//! ```text
//! σ_B = σ·pre2 / (pre1·x(z)/z)
//! pre1 = (FK)^((1-β)/2)·(1 + (1-β)²/24·L² + (1-β)⁴/1920·L⁴),   L = ln(F/K)
//! pre2 = 1 + T·((2-3ρ²)α²/24 + σαρβ/(4(FK)^((1-β)/2)) + (1-β)²σ²/(24(FK)^(1-β)))
//! z    = (FK)^((1-β)/2)·L·α/σ
//! ```
//!
//! ## Normal
//!
//! ```text
//! σ_N = σ·(1 + (2-3ρ²)/24·α²·T) / (x(ζ)/ζ),   ζ = (F-K)·α/σ
//! ```
//!
//! with `x(z) = ln((√(1-2ρz+z²) + z - ρ)/(1-ρ))`. The ratio `x(z)/z` is 0/0
//! at `z = 0`; [`x_over_z`] switches to its Taylor series for
//! `|z| < SERIES_THRESHOLD`.
//!
//! An expiry `texp <= 0` maps to a volatility of exactly zero.

use num_traits::Float;

use super::error::SabrError;

/// Below this `|z|` the series replaces the closed-form log expression.
pub const SERIES_THRESHOLD: f64 = 1e-5;

/// Floor applied to sigma in the denominator of `z` / `ζ`.
pub const SIGMA_FLOOR: f64 = 1e-32;

/// `x(z)/z`, the skew factor shared by both expansions.
///
/// Three branches partition the real line:
/// - `|z| < 1e-5`: `1 + (ρ/2)z + (ρ²/2 - 1/6)z² + (1/8)(5ρ²-3)ρz³`
/// - `z >= 1e-5`: `ln((y + z - ρ)/(1-ρ)) / z`
/// - `z <= -1e-5`: `ln((1+ρ)/(y - (z-ρ))) / z`
///
/// where `y = √(1 + z(z-2ρ))`. The negative branch is the same function
/// written to avoid cancellation in `y + z - ρ` for large negative `z`.
///
/// # Examples
/// ```
/// use sabr_models::models::sabr::mapper::x_over_z;
///
/// assert_eq!(x_over_z(0.0_f64, -0.3), 1.0);
///
/// // Continuous across the series threshold
/// let inside = x_over_z(0.999_999e-5_f64, 0.4);
/// let outside = x_over_z(1.0e-5_f64, 0.4);
/// assert!((inside - outside).abs() < 1e-9);
/// ```
#[inline]
pub fn x_over_z<T: Float>(z: T, rho: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let threshold = T::from(SERIES_THRESHOLD).unwrap();

    if z.abs() < threshold {
        let half = T::from(0.5).unwrap();
        let sixth = T::from(1.0 / 6.0).unwrap();
        let eighth = T::from(0.125).unwrap();
        let rho2 = rho * rho;
        return one
            + half * rho * z
            + (half * rho2 - sixth) * z * z
            + eighth * (T::from(5.0).unwrap() * rho2 - T::from(3.0).unwrap()) * rho * z * z * z;
    }

    let y = (one + z * (z - two * rho)).sqrt();
    if z >= threshold {
        ((y + (z - rho)) / (one - rho)).ln() / z
    } else {
        ((one + rho) / (y - (z - rho))).ln() / z
    }
}

/// Lognormal (Black) equivalent volatility of a SABR model.
///
/// # Arguments
///
/// * `strike`, `forward` - positive strike and forward
/// * `texp` - time to expiry; `texp <= 0` returns 0
/// * `sigma`, `alpha`, `rho`, `beta` - SABR parameters
///
/// Parameters are not validated here; `sigma` is floored at
/// [`SIGMA_FLOOR`] inside `z` so that `sigma = 0` maps to zero.
///
/// # Examples
/// ```
/// use sabr_models::models::sabr::bsm_equiv_vol;
///
/// // No vol-of-vol, beta = 1: plain Black volatility
/// let vol = bsm_equiv_vol(110.0_f64, 100.0, 1.0, 0.2, 0.0, 0.0, 1.0);
/// assert!((vol - 0.2).abs() < 1e-15);
///
/// assert_eq!(bsm_equiv_vol(110.0_f64, 100.0, 0.0, 0.2, 0.3, -0.3, 1.0), 0.0);
/// ```
pub fn bsm_equiv_vol<T: Float>(
    strike: T,
    forward: T,
    texp: T,
    sigma: T,
    alpha: T,
    rho: T,
    beta: T,
) -> T {
    if texp <= T::zero() {
        return T::zero();
    }

    let one = T::one();
    let c24 = T::from(24.0).unwrap();
    let omb = one - beta;
    let omb2 = omb * omb;

    let pow_fk = (forward * strike).powf(omb / T::from(2.0).unwrap());
    let log_fk = (forward / strike).ln();
    let log_fk2 = log_fk * log_fk;

    let pre1 = pow_fk * (one + omb2 / c24 * log_fk2 * (one + omb2 / T::from(80.0).unwrap() * log_fk2));

    let alpha_term = (T::from(2.0).unwrap() - T::from(3.0).unwrap() * rho * rho) * alpha * alpha / c24;
    let skew_term = alpha * rho * beta / (T::from(4.0).unwrap() * pow_fk);
    let cev_term = omb2 / (c24 * pow_fk * pow_fk);
    let pre2 = one + texp * (alpha_term + sigma * (skew_term + cev_term * sigma));

    let z = pow_fk * log_fk * alpha / sigma.max(T::from(SIGMA_FLOOR).unwrap());

    sigma * pre2 / (pre1 * x_over_z(z, rho))
}

/// Normal (Bachelier) equivalent volatility of a SABR model with `beta = 0`.
///
/// Forward and strike may be zero or negative.
///
/// # Examples
/// ```
/// use sabr_models::models::sabr::normal_equiv_vol;
///
/// // ATM: σ·(1 + (2-3ρ²)/24·α²·T)
/// let vol = normal_equiv_vol(100.0_f64, 100.0, 1.0, 20.0, 0.3, 0.0);
/// assert!((vol - 20.0 * (1.0 + 2.0 / 24.0 * 0.09)).abs() < 1e-12);
/// ```
pub fn normal_equiv_vol<T: Float>(strike: T, forward: T, texp: T, sigma: T, alpha: T, rho: T) -> T {
    if texp <= T::zero() {
        return T::zero();
    }

    let zeta = (forward - strike) * alpha / sigma.max(T::from(SIGMA_FLOOR).unwrap());
    let curvature = (T::from(2.0).unwrap() - T::from(3.0).unwrap() * rho * rho)
        / T::from(24.0).unwrap()
        * alpha
        * alpha
        * texp;

    sigma * (T::one() + curvature) / x_over_z(zeta, rho)
}

/// Pair up strikes and forwards, repeating a length-1 side.
fn broadcast<'a, T: Copy>(
    strikes: &'a [T],
    forwards: &'a [T],
) -> Result<Box<dyn Iterator<Item = (T, T)> + 'a>, SabrError> {
    match (strikes.len(), forwards.len()) {
        (n, m) if n == m => Ok(Box::new(strikes.iter().copied().zip(forwards.iter().copied()))),
        (_, 1) => {
            let forward = forwards[0];
            Ok(Box::new(strikes.iter().map(move |&k| (k, forward))))
        }
        (1, _) => {
            let strike = strikes[0];
            Ok(Box::new(forwards.iter().map(move |&f| (strike, f))))
        }
        (n, m) => Err(SabrError::ShapeMismatch {
            strikes: n,
            forwards: m,
        }),
    }
}

/// [`bsm_equiv_vol`] over slices of strikes and forwards.
///
/// Equal lengths are paired elementwise; a length-1 slice is broadcast
/// against the other. Each element equals the scalar computation.
///
/// # Errors
///
/// `SabrError::ShapeMismatch` when the lengths differ and neither is 1.
///
/// # Examples
/// ```
/// use sabr_models::models::sabr::{bsm_equiv_vol, bsm_equiv_vol_many};
///
/// let strikes = [90.0_f64, 100.0, 110.0];
/// let vols = bsm_equiv_vol_many(&strikes, &[100.0], 1.0, 0.2, 0.3, -0.3, 1.0).unwrap();
/// assert_eq!(vols.len(), 3);
/// assert_eq!(vols[2], bsm_equiv_vol(110.0, 100.0, 1.0, 0.2, 0.3, -0.3, 1.0));
///
/// assert!(bsm_equiv_vol_many(&strikes, &[100.0, 101.0], 1.0, 0.2, 0.3, -0.3, 1.0).is_err());
/// ```
pub fn bsm_equiv_vol_many<T: Float>(
    strikes: &[T],
    forwards: &[T],
    texp: T,
    sigma: T,
    alpha: T,
    rho: T,
    beta: T,
) -> Result<Vec<T>, SabrError> {
    Ok(broadcast(strikes, forwards)?
        .map(|(k, f)| bsm_equiv_vol(k, f, texp, sigma, alpha, rho, beta))
        .collect())
}

/// [`normal_equiv_vol`] over slices of strikes and forwards.
///
/// Broadcasting follows [`bsm_equiv_vol_many`].
pub fn normal_equiv_vol_many<T: Float>(
    strikes: &[T],
    forwards: &[T],
    texp: T,
    sigma: T,
    alpha: T,
    rho: T,
) -> Result<Vec<T>, SabrError> {
    Ok(broadcast(strikes, forwards)?
        .map(|(k, f)| normal_equiv_vol(k, f, texp, sigma, alpha, rho))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // x(z)/z
    // ==========================================================

    #[test]
    fn test_x_over_z_at_zero() {
        for rho in [-0.9, -0.3, 0.0, 0.5, 0.9] {
            assert_eq!(x_over_z(0.0_f64, rho), 1.0);
        }
    }

    #[test]
    fn test_x_over_z_branch_continuity() {
        let eps = SERIES_THRESHOLD;
        for rho in [-0.9, -0.3, 0.0, 0.4, 0.9] {
            let below = x_over_z(eps * (1.0 - 1e-9), rho);
            let above = x_over_z(eps, rho);
            assert!((below - above).abs() < 1e-9, "rho = {}", rho);

            let below = x_over_z(-eps * (1.0 - 1e-9), rho);
            let above = x_over_z(-eps, rho);
            assert!((below - above).abs() < 1e-9, "rho = {}", rho);
        }
    }

    #[test]
    fn test_x_over_z_log_branches_agree_with_direct_formula() {
        // Both log branches are x(z)/z with x(z) = ln((y + z - ρ)/(1 - ρ))
        let rho = 0.25_f64;
        for z in [-2.0, -0.5, -1e-3, 1e-3, 0.5, 2.0] {
            let y = (1.0 - 2.0 * rho * z + z * z).sqrt();
            let direct = ((y + z - rho) / (1.0 - rho)).ln() / z;
            assert_relative_eq!(x_over_z(z, rho), direct, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_x_over_z_large_negative_is_finite() {
        let value = x_over_z(-1e6_f64, 0.3);
        assert!(value.is_finite() && value > 0.0);
    }

    // ==========================================================
    // bsm_equiv_vol
    // ==========================================================

    #[test]
    fn test_bsm_expired_is_zero() {
        assert_eq!(bsm_equiv_vol(90.0_f64, 100.0, 0.0, 0.2, 0.3, -0.3, 0.5), 0.0);
        assert_eq!(bsm_equiv_vol(90.0_f64, 100.0, -1.0, 0.2, 0.3, -0.3, 0.5), 0.0);
    }

    #[test]
    fn test_bsm_atm_lognormal_case() {
        // F = K: L = 0, z = 0, x/z = 1, pre1 = 1 for beta = 1
        // pre2 = 1 + (1.73·0.09/24 - 0.2·0.0225) = 1.0019875
        let vol = bsm_equiv_vol(100.0_f64, 100.0, 1.0, 0.2, 0.3, -0.3, 1.0);
        assert_relative_eq!(vol, 0.2 * 1.0019875, epsilon = 1e-14);
    }

    #[test]
    fn test_bsm_atm_cev_case() {
        // beta = 0.5: (FK)^(1/4) = 10 = pre1
        // pre2 = 1 + 0.0064875 + 0.2·(-0.001125 + 0.2·0.25/2400)
        let pre2 = 1.0 + 0.0064875 + 0.2 * (-0.001125 + 0.2 * 0.25 / 2400.0);
        let vol = bsm_equiv_vol(100.0_f64, 100.0, 1.0, 0.2, 0.3, -0.3, 0.5);
        assert_relative_eq!(vol, 0.2 * pre2 / 10.0, epsilon = 1e-14);
    }

    #[test]
    fn test_bsm_no_vol_of_vol_is_flat() {
        for strike in [50.0, 80.0, 100.0, 125.0, 200.0] {
            let vol = bsm_equiv_vol(strike, 100.0_f64, 2.0, 0.25, 0.0, -0.5, 1.0);
            assert_relative_eq!(vol, 0.25, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_bsm_negative_rho_gives_downward_skew() {
        let low = bsm_equiv_vol(80.0_f64, 100.0, 1.0, 0.2, 0.4, -0.5, 1.0);
        let atm = bsm_equiv_vol(100.0_f64, 100.0, 1.0, 0.2, 0.4, -0.5, 1.0);
        let high = bsm_equiv_vol(120.0_f64, 100.0, 1.0, 0.2, 0.4, -0.5, 1.0);
        assert!(low > atm && atm > high);
    }

    #[test]
    fn test_bsm_zero_sigma_maps_to_zero() {
        assert_eq!(bsm_equiv_vol(90.0_f64, 100.0, 1.0, 0.0, 0.3, -0.3, 1.0), 0.0);
        assert_eq!(bsm_equiv_vol(100.0_f64, 100.0, 1.0, 0.0, 0.3, -0.3, 0.5), 0.0);
    }

    #[test]
    fn test_bsm_continuous_across_series_threshold() {
        // z = L·α/σ with beta = 1; choose strikes putting z just either side of 1e-5
        let (forward, sigma, alpha, rho) = (100.0_f64, 0.2, 0.3, -0.3);
        let strike_at = |z: f64| forward / (z * sigma / alpha).exp();
        let inside = bsm_equiv_vol(strike_at(1e-5 * (1.0 - 1e-6)), forward, 1.0, sigma, alpha, rho, 1.0);
        let outside = bsm_equiv_vol(strike_at(1e-5 * (1.0 + 1e-6)), forward, 1.0, sigma, alpha, rho, 1.0);
        assert!((inside - outside).abs() < 1e-9);
    }

    #[test]
    fn test_bsm_f32() {
        let vol = bsm_equiv_vol(100.0_f32, 100.0, 1.0, 0.2, 0.3, -0.3, 1.0);
        assert!((vol - 0.2003975).abs() < 1e-6);
    }

    // ==========================================================
    // normal_equiv_vol
    // ==========================================================

    #[test]
    fn test_normal_expired_is_zero() {
        assert_eq!(normal_equiv_vol(90.0_f64, 100.0, 0.0, 20.0, 0.3, -0.3), 0.0);
    }

    #[test]
    fn test_normal_no_vol_of_vol_is_flat() {
        for strike in [-0.01, 0.0, 0.02, 0.05] {
            let vol = normal_equiv_vol(strike, 0.02_f64, 5.0, 0.008, 0.0, 0.3);
            assert_relative_eq!(vol, 0.008, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_normal_atm_curvature() {
        let vol = normal_equiv_vol(100.0_f64, 100.0, 2.0, 15.0, 0.4, -0.2);
        let expected = 15.0 * (1.0 + (2.0 - 3.0 * 0.04) / 24.0 * 0.16 * 2.0);
        assert_relative_eq!(vol, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_normal_smile_is_convex_at_zero_rho() {
        let atm = normal_equiv_vol(100.0_f64, 100.0, 1.0, 20.0, 0.5, 0.0);
        let low = normal_equiv_vol(70.0_f64, 100.0, 1.0, 20.0, 0.5, 0.0);
        let high = normal_equiv_vol(130.0_f64, 100.0, 1.0, 20.0, 0.5, 0.0);
        assert!(low > atm && high > atm);
        assert_relative_eq!(low, high, epsilon = 1e-12);
    }

    // ==========================================================
    // Slices
    // ==========================================================

    #[test]
    fn test_many_matches_scalar_elementwise() {
        let strikes = [80.0_f64, 95.0, 100.0, 105.0, 130.0];
        let forwards = [100.0_f64, 101.0, 99.0, 100.0, 102.0];
        let vols = bsm_equiv_vol_many(&strikes, &forwards, 1.5, 0.25, 0.4, -0.2, 0.7).unwrap();
        for (i, vol) in vols.iter().enumerate() {
            assert_eq!(*vol, bsm_equiv_vol(strikes[i], forwards[i], 1.5, 0.25, 0.4, -0.2, 0.7));
        }

        let nvols = normal_equiv_vol_many(&strikes, &forwards, 1.5, 20.0, 0.4, -0.2).unwrap();
        for (i, vol) in nvols.iter().enumerate() {
            assert_eq!(*vol, normal_equiv_vol(strikes[i], forwards[i], 1.5, 20.0, 0.4, -0.2));
        }
    }

    #[test]
    fn test_many_broadcasts_single_strike() {
        let vols = normal_equiv_vol_many(&[100.0_f64], &[95.0, 100.0, 105.0], 1.0, 20.0, 0.3, 0.0)
            .unwrap();
        assert_eq!(vols.len(), 3);
        assert_relative_eq!(vols[0], vols[2], epsilon = 1e-12);
    }

    #[test]
    fn test_many_shape_mismatch() {
        match bsm_equiv_vol_many(&[90.0_f64, 100.0, 110.0], &[100.0, 100.0], 1.0, 0.2, 0.3, 0.0, 1.0) {
            Err(SabrError::ShapeMismatch { strikes, forwards }) => {
                assert_eq!((strikes, forwards), (3, 2));
            }
            other => panic!("Expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_many_empty() {
        let vols = bsm_equiv_vol_many::<f64>(&[], &[], 1.0, 0.2, 0.3, 0.0, 1.0).unwrap();
        assert!(vols.is_empty());
    }

    #[test]
    fn test_many_expired_is_all_zero() {
        let vols = bsm_equiv_vol_many(&[90.0_f64, 110.0], &[100.0], 0.0, 0.2, 0.3, 0.0, 1.0).unwrap();
        assert_eq!(vols, vec![0.0, 0.0]);
    }
}
