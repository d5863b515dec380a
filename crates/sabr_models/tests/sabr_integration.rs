//! Integration tests for the SABR models.
//!
//! # Test Categories
//!
//! 1. **Degenerate expiry**: both mappers collapse to zero
//! 2. **Branch continuity**: no jump where the series branch hands over
//! 3. **Round trips**: price → calibrated sigma recovers the model sigma
//! 4. **Slices**: batch evaluation matches the scalar functions
//! 5. **Pluggable root finder**: a custom bracketing solver drives calibration

use std::cell::{Cell, RefCell};

use approx::assert_relative_eq;
use proptest::prelude::*;
use sabr_core::math::solvers::{Bracket, BracketingSolver, BrentSolver};
use sabr_core::types::{PayoffType, SolverError};
use sabr_models::analytical::BlackScholes;
use sabr_models::models::sabr::{
    bsm_equiv_vol, bsm_equiv_vol_many, normal_equiv_vol, normal_equiv_vol_many, SabrConfig,
    SabrError, SabrHagan, SabrNormalHagan, SabrParams,
};
use sabr_models::models::sabr::mapper::SERIES_THRESHOLD;

fn lognormal(sigma: f64, alpha: f64, rho: f64, beta: f64, texp: f64) -> SabrHagan<f64> {
    let params = SabrParams::new(sigma, alpha, rho, beta).unwrap();
    SabrHagan::new(SabrConfig::new(texp, params, 0.02, 0.01).unwrap()).unwrap()
}

fn normal(sigma: f64, alpha: f64, rho: f64, texp: f64) -> SabrNormalHagan<f64> {
    let params = SabrParams::normal(sigma, alpha, rho).unwrap();
    SabrNormalHagan::new(SabrConfig::new(texp, params, 0.02, 0.01).unwrap()).unwrap()
}

// ============================================================================
// Degenerate expiry
// ============================================================================

#[test]
fn test_expired_vols_are_exactly_zero() {
    for texp in [0.0, -0.5, -10.0] {
        assert_eq!(bsm_equiv_vol(90.0, 100.0, texp, 0.2, 0.5, -0.4, 0.5), 0.0);
        assert_eq!(normal_equiv_vol(90.0, 100.0, texp, 20.0, 0.5, -0.4), 0.0);
    }
}

#[test]
fn test_expired_model_prices_are_intrinsic() {
    let model = lognormal(0.2, 0.3, -0.3, 1.0, 1.0);
    assert_eq!(model.price(90.0, 100.0, Some(0.0), None, PayoffType::Call), 10.0);
    assert_eq!(model.price(110.0, 100.0, Some(0.0), None, PayoffType::Put), 10.0);

    let model = normal(20.0, 0.3, -0.3, 1.0);
    assert_eq!(model.price(110.0, 100.0, Some(0.0), None, PayoffType::Call), 0.0);
}

// ============================================================================
// Concrete at-the-money case
// ============================================================================

#[test]
fn test_atm_lognormal_hand_computed() {
    // L = 0 and z = 0: only pre2 survives
    let pre2 = 1.0 + (2.0 - 3.0 * 0.09) * 0.09 / 24.0 + 0.2 * (0.3 * -0.3 / 4.0);
    let vol = bsm_equiv_vol(100.0, 100.0, 1.0, 0.2, 0.3, -0.3, 1.0);
    assert_relative_eq!(vol, 0.2 * pre2, epsilon = 1e-15);
    assert_relative_eq!(vol, 0.2003975, epsilon = 1e-12);
}

#[test]
fn test_alpha_zero_reduces_to_sigma_over_pre1() {
    // alpha = 0: z = 0 and the alpha terms of pre2 vanish
    let (strike, forward, sigma, beta) = (80.0_f64, 100.0_f64, 2.0, 0.5);
    let pow_fk = (forward * strike).powf(0.25);
    let log_fk = (forward / strike).ln();
    let pre1 = pow_fk * (1.0 + 0.25 / 24.0 * log_fk.powi(2) * (1.0 + 0.25 / 80.0 * log_fk.powi(2)));
    let pre2 = 1.0 + sigma * sigma * 0.25 / (24.0 * pow_fk * pow_fk);

    let vol = bsm_equiv_vol(strike, forward, 1.0, sigma, 0.0, 0.7, beta);
    assert_relative_eq!(vol, sigma * pre2 / pre1, epsilon = 1e-14);
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_lognormal_round_trip_across_smile() {
    let mut model = lognormal(0.25, 0.5, -0.4, 1.0, 2.0);
    for strike in [60.0, 75.0, 90.0, 100.0, 110.0, 130.0, 160.0] {
        for payoff in [PayoffType::Call, PayoffType::Put] {
            let price = model.price(strike, 100.0, None, None, payoff);
            let sigma = model
                .calibrate_sigma(price, strike, 100.0, None, payoff, false)
                .unwrap();
            assert_relative_eq!(sigma, 0.25, epsilon = 1e-6);
        }
    }
    assert_eq!(model.sigma(), 0.25);
}

#[test]
fn test_normal_round_trip_across_smile() {
    let model = normal(18.0, 0.6, 0.3, 0.5);
    for strike in [70.0, 85.0, 100.0, 115.0, 130.0] {
        for payoff in [PayoffType::Call, PayoffType::Put] {
            let price = model.price(strike, 100.0, None, None, payoff);
            let sigma = model.implied_sigma(price, strike, 100.0, None, payoff).unwrap();
            assert_relative_eq!(sigma, 18.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_calibrated_model_reprices_quote() {
    let mut model = lognormal(0.2, 0.4, -0.3, 0.8, 1.0);
    let quote = 7.5;
    model
        .calibrate_sigma(quote, 105.0, 100.0, None, PayoffType::Call, true)
        .unwrap();
    let repriced = model.price(105.0, 100.0, None, None, PayoffType::Call);
    assert_relative_eq!(repriced, quote, epsilon = 1e-7);
}

// ============================================================================
// Bracket failures
// ============================================================================

#[test]
fn test_quote_unreachable_in_default_bracket() {
    // beta = 0 puts sigma on the price scale: a 20% Black vol needs sigma ≈ 20
    let model = lognormal(20.0, 0.3, 0.0, 0.0, 1.0);
    let price = model.price(100.0, 100.0, None, None, PayoffType::Call);
    match model.implied_sigma(price, 100.0, 100.0, None, PayoffType::Call) {
        Err(SabrError::RootBracketFailure { lower, upper, .. }) => {
            assert_eq!((lower, upper), (0.0, 10.0));
        }
        other => panic!("Expected RootBracketFailure, got {:?}", other),
    }
}

// ============================================================================
// Pluggable root finder
// ============================================================================

/// Brent wrapper counting how often calibration asks for a root.
struct CountingSolver {
    inner: BrentSolver<f64>,
    calls: Cell<usize>,
}

impl BracketingSolver<f64> for CountingSolver {
    fn find_root_in<F>(&self, f: F, bracket: &Bracket<f64>) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        self.calls.set(self.calls.get() + 1);
        self.inner.find_root_in(f, bracket)
    }
}

#[test]
fn test_custom_solver_is_used() {
    let params = SabrParams::new(0.2, 0.3, -0.3, 1.0).unwrap();
    let config = SabrConfig::new(1.0, params, 0.0, 0.0).unwrap();
    let solver = CountingSolver {
        inner: BrentSolver::with_defaults(),
        calls: Cell::new(0),
    };
    let model: SabrHagan<f64, BlackScholes<f64>, CountingSolver> =
        SabrHagan::with_solver(config, solver, Bracket::new(0.01, 1.0).unwrap()).unwrap();

    let price = model.price(95.0, 100.0, None, None, PayoffType::Put);
    let sigma = model.implied_sigma(price, 95.0, 100.0, None, PayoffType::Put).unwrap();
    assert_relative_eq!(sigma, 0.2, epsilon = 1e-6);
    assert_eq!(model.solver().calls.get(), 1);
}

/// Records every sigma the calibration objective is evaluated at.
struct RecordingSolver {
    inner: BrentSolver<f64>,
    seen: RefCell<Vec<f64>>,
}

impl BracketingSolver<f64> for RecordingSolver {
    fn find_root_in<F>(&self, f: F, bracket: &Bracket<f64>) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        self.inner.find_root_in(
            |sigma| {
                self.seen.borrow_mut().push(sigma);
                f(sigma)
            },
            bracket,
        )
    }
}

#[test]
fn test_calibration_only_evaluates_sigma_inside_bracket() {
    // Quotes generated at sigma = 0.2 from a model configured at 0.5
    let params = SabrParams::new(0.5, 0.3, -0.3, 1.0).unwrap();
    let config = SabrConfig::new(1.0, params, 0.0, 0.0).unwrap();
    let solver = RecordingSolver {
        inner: BrentSolver::with_defaults(),
        seen: RefCell::new(Vec::new()),
    };
    let bracket = Bracket::lognormal_sigma();
    let model: SabrHagan<f64, BlackScholes<f64>, RecordingSolver> =
        SabrHagan::with_solver(config, solver, bracket).unwrap();

    for strike in [80.0, 100.0, 125.0] {
        let quote = model.price(strike, 100.0, None, Some(0.2), PayoffType::Call);
        let sigma = model
            .implied_sigma(quote, strike, 100.0, None, PayoffType::Call)
            .unwrap();
        assert!(bracket.contains(sigma));
        assert_relative_eq!(sigma, 0.2, epsilon = 1e-7);
    }

    let seen = model.solver().seen.borrow();
    assert!(!seen.is_empty());
    for &sigma in seen.iter() {
        assert!(
            bracket.contains(sigma),
            "objective evaluated at sigma = {} outside [{}, {}]",
            sigma,
            bracket.lower(),
            bracket.upper()
        );
    }
}

// ============================================================================
// Property-based tests
// ============================================================================

proptest! {
    /// No jump larger than 1e-6 where the series branch meets the log branch.
    #[test]
    fn prop_bsm_continuous_at_threshold(
        rho in -0.95_f64..0.95,
        alpha in 0.05_f64..1.5,
        sigma in 0.05_f64..1.0,
        negative in any::<bool>(),
    ) {
        let forward = 100.0_f64;
        let sign = if negative { -1.0 } else { 1.0 };
        // beta = 1: z = ln(F/K)·alpha/sigma
        let strike_for = |z: f64| forward / (z * sigma / alpha).exp();
        let inside = strike_for(sign * SERIES_THRESHOLD * (1.0 - 1e-7));
        let outside = strike_for(sign * SERIES_THRESHOLD * (1.0 + 1e-7));

        let a = bsm_equiv_vol(inside, forward, 1.0, sigma, alpha, rho, 1.0);
        let b = bsm_equiv_vol(outside, forward, 1.0, sigma, alpha, rho, 1.0);
        prop_assert!((a - b).abs() < 1e-6, "jump {} at rho {}", (a - b).abs(), rho);
    }

    #[test]
    fn prop_normal_continuous_at_threshold(
        rho in -0.95_f64..0.95,
        alpha in 0.05_f64..1.5,
        sigma in 1.0_f64..40.0,
        negative in any::<bool>(),
    ) {
        let forward = 100.0_f64;
        let sign = if negative { -1.0 } else { 1.0 };
        // zeta = (F - K)·alpha/sigma
        let strike_for = |zeta: f64| forward - zeta * sigma / alpha;
        let inside = strike_for(sign * SERIES_THRESHOLD * (1.0 - 1e-7));
        let outside = strike_for(sign * SERIES_THRESHOLD * (1.0 + 1e-7));

        let a = normal_equiv_vol(inside, forward, 1.0, sigma, alpha, rho);
        let b = normal_equiv_vol(outside, forward, 1.0, sigma, alpha, rho);
        prop_assert!((a - b).abs() < 1e-6);
    }

    /// Batch evaluation is the scalar function applied elementwise.
    #[test]
    fn prop_many_matches_scalar(
        strikes in proptest::collection::vec(50.0_f64..200.0, 1..20),
        forward in 60.0_f64..150.0,
        beta in 0.0_f64..=1.0,
        rho in -0.9_f64..0.9,
    ) {
        let vols = bsm_equiv_vol_many(&strikes, &[forward], 1.0, 0.3, 0.4, rho, beta).unwrap();
        prop_assert_eq!(vols.len(), strikes.len());
        for (k, v) in strikes.iter().zip(&vols) {
            prop_assert_eq!(*v, bsm_equiv_vol(*k, forward, 1.0, 0.3, 0.4, rho, beta));
        }

        let nvols = normal_equiv_vol_many(&strikes, &[forward], 1.0, 20.0, 0.4, rho).unwrap();
        for (k, v) in strikes.iter().zip(&nvols) {
            prop_assert_eq!(*v, normal_equiv_vol(*k, forward, 1.0, 20.0, 0.4, rho));
        }
    }

    /// Calibrating to the model's own price recovers sigma.
    #[test]
    fn prop_lognormal_round_trip(
        sigma in 0.1_f64..0.6,
        alpha in 0.0_f64..0.8,
        rho in -0.7_f64..0.7,
        strike in 80.0_f64..125.0,
    ) {
        let model = lognormal(sigma, alpha, rho, 1.0, 1.0);
        let payoff = if strike >= 100.0 { PayoffType::Call } else { PayoffType::Put };
        let price = model.price(strike, 100.0, None, None, payoff);
        let implied = model.implied_sigma(price, strike, 100.0, None, payoff).unwrap();
        prop_assert!((implied - sigma).abs() < 1e-6, "{} vs {}", implied, sigma);
    }
}
