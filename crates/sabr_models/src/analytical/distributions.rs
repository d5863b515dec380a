//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function
//! - `norm_pdf`: probability density function
//!
//! Both are generic over `T: Float`. The CDF is built on Cody's rational
//! Chebyshev approximation of erfc evaluated at `|x|` and reflected, so
//! `norm_cdf(x) + norm_cdf(-x) == 1` holds up to rounding. Put-call parity of
//! the pricers relies on that symmetry.

use num_traits::Float;

/// 1 / sqrt(2π)
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// W. J. Cody, "Rational Chebyshev approximations for the error function"
// (Math. Comp. 23, 1969). Tables keep the CALERF order: the highest-order
// numerator coefficient is stored last.

/// erf(x) = x·A(x²)/B(x²) for |x| <= 0.46875.
const ERF_NUM: [f64; 5] = [
    3.161_123_743_870_565_6e0,
    1.138_641_541_510_501_56e2,
    3.774_852_376_853_020_21e2,
    3.209_377_589_138_469_47e3,
    1.857_777_061_846_031_53e-1,
];
const ERF_DEN: [f64; 4] = [
    2.360_129_095_234_412_09e1,
    2.440_246_379_344_441_73e2,
    1.282_616_526_077_372_28e3,
    2.844_236_833_439_170_62e3,
];

/// erfc(x) = exp(-x²)·C(x)/D(x) for 0.46875 < x <= 4.
const ERFC_MID_NUM: [f64; 9] = [
    5.641_884_969_886_700_89e-1,
    8.883_149_794_388_375_94e0,
    6.611_919_063_714_162_95e1,
    2.986_351_381_974_001_31e2,
    8.819_522_212_417_690_90e2,
    1.712_047_612_634_070_58e3,
    2.051_078_377_826_071_47e3,
    1.230_339_354_797_997_25e3,
    2.153_115_354_744_038_46e-8,
];
const ERFC_MID_DEN: [f64; 8] = [
    1.574_492_611_070_983_47e1,
    1.176_939_508_913_124_99e2,
    5.371_811_018_620_098_58e2,
    1.621_389_574_566_690_19e3,
    3.290_799_235_733_459_63e3,
    4.362_619_090_143_247_16e3,
    3.439_367_674_143_721_64e3,
    1.230_339_354_803_749_42e3,
];

/// Asymptotic tail for x > 4, in powers of 1/x².
const ERFC_TAIL_NUM: [f64; 6] = [
    3.053_266_349_612_323_44e-1,
    3.603_448_999_498_044_39e-1,
    1.257_817_261_112_292_46e-1,
    1.608_378_514_874_227_66e-2,
    6.587_491_615_298_378_03e-4,
    1.631_538_713_730_209_78e-2,
];
const ERFC_TAIL_DEN: [f64; 5] = [
    2.568_520_192_289_822_42e0,
    1.872_952_849_923_467_25e0,
    5.279_051_029_514_284_12e-1,
    6.051_834_131_244_131_91e-2,
    2.335_204_976_268_691_85e-3,
];

const ERF_SMALL_LIMIT: f64 = 0.468_75;
const ERFC_MID_LIMIT: f64 = 4.0;
/// erfc underflows to zero in f64 beyond this point.
const ERFC_UNDERFLOW: f64 = 26.543;
/// 1 / sqrt(π)
const FRAC_1_SQRT_PI: f64 = 0.564_189_583_547_756_286_9;

#[inline]
fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap()
}

/// Ratio of the two Horner polynomials in `z`; the denominator is monic.
#[inline]
fn cody_ratio<T: Float>(z: T, num: &[f64], den: &[f64]) -> T {
    let last = den.len() - 1;
    let mut xnum = lit::<T>(num[num.len() - 1]) * z;
    let mut xden = z;
    for (&n, &d) in num.iter().zip(&den[..last]) {
        xnum = (xnum + lit(n)) * z;
        xden = (xden + lit(d)) * z;
    }
    (xnum + lit(num[last])) / (xden + lit(den[last]))
}

/// `exp(-y²)·r`, with y² split so the exponent keeps full precision.
#[inline]
fn scale_by_gaussian<T: Float>(y: T, r: T) -> T {
    let sixteen = lit::<T>(16.0);
    let head = (y * sixteen).floor() / sixteen;
    let rest = (y - head) * (y + head);
    (-head * head).exp() * (-rest).exp() * r
}

/// erfc(|x|), relative error below 1e-15 in f64.
#[inline]
fn erfc_abs<T: Float>(x: T) -> T {
    let y = x.abs();
    if y.is_nan() {
        return y;
    }

    if y <= lit(ERF_SMALL_LIMIT) {
        T::one() - y * cody_ratio(y * y, &ERF_NUM, &ERF_DEN)
    } else if y <= lit(ERFC_MID_LIMIT) {
        scale_by_gaussian(y, cody_ratio(y, &ERFC_MID_NUM, &ERFC_MID_DEN))
    } else if y < lit(ERFC_UNDERFLOW) {
        let z = T::one() / (y * y);
        let r = z * cody_ratio(z, &ERFC_TAIL_NUM, &ERFC_TAIL_DEN);
        scale_by_gaussian(y, (lit::<T>(FRAC_1_SQRT_PI) - r) / y)
    } else {
        T::zero()
    }
}

/// Standard normal cumulative distribution function Φ(x).
///
/// Φ(x) = erfc(-x/√2) / 2, evaluated as `1 - erfc(|x|/√2)/2` for positive
/// `x` so that the tails are handled symmetrically.
///
/// # Accuracy
/// Relative error of the tail below 1e-15 in f64, so deep out-of-the-money
/// prices keep their significant digits.
///
/// # Examples
/// ```
/// use sabr_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let tail = half * erfc_abs(x / T::from(std::f64::consts::SQRT_2).unwrap());

    if x < T::zero() {
        tail
    } else {
        T::one() - tail
    }
}

/// Standard normal density φ(x) = exp(-x²/2) / √(2π).
///
/// # Examples
/// ```
/// use sabr_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    T::from(FRAC_1_SQRT_2PI).unwrap() * (-half * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ==========================================================
    // norm_cdf
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_symmetry_is_exact() {
        for x in [-4.0, -2.5, -1.0, -0.3, 0.0, 0.3, 1.0, 2.5, 4.0_f64] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.02275013194817922, epsilon = 1e-14);
        assert_relative_eq!(norm_cdf(3.0_f64), 0.9986501019683699, epsilon = 1e-14);
    }

    #[test]
    fn test_erfc_each_branch() {
        // One point inside each rational approximation, then past underflow
        assert_relative_eq!(erfc_abs(0.3_f64), 0.6713732405408726, max_relative = 1e-14);
        assert_relative_eq!(erfc_abs(-1.5_f64), 0.033894853524689274, max_relative = 1e-14);
        assert_relative_eq!(erfc_abs(5.0_f64), 1.5374597944280351e-12, max_relative = 1e-14);
        assert_eq!(erfc_abs(30.0_f64), 0.0);
        assert!(erfc_abs(f64::NAN).is_nan());
    }

    #[test]
    fn test_deep_tail_keeps_relative_precision() {
        // Φ(-8) = 6.22e-16 is well below the absolute error of a
        // single-precision polynomial fit
        assert_relative_eq!(norm_cdf(-8.0_f64), 6.220960574271819e-16, max_relative = 1e-13);
        assert_relative_eq!(norm_cdf(-5.0_f64), 2.866515718791946e-7, max_relative = 1e-13);
    }

    #[test]
    fn test_norm_cdf_tails_stay_in_unit_interval() {
        for x in [-10.0, -8.0, 8.0, 10.0_f64] {
            let p = norm_cdf(x);
            assert!((0.0..=1.0).contains(&p), "Φ({}) = {}", x, p);
        }
        assert!(norm_cdf(-8.0_f64) < 1e-6);
        assert!(norm_cdf(8.0_f64) > 1.0 - 1e-6);
    }

    #[test]
    fn test_norm_cdf_monotonic() {
        let grid: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.1).collect();
        for pair in grid.windows(2) {
            assert!(norm_cdf(pair[1]) > norm_cdf(pair[0]), "not increasing at {}", pair[0]);
        }
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf
    // ==========================================================

    #[test]
    fn test_norm_pdf_reference_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(norm_pdf(2.0_f64), 0.05399096651318806, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(3.0_f64), 0.004431848411938008, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf_even_function() {
        for x in [0.5, 1.0, 2.0, 3.0_f64] {
            assert_eq!(norm_pdf(x), norm_pdf(-x));
        }
    }

    #[test]
    fn test_cdf_derivative_matches_pdf() {
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0_f64] {
            let slope = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(slope, norm_pdf(x), epsilon = 1e-4);
        }
    }
}
