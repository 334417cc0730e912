//! Standard normal density and cumulative distribution.

use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// 1/√(2π)
pub const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Standard normal probability density φ(x).
#[inline(always)]
pub fn standard_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() * INV_SQRT_2PI
}

/// Standard normal cumulative distribution N(x).
///
/// Evaluated through the complementary error function so the lower tail keeps
/// its relative precision instead of cancelling against 1.
#[inline(always)]
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}
