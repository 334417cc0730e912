//! Batch APIs for pricing, greeks and implied volatility, with optional
//! parallelism via the `parallel` feature.
//!
//! Every element is solved independently; one failing input does not affect
//! the others.

use crate::{AllGreeks, BlackScholesError, Greeks, ImpliedVolatility, Inputs, IvConfig, Pricing};

/// Compute `calc_price()` for a slice of inputs, serially.
pub fn price_batch(inputs: &[Inputs]) -> Vec<Result<f64, BlackScholesError>> {
    inputs.iter().map(|inp| inp.calc_price()).collect()
}

/// Compute `calc_all_greeks()` for a slice of inputs, serially.
pub fn all_greeks_batch(inputs: &[Inputs]) -> Vec<Result<AllGreeks, BlackScholesError>> {
    inputs.iter().map(|inp| inp.calc_all_greeks()).collect()
}

/// Compute `calc_iv_with(config)` for a slice of inputs, serially.
pub fn iv_batch(inputs: &[Inputs], config: &IvConfig) -> Vec<Result<f64, BlackScholesError>> {
    inputs.iter().map(|inp| inp.calc_iv_with(config)).collect()
}

/// Parallel price batch if the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn price_batch_par(inputs: &[Inputs]) -> Vec<Result<f64, BlackScholesError>> {
    use rayon::prelude::*;
    inputs.par_iter().map(|inp| inp.calc_price()).collect()
}

/// Parallel all-greeks batch if the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn all_greeks_batch_par(inputs: &[Inputs]) -> Vec<Result<AllGreeks, BlackScholesError>> {
    use rayon::prelude::*;
    inputs.par_iter().map(|inp| inp.calc_all_greeks()).collect()
}

/// Parallel implied volatility batch if the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn iv_batch_par(inputs: &[Inputs], config: &IvConfig) -> Vec<Result<f64, BlackScholesError>> {
    use rayon::prelude::*;
    inputs.par_iter().map(|inp| inp.calc_iv_with(config)).collect()
}
