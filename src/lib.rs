//! This library prices European options under the Black-Scholes-Merton model with a
//! continuous dividend (cost-of-carry) yield, and inverts the model to recover implied
//! volatility from an observed price.
//!
//! Provides methods for pricing options, calculating the first order Greeks
//! (delta, gamma, theta, vega, rho) and calculating implied volatility.
//!
//! ### Example:
//! ```
//! use blackscholes_iv::{ImpliedVolatility, Inputs, OptionType, Pricing};
//! let inputs = Inputs::new(OptionType::Call, 45.0, 45.0, None, 0.02, 0.0, 1.0, Some(0.25));
//! let price = inputs.calc_price().unwrap();
//! let iv = inputs.with_price(price).calc_iv().unwrap();
//! assert!((iv - 0.25).abs() < 1e-4);
//! ```
//!
//! The same model is reachable without building [`Inputs`] through [`price`] and
//! [`implied_volatility`].
//!
//! Conventions
//! -----------
//! Rates, yields and volatility are annualized decimals (0.05 = 5%), time to expiry is
//! in years. Vega and rho are per 1% move, theta is per calendar day (365 days).
//! At or past expiry the price is `|k - s|` for calls and puts alike and all Greeks are zero.
//!
//! Errors
//! -------
//! Pricing never fails on numeric grounds; NaN and infinity propagate. The implied
//! volatility solver returns [`BlackScholesError::ConvergenceFailed`] instead of a guess
//! that misses the observed price:
//!
//! ```rust
//! use blackscholes_iv::{implied_volatility, BlackScholesError, OptionType};
//!
//! match implied_volatility(OptionType::Call, 100.0, 1000.0, 0.01, 0.02, 0.0, 0.01, None) {
//!     Ok(iv) => println!("iv = {}", iv),
//!     Err(BlackScholesError::ConvergenceFailed { iterations, .. }) => {
//!         println!("no volatility found after {} steps", iterations)
//!     }
//!     Err(e) => println!("error: {}", e),
//! }
//! ```
//!
//! Parallel batch
//! --------------
//! Enable the `parallel` feature to compute batches with Rayon:
//!
//! ```ignore
//! # features = ["parallel"]
//! use blackscholes_iv::{batch::all_greeks_batch_par, Inputs, OptionType};
//! let inputs = vec![Inputs::new(OptionType::Call, 100.0, 100.0, None, 0.05, 0.01, 0.25, Some(0.2)); 8_000];
//! let results = all_greeks_batch_par(&inputs);
//! ```

pub use crate::config::{IvConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_PRECISION, MAX_IV, MIN_IV};
pub use crate::error::{BlackScholesError, Result};
pub use greeks::{AllGreeks, Greeks};
pub use implied_volatility::{approximate_iv, ImpliedVolatility};
pub use inputs::{Inputs, OptionType};
pub use pricing::{OptionPrice, Pricing};

pub mod batch;
mod config;
mod error;
mod greeks;
mod implied_volatility;
mod inputs;
pub mod normal_distribution;
mod pricing;

use normal_distribution::standard_normal_cdf;
use pricing::Output;

pub(crate) const DAYS_PER_YEAR: f64 = 365.0;

/// Calculates the d1 and d2 values for the option at volatility `sigma`.
/// # Requires
/// s, k, r, q, t.
/// # Returns
/// Tuple (f64, f64) of (d1, d2), both unsigned.
#[inline(always)]
pub(crate) fn calc_d1d2(inputs: &Inputs, sigma: f64) -> (f64, f64) {
    let numd1 = (inputs.s / inputs.k).ln() + (inputs.r - inputs.q + 0.5 * sigma * sigma) * inputs.t;
    let den = sigma * inputs.t.sqrt();

    let d1 = numd1 / den;
    let d2 = d1 - den;

    (d1, d2)
}

/// Calculates N(±d1) and N(±d2), the sign taken from the option type.
#[inline(always)]
pub(crate) fn calc_nd1nd2(option_type: OptionType, d1: f64, d2: f64) -> (f64, f64) {
    let sign = option_type.sign();
    (standard_normal_cdf(sign * d1), standard_normal_cdf(sign * d2))
}

/// Prices a European option, with all five Greeks when `greeks` is set.
///
/// # Example:
/// ```
/// use blackscholes_iv::{price, OptionType};
/// let put = price(OptionType::Put, 45.0, 45.0, 1.0, 0.02, 0.0, 0.25, true);
/// assert!((put.price - 4.0007).abs() < 1e-4);
/// assert!((put.rho + 0.22846).abs() < 1e-5);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    greeks: bool,
) -> OptionPrice {
    let inputs = Inputs::new(
        option_type,
        spot,
        strike,
        None,
        rate,
        dividend_yield,
        time_to_expiry,
        Some(volatility),
    );
    let output = if greeks { Output::All } else { Output::Price };
    inputs.evaluate(volatility, output)
}

/// Solves for the volatility that reproduces `observed_price`.
///
/// `max_iterations` caps each solver stage and defaults to [`DEFAULT_MAX_ITERATIONS`];
/// bounds and tolerance are the [`IvConfig`] defaults.
///
/// # Example:
/// ```
/// use blackscholes_iv::{implied_volatility, OptionType};
/// let iv = implied_volatility(OptionType::Put, 45.0, 45.0, 1.0, 0.02, 0.0, 4.00, None).unwrap();
/// assert!((iv - 0.24996).abs() < 1e-4);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    rate: f64,
    dividend_yield: f64,
    observed_price: f64,
    max_iterations: Option<usize>,
) -> Result<f64> {
    let inputs = Inputs::new(
        option_type,
        spot,
        strike,
        Some(observed_price),
        rate,
        dividend_yield,
        time_to_expiry,
        None,
    );
    let config = IvConfig::default().with_max_iterations(max_iterations.unwrap_or(0));
    inputs.calc_iv_with(&config)
}
