use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::config::IvConfig;
use crate::pricing::{Output, Pricing};
use crate::{BlackScholesError, Inputs, OptionType};

pub trait ImpliedVolatility: Pricing {
    fn calc_iv(&self) -> Result<f64, BlackScholesError>;
    fn calc_iv_with(&self, config: &IvConfig) -> Result<f64, BlackScholesError>;
}

/// Why the Newton stage gave up on its current guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FallbackReason {
    /// The Newton step left the volatility bounds (or became NaN).
    OutOfBounds(f64),
    /// The price error stopped shrinking.
    Stalled { best_error: f64, error: f64 },
    /// The step cap was hit.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NewtonOutcome {
    Converged(f64),
    NeedsFallback(FallbackReason),
}

impl ImpliedVolatility for Inputs {
    /// Calculates the implied volatility of the option with the default [`IvConfig`].
    /// # Requires
    /// s, k, r, q, t, p
    /// # Returns
    /// f64 of the implied volatility, or [`BlackScholesError::ConvergenceFailed`]
    /// when no volatility in `[0.01, 2.0]` reproduces `p` within `1e-5`.
    /// # Example:
    /// ```
    /// use blackscholes_iv::{ImpliedVolatility, Inputs, OptionType};
    /// let inputs = Inputs::new(OptionType::Call, 45.0, 45.0, Some(4.89), 0.02, 0.0, 1.0, None);
    /// let iv = inputs.calc_iv().unwrap();
    /// assert!((iv - 0.2499).abs() < 1e-4);
    /// ```
    fn calc_iv(&self) -> Result<f64, BlackScholesError> {
        self.calc_iv_with(&IvConfig::default())
    }

    /// Calculates the implied volatility of the option.
    ///
    /// Starts Newton-Raphson from the Brenner-Subrahmanyam estimate of
    /// [`approximate_iv`], clamped into the configured bounds. If Newton leaves
    /// the bounds, stops improving or runs out of steps, the volatility is
    /// searched again inside a bracket around the estimate, each step placing
    /// the next point by linear interpolation between the bracket ends.
    fn calc_iv_with(&self, config: &IvConfig) -> Result<f64, BlackScholesError> {
        config.validate()?;
        let p = self.p.ok_or(BlackScholesError::MissingPrice)?;

        match newton_stage(self, p, config) {
            NewtonOutcome::Converged(sigma) => Ok(sigma),
            NewtonOutcome::NeedsFallback(reason) => {
                debug!(?reason, price = p, "newton stage did not converge, bracketing");
                bracketed_stage(self, p, config)
            }
        }
    }
}

/// Closed-form estimate of the implied volatility in the manner of Brenner and
/// Subrahmanyam, with a forward moneyness term so the guess stays positive away
/// from the money.
///
/// Not clamped; with `t == 0.0` the result is infinite or NaN.
///
/// # Example:
/// ```
/// use blackscholes_iv::{approximate_iv, Inputs, OptionType};
/// let inputs = Inputs::new(OptionType::Call, 45.0, 45.0, None, 0.02, 0.0, 1.0, None);
/// let guess = approximate_iv(&inputs, 4.89);
/// assert!((guess - 0.2779).abs() < 1e-4);
/// ```
pub fn approximate_iv(inputs: &Inputs, option_price: f64) -> f64 {
    let ebrt = ((inputs.q - inputs.r) * inputs.t).exp();
    let ert = (-inputs.r * inputs.t).exp();

    let a = (2.0 * PI).sqrt() / (inputs.s * ebrt + inputs.k * ert);
    let payoff = match inputs.option_type {
        OptionType::Call => inputs.s * ebrt - inputs.k * ert,
        OptionType::Put => inputs.k * ert - inputs.s * ebrt,
    };

    let d = option_price - payoff / 2.0;
    let c = payoff.powi(2) / PI;

    a * (d + (d.powi(2) + c).sqrt()) / inputs.t.sqrt()
}

pub(crate) fn newton_stage(inputs: &Inputs, option_price: f64, config: &IvConfig) -> NewtonOutcome {
    let mut sigma = config.clamp(approximate_iv(inputs, option_price));
    if sigma.is_nan() {
        return NewtonOutcome::NeedsFallback(FallbackReason::OutOfBounds(sigma));
    }
    let mut current = inputs.evaluate(sigma, Output::PriceAndVega);
    let mut best_error = (option_price - current.price).abs();

    for iteration in 0..config.iteration_cap() {
        let error = (option_price - current.price).abs();
        if error < config.tolerance {
            return NewtonOutcome::Converged(sigma);
        }

        // vega is reported per 1% move
        let next = sigma - (current.price - option_price) / (current.vega * 100.0);
        trace!(iteration, sigma, next, error, "newton step");
        if !config.in_bounds(next) {
            return NewtonOutcome::NeedsFallback(FallbackReason::OutOfBounds(next));
        }

        sigma = next;
        current = inputs.evaluate(sigma, Output::PriceAndVega);
        let next_error = (option_price - current.price).abs();
        if next_error < config.tolerance {
            return NewtonOutcome::Converged(sigma);
        }
        if next_error >= best_error {
            return NewtonOutcome::NeedsFallback(FallbackReason::Stalled {
                best_error,
                error: next_error,
            });
        }
        best_error = next_error;
    }

    NewtonOutcome::NeedsFallback(FallbackReason::Exhausted)
}

/// False-position search inside `[min_iv, max_iv]`.
///
/// The bracket starts at half to one and a half times the estimate, or spans
/// the full bounds when the estimate is not strictly inside them.
pub(crate) fn bracketed_stage(
    inputs: &Inputs,
    option_price: f64,
    config: &IvConfig,
) -> Result<f64, BlackScholesError> {
    let price_at = |sigma: f64| inputs.evaluate(sigma, Output::Price).price;

    let estimate = approximate_iv(inputs, option_price);
    let (mut low, mut high, mut middle) = if estimate > config.min_iv && estimate < config.max_iv {
        (
            config.min_iv.max(estimate * 0.5),
            config.max_iv.min(estimate * 1.5),
            estimate,
        )
    } else {
        (
            config.min_iv,
            config.max_iv,
            0.5 * (config.min_iv + config.max_iv),
        )
    };
    debug!(low, high, middle, "initial bracket");

    let mut price_mid = price_at(middle);
    let mut error = (option_price - price_mid).abs();
    let mut step = 0;

    while error > config.tolerance && step < config.iteration_cap() {
        step += 1;

        if price_mid < option_price {
            low = middle;
        } else {
            high = middle;
        }

        let price_low = price_at(low);
        let price_high = price_at(high);
        middle = config.clamp(
            low + (option_price - price_low) * (high - low) / (price_high - price_low),
        );

        price_mid = price_at(middle);
        error = (option_price - price_mid).abs();
        trace!(step, low, high, middle, error, "bracket step");
    }

    if error <= config.tolerance {
        Ok(middle)
    } else {
        debug!(step, error, price = option_price, "no implied volatility found");
        Err(BlackScholesError::ConvergenceFailed {
            iterations: step,
            residual: error,
        })
    }
}
