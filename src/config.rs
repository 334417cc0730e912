//! Implied volatility solver settings.
//!
//! Every knob of the solver lives in [`IvConfig`]; the constants below are its
//! defaults. The struct is serde-enabled so callers can keep it next to the rest
//! of their configuration.

use serde::{Deserialize, Serialize};

use crate::BlackScholesError;

/// Lowest volatility the solver will return (1% annualized).
pub const MIN_IV: f64 = 0.01;
/// Highest volatility the solver will return (200% annualized).
pub const MAX_IV: f64 = 2.0;
/// Absolute price error at which the solver accepts a volatility.
pub const DEFAULT_PRECISION: f64 = 1e-5;
/// Step cap for each solver stage.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Implied volatility solver settings.
///
/// # Example:
/// ```
/// use blackscholes_iv::IvConfig;
/// let config = IvConfig::default().with_max_iterations(50).with_tolerance(1e-8);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.min_iv, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IvConfig {
    /// Lower bound of the volatility search range.
    pub min_iv: f64,
    /// Upper bound of the volatility search range.
    pub max_iv: f64,
    /// Convergence threshold on `|observed - model|` price.
    pub tolerance: f64,
    /// Step cap applied to the Newton stage and again to the bracketed stage.
    /// Zero selects [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: usize,
}

impl Default for IvConfig {
    fn default() -> Self {
        Self {
            min_iv: MIN_IV,
            max_iv: MAX_IV,
            tolerance: DEFAULT_PRECISION,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl IvConfig {
    /// Sets the step cap. Zero selects [`DEFAULT_MAX_ITERATIONS`].
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = if max_iterations == 0 {
            DEFAULT_MAX_ITERATIONS
        } else {
            max_iterations
        };
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_bounds(mut self, min_iv: f64, max_iv: f64) -> Self {
        self.min_iv = min_iv;
        self.max_iv = max_iv;
        self
    }

    /// Rejects settings the solver cannot work with.
    pub fn validate(&self) -> Result<(), BlackScholesError> {
        if !self.min_iv.is_finite() || self.min_iv <= 0.0 {
            return Err(BlackScholesError::InvalidInput(
                "min_iv must be positive and finite",
            ));
        }
        if !self.max_iv.is_finite() || self.max_iv <= self.min_iv {
            return Err(BlackScholesError::InvalidInput(
                "max_iv must be finite and greater than min_iv",
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BlackScholesError::InvalidInput(
                "tolerance must be positive and finite",
            ));
        }
        Ok(())
    }

    /// The step cap the solver stages actually run with.
    #[inline(always)]
    pub fn iteration_cap(&self) -> usize {
        if self.max_iterations == 0 {
            DEFAULT_MAX_ITERATIONS
        } else {
            self.max_iterations
        }
    }

    #[inline(always)]
    pub(crate) fn in_bounds(&self, sigma: f64) -> bool {
        (self.min_iv..=self.max_iv).contains(&sigma)
    }

    #[inline(always)]
    pub(crate) fn clamp(&self, sigma: f64) -> f64 {
        sigma.clamp(self.min_iv, self.max_iv)
    }
}
