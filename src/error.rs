//! Error types for the crate.
//!
//! Pricing and Greeks only fail when a required input is missing. Numeric edge
//! cases (zero volatility, zero strike) are not errors: they propagate as
//! IEEE-754 NaN/Inf and are the caller's to check.
//!
//! The one real failure mode is the implied volatility solver not finding a
//! volatility within tolerance, reported as [`BlackScholesError::ConvergenceFailed`].
//!
//! Example
//! =======
//!
//! ```
//! use blackscholes_iv::{BlackScholesError, ImpliedVolatility, Inputs, OptionType};
//!
//! // Far out of the money with a price no volatility in range can produce.
//! let inputs = Inputs::new(OptionType::Call, 100.0, 1000.0, Some(0.01), 0.02, 0.0, 0.01, None);
//! match inputs.calc_iv() {
//!     Ok(iv) => println!("iv = {iv}"),
//!     Err(BlackScholesError::ConvergenceFailed { .. }) => {}
//!     Err(e) => panic!("unexpected error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, BlackScholesError>;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BlackScholesError {
    /// Volatility (sigma) was required but not provided.
    #[error("expected Some(f64) for sigma, received None")]
    MissingSigma,
    /// Option price (p) was required but not provided.
    #[error("option price (p) is required")]
    MissingPrice,
    /// The implied volatility solver found no volatility within tolerance.
    #[error("no implied volatility found after {iterations} iterations (residual {residual:.3e})")]
    ConvergenceFailed {
        /// Steps spent in the final stage.
        iterations: usize,
        /// Last absolute price error, NaN if the bracket degenerated.
        residual: f64,
    },
    /// Solver configuration rejected by [`crate::IvConfig::validate`].
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}
