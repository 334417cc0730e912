use serde::{Deserialize, Serialize};

use crate::pricing::{OptionPrice, Output};
use crate::{BlackScholesError, Inputs, Pricing};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AllGreeks {
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl From<OptionPrice> for AllGreeks {
    fn from(op: OptionPrice) -> Self {
        Self {
            delta: op.delta,
            gamma: op.gamma,
            theta: op.theta,
            vega: op.vega,
            rho: op.rho,
        }
    }
}

/// First order sensitivities of the option price.
///
/// Vega and rho are scaled to a 1% move, theta to one calendar day.
pub trait Greeks: Pricing {
    fn calc_delta(&self) -> Result<f64, BlackScholesError>;
    fn calc_gamma(&self) -> Result<f64, BlackScholesError>;
    fn calc_theta(&self) -> Result<f64, BlackScholesError>;
    fn calc_vega(&self) -> Result<f64, BlackScholesError>;
    fn calc_rho(&self) -> Result<f64, BlackScholesError>;
    fn calc_all_greeks(&self) -> Result<AllGreeks, BlackScholesError>;
}

impl Greeks for Inputs {
    fn calc_delta(&self) -> Result<f64, BlackScholesError> {
        Ok(self.calc_all_greeks()?.delta)
    }

    fn calc_gamma(&self) -> Result<f64, BlackScholesError> {
        Ok(self.calc_all_greeks()?.gamma)
    }

    fn calc_theta(&self) -> Result<f64, BlackScholesError> {
        Ok(self.calc_all_greeks()?.theta)
    }

    fn calc_vega(&self) -> Result<f64, BlackScholesError> {
        let sigma = self.sigma.ok_or(BlackScholesError::MissingSigma)?;
        Ok(self.evaluate(sigma, Output::PriceAndVega).vega)
    }

    fn calc_rho(&self) -> Result<f64, BlackScholesError> {
        Ok(self.calc_all_greeks()?.rho)
    }

    /// Calculates delta, gamma, theta, vega and rho from one set of d1/d2 terms.
    /// # Example:
    /// ```
    /// use blackscholes_iv::{Greeks, Inputs, OptionType};
    /// let inputs = Inputs::new(OptionType::Call, 45.0, 45.0, None, 0.02, 0.0, 1.0, Some(0.25));
    /// let greeks = inputs.calc_all_greeks().unwrap();
    /// assert!((greeks.delta - 0.5812).abs() < 1e-4);
    /// ```
    fn calc_all_greeks(&self) -> Result<AllGreeks, BlackScholesError> {
        Ok(self.calc_price_and_greeks()?.into())
    }
}
