use serde::{Deserialize, Serialize};

use crate::normal_distribution::standard_normal_pdf;
use crate::{calc_d1d2, calc_nd1nd2, BlackScholesError, Inputs, DAYS_PER_YEAR};

/// Price of an option together with its first order Greeks.
///
/// Vega and rho are per 1% move, theta is per calendar day. Greeks that were
/// not requested are left at `0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionPrice {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Which outputs [`Inputs::evaluate`] computes beyond the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Output {
    Price,
    PriceAndVega,
    All,
}

impl Inputs {
    /// Closed-form Black-Scholes-Merton evaluation at volatility `sigma`.
    ///
    /// At or past expiry the price is `|k - s|` for calls and puts alike and
    /// every Greek is zero. Degenerate numeric inputs (`sigma == 0.0`, `k == 0.0`)
    /// are not intercepted and come back as NaN or infinity.
    pub(crate) fn evaluate(&self, sigma: f64, output: Output) -> OptionPrice {
        if self.t <= 0.0 {
            return OptionPrice {
                price: (self.k - self.s).abs(),
                ..OptionPrice::default()
            };
        }

        let sign = self.option_type.sign();
        let sqrt_t = self.t.sqrt();
        let e_negqt = (-self.q * self.t).exp();
        let e_negrt = (-self.r * self.t).exp();

        let (d1, d2) = calc_d1d2(self, sigma);
        let (nd1, nd2) = calc_nd1nd2(self.option_type, d1, d2);

        let mut result = OptionPrice {
            price: sign * (self.s * e_negqt * nd1 - self.k * e_negrt * nd2),
            ..OptionPrice::default()
        };
        if output == Output::Price {
            return result;
        }

        // φ is even, so the unsigned d1 serves calls and puts
        let nprimed1 = standard_normal_pdf(d1);
        result.vega = e_negqt * self.s * sqrt_t * nprimed1 * 0.01;
        if output == Output::PriceAndVega {
            return result;
        }

        result.delta = sign * e_negqt * nd1;
        result.gamma = e_negqt * nprimed1 / (self.s * sigma * sqrt_t);
        result.rho = sign * self.k * self.t * e_negrt * nd2 * 0.01;

        let decay = self.s * sigma * e_negqt * nprimed1 / (2.0 * sqrt_t);
        let carry = sign * self.r * self.k * e_negrt * nd2;
        let dividend = sign * self.q * self.s * e_negqt * nd1;
        result.theta = (dividend - decay - carry) / DAYS_PER_YEAR;

        result
    }
}

pub trait Pricing {
    fn calc_price(&self) -> Result<f64, BlackScholesError>;
    fn calc_price_and_greeks(&self) -> Result<OptionPrice, BlackScholesError>;
}

impl Pricing for Inputs {
    /// Calculates the price of the option.
    /// # Requires
    /// s, k, r, q, t, sigma.
    /// # Returns
    /// f64 of the price of the option.
    /// # Example:
    /// ```
    /// use blackscholes_iv::{Inputs, OptionType, Pricing};
    /// let inputs = Inputs::new(OptionType::Call, 45.0, 45.0, None, 0.02, 0.0, 1.0, Some(0.25));
    /// let price = inputs.calc_price().unwrap();
    /// assert!((price - 4.8918).abs() < 1e-4);
    /// ```
    fn calc_price(&self) -> Result<f64, BlackScholesError> {
        let sigma = self.sigma.ok_or(BlackScholesError::MissingSigma)?;
        Ok(self.evaluate(sigma, Output::Price).price)
    }

    /// Calculates the price and the five first order Greeks in one pass.
    /// # Requires
    /// s, k, r, q, t, sigma.
    fn calc_price_and_greeks(&self) -> Result<OptionPrice, BlackScholesError> {
        let sigma = self.sigma.ok_or(BlackScholesError::MissingSigma)?;
        Ok(self.evaluate(sigma, Output::All))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OptionType;
    use assert_approx_eq::assert_approx_eq;

    fn atm(option_type: OptionType) -> Inputs {
        Inputs::new(option_type, 45.0, 45.0, None, 0.02, 0.0, 1.0, Some(0.25))
    }

    #[test]
    fn price_only_leaves_greeks_zero() {
        let out = atm(OptionType::Call).evaluate(0.25, Output::Price);
        assert_approx_eq!(out.price, 4.891_751, 1e-6);
        assert_eq!(out.vega, 0.0);
        assert_eq!(out.delta, 0.0);
    }

    #[test]
    fn vega_without_other_greeks() {
        let out = atm(OptionType::Put).evaluate(0.25, Output::PriceAndVega);
        assert_approx_eq!(out.price, 4.000_692, 1e-6);
        assert_approx_eq!(out.vega, 0.175_791, 1e-6);
        assert_eq!(out.gamma, 0.0);
        assert_eq!(out.theta, 0.0);
    }

    #[test]
    fn expired_option_is_intrinsic_without_greeks() {
        let inputs = Inputs::new(OptionType::Put, 100.0, 95.0, None, 0.05, 0.0, 0.0, Some(0.2));
        let out = inputs.evaluate(0.2, Output::All);
        assert_eq!(out, OptionPrice { price: 5.0, ..OptionPrice::default() });

        let negative_t = Inputs { t: -0.1, ..inputs };
        assert_eq!(negative_t.evaluate(0.2, Output::All).price, 5.0);
    }

    #[test]
    fn zero_volatility_propagates_nan() {
        let out = atm(OptionType::Call).evaluate(0.0, Output::All);
        assert!(!out.gamma.is_finite());
    }

    #[test]
    fn missing_sigma_is_an_error() {
        let inputs = Inputs {
            sigma: None,
            ..atm(OptionType::Call)
        };
        assert_eq!(inputs.calc_price(), Err(BlackScholesError::MissingSigma));
        assert_eq!(
            inputs.calc_price_and_greeks(),
            Err(BlackScholesError::MissingSigma)
        );
    }
}
