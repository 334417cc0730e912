use core::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The type of option to be priced (call or put).
///
/// The discriminant doubles as the pricing sign, `OptionType::Put as i8 == -1`.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum OptionType {
    Call = 1,
    Put = -1,
}

impl OptionType {
    /// `+1.0` for calls, `-1.0` for puts.
    #[inline(always)]
    pub fn sign(self) -> f64 {
        f64::from(self as i8)
    }
}

impl Display for OptionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Contract and market parameters of a European option.
///
/// `p` is only needed to solve for implied volatility, `sigma` only to price.
/// Rates, yields and volatility are annualized decimals, `t` is in years.
/// `t == 0.0` is a valid input and prices at intrinsic value.
///
/// # Example:
/// ```
/// use blackscholes_iv::{Inputs, OptionType};
/// let inputs = Inputs::new(OptionType::Put, 45.0, 45.0, None, 0.02, 0.0, 1.0, Some(0.25));
/// assert_eq!(inputs.option_type, OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inputs {
    /// Call or put.
    pub option_type: OptionType,
    /// Spot price of the underlying.
    pub s: f64,
    /// Strike price.
    pub k: f64,
    /// Observed option price.
    pub p: Option<f64>,
    /// Risk-free interest rate.
    pub r: f64,
    /// Continuous dividend (cost-of-carry) yield.
    pub q: f64,
    /// Time to expiry in years.
    pub t: f64,
    /// Volatility.
    pub sigma: Option<f64>,
}

impl Inputs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        option_type: OptionType,
        s: f64,
        k: f64,
        p: Option<f64>,
        r: f64,
        q: f64,
        t: f64,
        sigma: Option<f64>,
    ) -> Self {
        Self {
            option_type,
            s,
            k,
            p,
            r,
            q,
            t,
            sigma,
        }
    }

    /// Copy of these inputs with the volatility replaced.
    pub fn with_sigma(&self, sigma: f64) -> Self {
        Self {
            sigma: Some(sigma),
            ..*self
        }
    }

    /// Copy of these inputs with the observed option price replaced.
    pub fn with_price(&self, p: f64) -> Self {
        Self { p: Some(p), ..*self }
    }
}

impl Display for Inputs {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Option type: {}", self.option_type)?;
        writeln!(f, "Stock price: {}", self.s)?;
        writeln!(f, "Strike price: {}", self.k)?;
        match self.p {
            Some(p) => writeln!(f, "Option price: {}", p)?,
            None => writeln!(f, "Option price: None")?,
        };
        writeln!(f, "Risk-free rate: {}", self.r)?;
        writeln!(f, "Dividend yield: {}", self.q)?;
        writeln!(f, "Time to maturity: {}", self.t)?;
        match self.sigma {
            Some(sig) => writeln!(f, "Volatility: {}", sig)?,
            None => writeln!(f, "Volatility: None")?,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_follows_discriminant() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
        assert_eq!(OptionType::Put as i8, -1);
    }

    #[test]
    fn with_sigma_keeps_other_fields() {
        let inputs = Inputs::new(OptionType::Call, 100.0, 95.0, Some(7.0), 0.05, 0.01, 0.5, None);
        let priced = inputs.with_sigma(0.3);
        assert_eq!(priced.sigma, Some(0.3));
        assert_eq!(priced.p, Some(7.0));
        assert_eq!(priced.k, 95.0);
        assert_eq!(inputs.sigma, None);
    }

    #[test]
    fn display_lists_missing_fields() {
        let inputs = Inputs::new(OptionType::Put, 100.0, 95.0, None, 0.05, 0.01, 0.5, None);
        let text = inputs.to_string();
        assert!(text.contains("Option type: Put"));
        assert!(text.contains("Option price: None"));
        assert!(text.contains("Volatility: None"));
    }

    #[test]
    fn deserializes_quote_without_volatility() {
        let json = r#"{"option_type":"Put","s":100.0,"k":95.0,"p":3.5,"r":0.05,"q":0.0,"t":0.5}"#;
        let inputs: Inputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.option_type, OptionType::Put);
        assert_eq!(inputs.p, Some(3.5));
        assert_eq!(inputs.sigma, None);
        assert_eq!(serde_json::to_value(OptionType::Call).unwrap(), "Call");
    }
}
