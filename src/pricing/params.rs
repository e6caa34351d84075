// =================================================================
// pricing/params.rs - Option contract parameters
// =================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::PricingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff at expiry for a terminal price.
    pub fn payoff(self, terminal_price: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (terminal_price - strike).max(0.0),
            OptionType::Put => (strike - terminal_price).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(PricingError::InvalidOptionType(other.to_string())),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// European option on a non-dividend-paying underlying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    /// Current price of the underlying
    pub stock_price: f64,
    pub strike_price: f64,
    /// Years until expiry
    pub time_to_maturity: f64,
    /// Annual rate, as a decimal
    pub risk_free_rate: f64,
    /// Annual volatility, as a decimal
    pub volatility: f64,
    pub option_type: OptionType,
}

impl OptionParams {
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("stock_price", self.stock_price),
            ("strike_price", self.strike_price),
            ("time_to_maturity", self.time_to_maturity),
            ("risk_free_rate", self.risk_free_rate),
            ("volatility", self.volatility),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(name, "must be a finite number"));
            }
        }

        if self.stock_price <= 0.0 {
            return Err(invalid("stock_price", "must be positive"));
        }
        if self.strike_price < 0.0 {
            return Err(invalid("strike_price", "cannot be negative"));
        }
        if self.time_to_maturity < 0.0 {
            return Err(invalid("time_to_maturity", "cannot be negative"));
        }
        if self.volatility < 0.0 {
            return Err(invalid("volatility", "cannot be negative"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> PricingError {
    PricingError::InvalidParameter {
        name,
        reason: reason.to_string(),
    }
}
