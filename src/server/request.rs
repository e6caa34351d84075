// =================================================================
// server/request.rs - Pricing request parsing
// =================================================================
//
// Form submissions arrive with every value as a string; API callers may
// send JSON numbers. Both are accepted.

use serde_json::{Map, Value};

use super::errors::ApiError;
use crate::pricing::{OptionParams, OptionType, PricingError};

pub const REQUIRED_FIELDS: [&str; 7] = [
    "stock_price",
    "strike_price",
    "time_to_maturity",
    "risk_free_rate",
    "volatility",
    "simulations",
    "option_type",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PricingRequest {
    pub params: OptionParams,
    pub simulations: u64,
}

impl PricingRequest {
    pub fn from_json(data: &Value) -> Result<Self, ApiError> {
        let fields = data
            .as_object()
            .ok_or_else(|| ApiError::BadRequest("Request body must be a JSON object".into()))?;

        if !REQUIRED_FIELDS.iter().all(|field| fields.contains_key(*field)) {
            return Err(ApiError::BadRequest("Missing required fields".into()));
        }

        let option_type = match &fields["option_type"] {
            Value::String(s) => s.parse::<OptionType>()?,
            other => return Err(PricingError::InvalidOptionType(other.to_string()).into()),
        };

        let params = OptionParams {
            stock_price: float_field(fields, "stock_price")?,
            strike_price: float_field(fields, "strike_price")?,
            time_to_maturity: float_field(fields, "time_to_maturity")?,
            risk_free_rate: float_field(fields, "risk_free_rate")?,
            volatility: float_field(fields, "volatility")?,
            option_type,
        };
        params.validate()?;

        let simulations = int_field(fields, "simulations")?;
        if simulations < 1 {
            return Err(PricingError::NoSimulations.into());
        }

        Ok(Self {
            params,
            simulations: simulations as u64,
        })
    }
}

fn invalid_value(name: &str) -> ApiError {
    ApiError::BadRequest(format!("Invalid value for field '{}'", name))
}

fn float_field(fields: &Map<String, Value>, name: &str) -> Result<f64, ApiError> {
    match &fields[name] {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid_value(name))
}

fn int_field(fields: &Map<String, Value>, name: &str) -> Result<i64, ApiError> {
    match &fields[name] {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid_value(name))
}
