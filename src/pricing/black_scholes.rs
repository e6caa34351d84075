//! Closed-form Black-Scholes price, used as the reference for the
//! Monte Carlo estimate

use super::errors::PricingError;
use super::params::{OptionParams, OptionType};

/// Standard normal CDF.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

/// Abramowitz & Stegun 7.1.26, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

pub fn black_scholes_price(params: &OptionParams) -> Result<f64, PricingError> {
    params.validate()?;

    let OptionParams {
        stock_price: s,
        strike_price: k,
        time_to_maturity: t,
        risk_free_rate: r,
        volatility: sigma,
        option_type,
    } = *params;
    let discounted_strike = k * (-r * t).exp();

    // No diffusion left: the price is the discounted forward intrinsic value.
    if t == 0.0 || sigma == 0.0 || k == 0.0 {
        let intrinsic = match option_type {
            OptionType::Call => (s - discounted_strike).max(0.0),
            OptionType::Put => (discounted_strike - s).max(0.0),
        };
        if !intrinsic.is_finite() {
            return Err(PricingError::NonFinitePrice);
        }
        return Ok(intrinsic);
    }

    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let price = match option_type {
        OptionType::Call => s * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1),
    };
    if !price.is_finite() {
        return Err(PricingError::NonFinitePrice);
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(option_type: OptionType) -> OptionParams {
        OptionParams {
            stock_price: 105.0,
            strike_price: 100.0,
            time_to_maturity: 1.0,
            risk_free_rate: 0.05,
            volatility: 0.2,
            option_type,
        }
    }

    #[test]
    fn test_norm_cdf_known_points() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((norm_cdf(1.96) - 0.9750021).abs() < 1e-6);
        assert!((norm_cdf(-1.0) - 0.1586553).abs() < 1e-6);
        assert!(norm_cdf(10.0) > 0.999999);
        assert!(norm_cdf(-10.0) < 1e-6);
    }

    #[test]
    fn test_reference_call_and_put() {
        let call = black_scholes_price(&params(OptionType::Call)).unwrap();
        let put = black_scholes_price(&params(OptionType::Put)).unwrap();
        assert!((call - 13.857906).abs() < 1e-4);
        assert!((put - 3.980849).abs() < 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let call = black_scholes_price(&params(OptionType::Call)).unwrap();
        let put = black_scholes_price(&params(OptionType::Put)).unwrap();
        let forward_gap = 105.0 - 100.0 * (-0.05f64).exp();
        assert!((call - put - forward_gap).abs() < 1e-5);
    }

    #[test]
    fn test_at_the_money_zero_rate() {
        let p = OptionParams {
            stock_price: 100.0,
            strike_price: 100.0,
            time_to_maturity: 0.5,
            risk_free_rate: 0.0,
            volatility: 0.3,
            option_type: OptionType::Call,
        };
        assert!((black_scholes_price(&p).unwrap() - 8.447003).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_inputs_return_intrinsic_value() {
        let mut p = params(OptionType::Call);
        p.time_to_maturity = 0.0;
        assert!((black_scholes_price(&p).unwrap() - 5.0).abs() < 1e-12);

        p.option_type = OptionType::Put;
        assert_eq!(black_scholes_price(&p).unwrap(), 0.0);

        let mut p = params(OptionType::Call);
        p.strike_price = 0.0;
        assert_eq!(black_scholes_price(&p).unwrap(), 105.0);
    }

    #[test]
    fn test_overflowing_rate_is_rejected() {
        let mut p = params(OptionType::Put);
        p.risk_free_rate = -800.0;
        assert_eq!(black_scholes_price(&p), Err(PricingError::NonFinitePrice));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut p = params(OptionType::Call);
        p.volatility = -0.2;
        assert!(black_scholes_price(&p).is_err());
    }
}
