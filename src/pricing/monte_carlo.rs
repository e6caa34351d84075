//! Monte Carlo pricing of European options
//!
//! Terminal prices follow geometric Brownian motion sampled in one step:
//! `S_T = S * exp((r - σ²/2)·T + σ·√T·Z)`, `Z ~ N(0, 1)`.
//! The price is the discounted mean payoff.

use rand::Rng;

use super::errors::PricingError;
use super::params::OptionParams;

pub fn monte_carlo_price<R: Rng + ?Sized>(
    params: &OptionParams,
    simulations: u64,
    rng: &mut R,
) -> Result<f64, PricingError> {
    params.validate()?;
    if simulations == 0 {
        return Err(PricingError::NoSimulations);
    }

    let t = params.time_to_maturity;
    let sigma = params.volatility;
    let drift = (params.risk_free_rate - 0.5 * sigma * sigma) * t;
    let diffusion = sigma * t.sqrt();

    let mut normals = StandardNormals::default();
    let mut payoff_sum = 0.0;
    for _ in 0..simulations {
        let z = normals.next(rng);
        let terminal = params.stock_price * (drift + diffusion * z).exp();
        payoff_sum += params.option_type.payoff(terminal, params.strike_price);
    }

    let mean_payoff = payoff_sum / simulations as f64;
    let price = (-params.risk_free_rate * t).exp() * mean_payoff;
    // Extreme rates or volatilities overflow exp()
    if !price.is_finite() {
        return Err(PricingError::NonFinitePrice);
    }
    Ok(price)
}

/// Box-Muller sampler; each pair of uniforms yields two normals.
#[derive(Default)]
struct StandardNormals {
    spare: Option<f64>,
}

impl StandardNormals {
    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // gen::<f64>() is in [0, 1); flip it so ln never sees zero
        let u1 = 1.0 - rng.r#gen::<f64>();
        let u2 = rng.r#gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * std::f64::consts::PI * u2;
        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }
}
