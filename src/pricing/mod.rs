//! European option pricing behind the `/calculate-option-price` endpoint

pub mod black_scholes;
pub mod errors;
pub mod monte_carlo;
pub mod params;

pub use black_scholes::{black_scholes_price, norm_cdf};
pub use errors::PricingError;
pub use monte_carlo::monte_carlo_price;
pub use params::{OptionParams, OptionType};
