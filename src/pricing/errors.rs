#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid option type. Use 'call' or 'put'.")]
    InvalidOptionType(String),
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Number of simulations must be at least 1")]
    NoSimulations,
    #[error("Option price is not a finite number for these parameters")]
    NonFinitePrice,
}
