use axum::{
    extract::{State, rejection::JsonRejection},
    response::{Html, Json},
};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::{AppState, errors::ApiError, request::PricingRequest};
use crate::pricing::monte_carlo_price;

#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub option_price: f64,
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

pub async fn calculate_option_price(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let result = price_request(&state, payload).await;
    if let Err(e) = &result {
        warn!("⚠️ Rejected pricing request: {}", e);
    }
    result
}

async fn price_request(
    state: &AppState,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PriceResponse>, ApiError> {
    let Json(data) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let request = PricingRequest::from_json(&data)?;

    let max_simulations = state.settings.pricing.max_simulations;
    if request.simulations > max_simulations {
        return Err(ApiError::BadRequest(format!(
            "Number of simulations must not exceed {}",
            max_simulations
        )));
    }

    debug!(
        "Pricing {} S={} K={} T={} r={} sigma={} with {} paths",
        request.params.option_type,
        request.params.stock_price,
        request.params.strike_price,
        request.params.time_to_maturity,
        request.params.risk_free_rate,
        request.params.volatility,
        request.simulations
    );

    let option_price = tokio::task::spawn_blocking(move || {
        let mut rng = rand::thread_rng();
        monte_carlo_price(&request.params, request.simulations, &mut rng)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(PriceResponse { option_price }))
}
