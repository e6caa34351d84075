use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use super::{AppState, handlers};
use crate::handler::CALCULATE_OPTION_PRICE_PATH;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = ServeDir::new(&state.settings.server.static_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route(CALCULATE_OPTION_PRICE_PATH, post(handlers::calculate_option_price))
        .nest_service("/pkg", static_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
