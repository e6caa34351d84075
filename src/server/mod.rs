//! HTTP API serving the option form and the pricing endpoint

pub mod errors;
pub mod handlers;
pub mod request;
pub mod routes;

pub use errors::ApiError;
pub use request::{PricingRequest, REQUIRED_FIELDS};
pub use routes::create_router;

use log::info;
use std::sync::Arc;

use crate::config::Settings;
use crate::handler::CALCULATE_OPTION_PRICE_PATH;

pub struct AppState {
    pub settings: Settings,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// Bind and serve until Ctrl+C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.bind_address();
    let app = create_router(Arc::new(AppState::new(settings)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("✅ Option pricer listening on http://{}", addr);
    info!("📡 Available endpoints:");
    info!("   GET  / - Option pricing form");
    info!("   POST {} - Monte Carlo option price", CALCULATE_OPTION_PRICE_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown signal received");
}
