// =================================================================
// client/browser.rs - Browser transport over gloo-net (fetch)
// =================================================================

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::handler::{PriceTransport, TransportError, TransportResponse};

/// Uses the page's `fetch`; relative paths resolve against the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl PriceTransport for FetchTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<TransportResponse, TransportError> {
        let response = Request::post(path)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(|e| TransportError::Network(format!("Failed to create request: {:?}", e)))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to send request: {:?}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(format!("{:?}", e)))?;

        Ok(TransportResponse { status, body })
    }
}
