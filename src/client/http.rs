// =================================================================
// client/http.rs - Native transport over reqwest
// =================================================================

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url, header::CONTENT_TYPE};

use crate::handler::{PriceTransport, TransportError, TransportResponse};

/// Posts to paths resolved against a base URL such as
/// `http://127.0.0.1:5000`.
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("'{}': {}", base_url, e)))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("'{}' on {}: {}", path, self.base_url, e)))
    }
}

#[async_trait]
impl PriceTransport for HttpTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(path)?;
        debug!("Sending pricing request to {}", url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(TransportResponse { status, body })
    }
}
