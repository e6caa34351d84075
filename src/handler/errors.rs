// =================================================================
// handler/errors.rs - Error types
// =================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Failed to read form fields: {0}")]
    FormRead(String),
    #[error("Failed to encode form payload: {0}")]
    Encode(serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Response is not valid JSON (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot read 'option_price' of null response")]
    NullResponse,
}
