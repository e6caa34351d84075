// =================================================================
// handler/traits.rs - Seams the submission handler is built from
// =================================================================

use async_trait::async_trait;

use super::errors::{SubmitError, TransportError};
use crate::form::FormFields;

/// A submit event whose default action (page navigation) can be suppressed.
pub trait SubmitEvent {
    fn prevent_default(&self);
}

/// Source of the form's current fields. An error means the fields could
/// not be read at all, and nothing should be sent.
pub trait FormSource {
    fn form_fields(&self) -> Result<FormFields, SubmitError>;
}

/// Element whose text content receives the rendered price.
pub trait ResultDisplay {
    fn set_text_content(&self, text: &str);
}

/// Raw reply from the pricing endpoint, before any JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a JSON body with `Content-Type: application/json` via POST.
///
/// A non-2xx status is still `Ok`; only failures to obtain a response at
/// all are errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PriceTransport {
    async fn post_json(&self, path: &str, body: String) -> Result<TransportResponse, TransportError>;
}

impl FormSource for FormFields {
    fn form_fields(&self) -> Result<FormFields, SubmitError> {
        Ok(self.clone())
    }
}
