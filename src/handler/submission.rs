// =================================================================
// handler/submission.rs - Form Submission Handler
// =================================================================

use std::sync::Arc;

use log::{debug, error, warn};
use serde_json::Value;

use super::{
    errors::SubmitError,
    render::render_result,
    traits::{FormSource, PriceTransport, ResultDisplay, SubmitEvent},
};
use crate::form::FormFields;

/// Fixed path of the pricing endpoint.
pub const CALCULATE_OPTION_PRICE_PATH: &str = "/calculate-option-price";

/// Wires one form's submit action to the pricing endpoint and writes the
/// answer into a result element.
///
/// The form, display and transport are handed in at construction, so the
/// handler holds no global state. It keeps nothing between submissions:
/// every submit is captured and sent independently, and whichever
/// response resolves last performs the last write.
pub struct FormSubmissionHandler<F, D, T> {
    form: F,
    display: Arc<D>,
    transport: Arc<T>,
    endpoint: String,
}

impl<F, D, T> FormSubmissionHandler<F, D, T>
where
    F: FormSource,
    D: ResultDisplay,
    T: PriceTransport,
{
    pub fn new(form: F, display: Arc<D>, transport: Arc<T>) -> Self {
        Self {
            form,
            display,
            transport,
            endpoint: CALCULATE_OPTION_PRICE_PATH.to_string(),
        }
    }

    /// Override the endpoint path (defaults to `/calculate-option-price`).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Synchronous half of a submit: suppress the default action and read
    /// the fields as they are right now.
    ///
    /// The default action is suppressed even when the fields cannot be read;
    /// in that case no submission exists and nothing is sent.
    pub fn capture<E: SubmitEvent + ?Sized>(&self, event: &E) -> Result<Submission<D, T>, SubmitError> {
        event.prevent_default();
        let fields = self.form.form_fields().map_err(|e| {
            error!("❌ Could not read the option form, nothing sent: {}", e);
            e
        })?;
        Ok(Submission {
            fields,
            display: Arc::clone(&self.display),
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
        })
    }

    /// Handle a submit event end to end. Returns the text written.
    pub async fn on_submit<E: SubmitEvent + ?Sized>(&self, event: &E) -> Result<String, SubmitError> {
        self.capture(event)?.send().await
    }
}

impl<F: Clone, D, T> Clone for FormSubmissionHandler<F, D, T> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
            display: Arc::clone(&self.display),
            transport: Arc::clone(&self.transport),
            endpoint: self.endpoint.clone(),
        }
    }
}

/// A captured submit, ready to be sent.
pub struct Submission<D, T> {
    fields: FormFields,
    display: Arc<D>,
    transport: Arc<T>,
    endpoint: String,
}

impl<D, T> Submission<D, T>
where
    D: ResultDisplay,
    T: PriceTransport,
{
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// POST the fields and render the reply. On failure the display is
    /// left untouched and the error is logged before being returned.
    pub async fn send(self) -> Result<String, SubmitError> {
        match self.deliver().await {
            Ok(text) => Ok(text),
            Err(e) => {
                error!("❌ Option price submission to {} failed: {}", self.endpoint, e);
                Err(e)
            }
        }
    }

    async fn deliver(&self) -> Result<String, SubmitError> {
        let body = self.fields.to_json_body().map_err(SubmitError::Encode)?;
        debug!("POST {} {}", self.endpoint, body);

        let response = self.transport.post_json(&self.endpoint, body).await?;
        if !response.is_success() {
            warn!(
                "Pricing endpoint answered with status {}, rendering body anyway",
                response.status
            );
        }

        let parsed: Value = serde_json::from_str(&response.body).map_err(|source| SubmitError::Decode {
            status: response.status,
            source,
        })?;
        if parsed.is_null() {
            return Err(SubmitError::NullResponse);
        }

        let text = render_result(&parsed);
        self.display.set_text_content(&text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::errors::TransportError;
    use crate::handler::memory::{SyntheticSubmit, TextCell};
    use crate::handler::traits::TransportResponse;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// Records every request and answers each with the same scripted reply.
    struct ScriptedTransport {
        requests: Mutex<Vec<(String, String)>>,
        reply: Result<TransportResponse, String>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Ok(TransportResponse::new(status, body)),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Err(message.to_string()),
            }
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PriceTransport for ScriptedTransport {
        async fn post_json(&self, path: &str, body: String) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push((path.to_string(), body));
            match &self.reply {
                Ok(response) => Ok(response.clone()),
                Err(message) => Err(TransportError::Network(message.clone())),
            }
        }
    }

    /// Each request waits on the next queued channel, so the test decides
    /// the order in which responses resolve.
    struct GatedTransport {
        gates: Mutex<VecDeque<oneshot::Receiver<TransportResponse>>>,
    }

    #[async_trait]
    impl PriceTransport for GatedTransport {
        async fn post_json(&self, _path: &str, _body: String) -> Result<TransportResponse, TransportError> {
            let gate = self
                .gates
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Network("no gate left".into()))?;
            gate.await
                .map_err(|_| TransportError::Network("gate dropped".into()))
        }
    }

    fn handler_with(
        fields: FormFields,
        transport: ScriptedTransport,
    ) -> (
        FormSubmissionHandler<FormFields, TextCell, ScriptedTransport>,
        Arc<TextCell>,
        Arc<ScriptedTransport>,
    ) {
        let display = Arc::new(TextCell::new("Awaiting input"));
        let transport = Arc::new(transport);
        let handler = FormSubmissionHandler::new(fields, Arc::clone(&display), Arc::clone(&transport));
        (handler, display, transport)
    }

    #[tokio::test]
    async fn test_posts_fields_once_to_fixed_endpoint() {
        let fields = FormFields::new().with("strike", "100").with("spot", "105");
        let (handler, _display, transport) =
            handler_with(fields, ScriptedTransport::replying(200, r#"{"option_price": 4.52}"#));

        handler.on_submit(&SyntheticSubmit::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/calculate-option-price");
        assert_eq!(requests[0].1, r#"{"strike":"100","spot":"105"}"#);
    }

    #[tokio::test]
    async fn test_renders_price_into_display() {
        let (handler, display, _) = handler_with(
            FormFields::new().with("strike", "100"),
            ScriptedTransport::replying(200, r#"{"option_price": 4.52}"#),
        );

        let text = handler.on_submit(&SyntheticSubmit::new()).await.unwrap();

        assert_eq!(text, "Option Price: 4.52");
        assert_eq!(display.text(), "Option Price: 4.52");
        assert_eq!(display.writes(), 1);
    }

    #[tokio::test]
    async fn test_zero_price_still_renders() {
        let (handler, display, _) = handler_with(
            FormFields::new(),
            ScriptedTransport::replying(200, r#"{"option_price": 0}"#),
        );

        handler.on_submit(&SyntheticSubmit::new()).await.unwrap();
        assert_eq!(display.text(), "Option Price: 0");
    }

    #[tokio::test]
    async fn test_default_action_prevented_on_success_and_failure() {
        let (ok_handler, _, _) = handler_with(
            FormFields::new(),
            ScriptedTransport::replying(200, r#"{"option_price": 1}"#),
        );
        let event = SyntheticSubmit::new();
        ok_handler.on_submit(&event).await.unwrap();
        assert!(event.default_prevented());

        let (failing_handler, _, _) =
            handler_with(FormFields::new(), ScriptedTransport::failing("connection refused"));
        let event = SyntheticSubmit::new();
        assert!(failing_handler.on_submit(&event).await.is_err());
        assert!(event.default_prevented());
    }

    #[test]
    fn test_capture_prevents_default_before_sending() {
        let (handler, display, transport) = handler_with(
            FormFields::new().with("spot", "105"),
            ScriptedTransport::replying(200, r#"{"option_price": 1}"#),
        );
        let event = SyntheticSubmit::new();

        let submission = handler.capture(&event).unwrap();

        assert!(event.default_prevented());
        assert_eq!(submission.fields().len(), 1);
        assert!(transport.requests().is_empty());
        assert_eq!(display.writes(), 0);
    }

    /// A form whose fields cannot be read, like a detached DOM form.
    struct UnreadableForm;

    impl FormSource for UnreadableForm {
        fn form_fields(&self) -> Result<FormFields, SubmitError> {
            Err(SubmitError::FormRead("form is detached".into()))
        }
    }

    #[tokio::test]
    async fn test_unreadable_form_sends_nothing() {
        let display = Arc::new(TextCell::new("Awaiting input"));
        let transport = Arc::new(ScriptedTransport::replying(200, r#"{"option_price": 1}"#));
        let handler = FormSubmissionHandler::new(UnreadableForm, Arc::clone(&display), Arc::clone(&transport));
        let event = SyntheticSubmit::new();

        let err = handler.on_submit(&event).await.unwrap_err();

        assert!(matches!(err, SubmitError::FormRead(_)));
        assert!(event.default_prevented());
        assert!(transport.requests().is_empty());
        assert_eq!(display.text(), "Awaiting input");
        assert_eq!(display.writes(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_field_names_collapse() {
        let fields = FormFields::new()
            .with("option_type", "call")
            .with("option_type", "put");
        let (handler, _, transport) =
            handler_with(fields, ScriptedTransport::replying(200, r#"{"option_price": 2}"#));

        handler.on_submit(&SyntheticSubmit::new()).await.unwrap();
        assert_eq!(transport.requests()[0].1, r#"{"option_type":"put"}"#);
    }

    #[tokio::test]
    async fn test_network_failure_leaves_display_unchanged() {
        let (handler, display, _) =
            handler_with(FormFields::new(), ScriptedTransport::failing("connection refused"));

        let err = handler.on_submit(&SyntheticSubmit::new()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport(TransportError::Network(_))));
        assert_eq!(display.text(), "Awaiting input");
        assert_eq!(display.writes(), 0);
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let (handler, display, _) = handler_with(
            FormFields::new(),
            ScriptedTransport::replying(500, "<h1>Internal Server Error</h1>"),
        );

        let err = handler.on_submit(&SyntheticSubmit::new()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Decode { status: 500, .. }));
        assert_eq!(display.text(), "Awaiting input");
    }

    #[tokio::test]
    async fn test_null_body_is_an_error() {
        let (handler, display, _) =
            handler_with(FormFields::new(), ScriptedTransport::replying(200, "null"));

        let err = handler.on_submit(&SyntheticSubmit::new()).await.unwrap_err();

        assert!(matches!(err, SubmitError::NullResponse));
        assert_eq!(display.writes(), 0);
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_renders_undefined() {
        let (handler, display, _) = handler_with(
            FormFields::new(),
            ScriptedTransport::replying(400, r#"{"error": "Missing required fields"}"#),
        );

        handler.on_submit(&SyntheticSubmit::new()).await.unwrap();
        assert_eq!(display.text(), "Option Price: undefined");
    }

    #[tokio::test]
    async fn test_custom_endpoint() {
        let (handler, _, transport) = handler_with(
            FormFields::new(),
            ScriptedTransport::replying(200, r#"{"option_price": 3}"#),
        );
        let handler = handler.with_endpoint("/api/v2/price");

        handler.on_submit(&SyntheticSubmit::new()).await.unwrap();
        assert_eq!(transport.requests()[0].0, "/api/v2/price");
    }

    #[tokio::test]
    async fn test_last_response_to_resolve_wins() {
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        let display = Arc::new(TextCell::new(""));
        let transport = Arc::new(GatedTransport {
            gates: Mutex::new(VecDeque::from(vec![first_rx, second_rx])),
        });
        let handler = FormSubmissionHandler::new(FormFields::new(), Arc::clone(&display), transport);

        let first = handler.capture(&SyntheticSubmit::new()).unwrap().send();
        let second = handler.capture(&SyntheticSubmit::new()).unwrap().send();

        let driver = async {
            // Let both requests reach the transport, then resolve the
            // second submission before the first.
            tokio::task::yield_now().await;
            second_tx
                .send(TransportResponse::new(200, r#"{"option_price": 2}"#))
                .unwrap();
            for _ in 0..100 {
                if display.writes() == 1 {
                    break;
                }
                tokio::task::yield_now().await;
            }
            first_tx
                .send(TransportResponse::new(200, r#"{"option_price": 1}"#))
                .unwrap();
        };

        let (first, second, ()) = tokio::join!(first, second, driver);

        assert_eq!(first.unwrap(), "Option Price: 1");
        assert_eq!(second.unwrap(), "Option Price: 2");
        assert_eq!(display.writes(), 2);
        assert_eq!(display.text(), "Option Price: 1");
    }
}
