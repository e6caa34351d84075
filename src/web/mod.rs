//! Browser binding for the option form
//!
//! `mount()` looks up `#option-form` and `#result` once and registers the
//! submit listener. The page is expected to call it after the wasm module
//! is initialised:
//!
//! ```text
//! import init, { mount } from "/pkg/option_pricer.js";
//! await init();
//! mount();
//! ```

use std::sync::Arc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, FormData, HtmlFormElement};

use crate::client::FetchTransport;
use crate::form::FormFields;
use crate::handler::{FormSource, FormSubmissionHandler, ResultDisplay, SubmitError, SubmitEvent};

pub const FORM_ID: &str = "option-form";
pub const RESULT_ID: &str = "result";

struct DomForm(HtmlFormElement);

impl FormSource for DomForm {
    fn form_fields(&self) -> Result<FormFields, SubmitError> {
        let data = FormData::new_with_form(&self.0)
            .map_err(|e| SubmitError::FormRead(format!("FormData construction failed: {:?}", e)))?;
        let entries = js_sys::try_iter(&data)
            .map_err(|e| SubmitError::FormRead(format!("{:?}", e)))?
            .ok_or_else(|| SubmitError::FormRead("FormData is not iterable".into()))?;

        let mut fields = FormFields::new();
        for entry in entries.flatten() {
            let pair: Array = entry.unchecked_into();
            match (pair.get(0).as_string(), pair.get(1).as_string()) {
                (Some(name), Some(value)) => fields.push(name, value),
                // File inputs
                (Some(name), None) => web_sys::console::warn_1(
                    &format!("Skipping non-text form field '{}'", name).into(),
                ),
                _ => {}
            }
        }
        Ok(fields)
    }
}

struct DomDisplay(Element);

impl ResultDisplay for DomDisplay {
    fn set_text_content(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}

impl SubmitEvent for Event {
    fn prevent_default(&self) {
        Event::prevent_default(self);
    }
}

fn missing(id: &str) -> JsValue {
    JsValue::from_str(&format!("Element #{} not found", id))
}

/// Attach the submission handler to the page. Fails when either element
/// is absent.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let form: HtmlFormElement = document
        .get_element_by_id(FORM_ID)
        .ok_or_else(|| missing(FORM_ID))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{} is not a form", FORM_ID)))?;
    let result = document
        .get_element_by_id(RESULT_ID)
        .ok_or_else(|| missing(RESULT_ID))?;

    let handler = FormSubmissionHandler::new(
        DomForm(form.clone()),
        Arc::new(DomDisplay(result)),
        Arc::new(FetchTransport),
    );

    let closure = Closure::wrap(Box::new(move |event: Event| {
        // Capturing prevents the default action before anything is awaited.
        let submission = match handler.capture(&event) {
            Ok(submission) => submission,
            Err(err) => {
                web_sys::console::error_1(&format!("Submit error: {}", err).into());
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = submission.send().await {
                web_sys::console::error_1(&format!("Submit error: {}", err).into());
            }
        });
    }) as Box<dyn FnMut(_)>);

    form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget(); // Keep closure alive

    Ok(())
}
