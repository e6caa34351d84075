// client/mod.rs
// Transports for the submission handler: reqwest natively, fetch in the browser.

#[cfg(feature = "http_client")]
pub mod http;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod browser;

#[cfg(feature = "http_client")]
pub use http::HttpTransport;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use browser::FetchTransport;
