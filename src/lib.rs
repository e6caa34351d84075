pub mod client;
pub mod form;
pub mod handler;
pub mod utils;

// Pricing service (native only)
#[cfg(feature = "server")]
pub mod config;

#[cfg(feature = "server")]
pub mod pricing;

#[cfg(feature = "server")]
pub mod server;

// Browser binding
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod web;
