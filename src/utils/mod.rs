#[cfg(feature = "server")]
pub mod logging;
