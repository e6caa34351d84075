//! Logging setup with levels controlled through environment variables
//! Uses env_logger behind the `log` facade

use std::env;

use env_logger::Env;

/// Initialise logging.
///
/// Levels come from `RUST_LOG`; `info` is used when it is unset:
/// - RUST_LOG=error - errors only
/// - RUST_LOG=debug - includes every pricing request the handler sends
/// - RUST_LOG=option_pricer::server=debug - per module
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_logging() {
    let initialised = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false)
        .try_init();

    if initialised.is_ok() {
        log::debug!("📝 Log level: {}", get_log_level());
    }
}

/// Current log filter
pub fn get_log_level() -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}
