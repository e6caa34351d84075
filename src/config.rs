use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::handler::CALCULATE_OPTION_PRICE_PATH;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// Directory served under `/pkg` (the wasm-pack output)
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pricing {
    pub max_simulations: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Client {
    pub base_url: String,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub pricing: Pricing,
    pub client: Client,
}

const ENV_PREFIX: &str = "OPTION_PRICER";

impl Settings {
    /// Defaults, then `config/<RUN_MODE>.toml` if present, then
    /// `OPTION_PRICER__SECTION__KEY` environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config_file = format!("{}.toml", run_mode);
        let possible_paths = vec![
            format!("config/{}", config_file),
            format!("../config/{}", config_file),
        ];
        let config_path = possible_paths
            .into_iter()
            .find(|path| std::path::Path::new(path).exists());

        let mut builder = Self::defaults()?;
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(&path.replace(".toml", "")).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Settings from a TOML string layered over the defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(contents, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("server.static_dir", "pkg")?
            .set_default("pricing.max_simulations", 10_000_000i64)?
            .set_default("client.base_url", "http://127.0.0.1:5000")?
            .set_default("client.endpoint", CALCULATE_OPTION_PRICE_PATH)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
