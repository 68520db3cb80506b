use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use tracing_subscriber::EnvFilter;
use validator::Validate;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";

/// Pricing knobs that were constants in earlier deployments. Defaults
/// reproduce the original rebar setup.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Item group whose prices participate in the kg/PCS sync.
    #[serde(default = "default_rebar_item_group")]
    #[validate(length(min = 1))]
    pub rebar_item_group: String,

    /// Currency applied when a price record carries none.
    #[serde(default = "default_currency")]
    #[validate(length(min = 1))]
    pub default_currency: String,

    /// Unit the derived per-piece prices are written under.
    #[serde(default = "default_piece_uom")]
    #[validate(length(min = 1))]
    pub piece_uom: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rebar_item_group: default_rebar_item_group(),
            default_currency: default_currency(),
            piece_uom: default_piece_uom(),
        }
    }
}

fn default_rebar_item_group() -> String {
    "Re-Bar".to_string()
}

fn default_currency() -> String {
    "ETB".to_string()
}

fn default_piece_uom() -> String {
    "PCS".to_string()
}

/// Application configuration, layered from `config/default`, an
/// environment-specific file and `APP_`-prefixed env vars.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    pub database_url: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable lines
    #[serde(default)]
    pub log_json: bool,

    #[serde(default)]
    #[validate]
    pub pricing: PricingConfig,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl AppConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads configuration for the current `RUN_ENV` (default "development").
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    let config = Config::builder()
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config
        .validate()
        .map_err(|e| ConfigError::Message(format!("invalid configuration: {e}")))?;
    Ok(app_config)
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// configured level.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
