//! Server Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! file, then `PLAYER_VALUE_*` environment variables (`__` separates nested
//! keys, e.g. `PLAYER_VALUE_RATE_LIMIT__ENABLED=true`).

use crate::rate_limit::RateLimitConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Config file read when no path is given; may be absent
pub const DEFAULT_CONFIG_FILE: &str = "config/server";

const ENV_PREFIX: &str = "PLAYER_VALUE";

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,
    /// Fitted scaler artifact
    pub scaler_path: PathBuf,
    /// Fitted regression model artifact
    pub model_path: PathBuf,
    /// trace, debug, info, warn or error
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Record metrics and serve `/metrics`
    pub metrics_enabled: bool,
    pub rate_limit: RateLimitConfig,
}

/// `PLAYER_VALUE_*` variables, `__` between nested keys
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl ServerConfig {
    /// Load configuration; only an explicitly given file must exist
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let defaults = RateLimitConfig::default();
        let file =
            File::with_name(path.unwrap_or(DEFAULT_CONFIG_FILE)).required(path.is_some());

        Config::builder()
            .set_default("bind_addr", "127.0.0.1:5000")?
            .set_default("scaler_path", "model/scaler.json")?
            .set_default("model_path", "model/model.json")?
            .set_default("log_level", "info")?
            .set_default("log_json", false)?
            .set_default("metrics_enabled", false)?
            .set_default("rate_limit.enabled", defaults.enabled)?
            .set_default("rate_limit.per_second", defaults.per_second as i64)?
            .set_default("rate_limit.burst_size", defaults.burst_size as i64)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            scaler_path: PathBuf::from("model/scaler.json"),
            model_path: PathBuf::from("model/model.json"),
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            rate_limit: RateLimitConfig::default(),
        }
    }
}
