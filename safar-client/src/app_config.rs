use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub tenant: TenantConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TenantConfig {
    /// Fallback company id when neither the cached session nor an explicit
    /// override provides one.
    #[serde(default)]
    pub company_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SessionConfig {
    /// Override for the session file location; defaults to the user data
    /// directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of SAFAR)
            // Eg.. `SAFAR_API__BASE_URL=...` would set the api.base_url key
            .add_source(config::Environment::with_prefix("SAFAR").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
