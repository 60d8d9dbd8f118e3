//! Application configuration.
//!
//! Sources, later ones winning: built-in defaults, an optional `bakeledger.toml` in the
//! working directory (or the file named by `BAKELEDGER_CONFIG`), then `BAKELEDGER__*`
//! environment variables (`BAKELEDGER__DATA_DIR=/var/lib/bakeledger`).

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "bakeledger.toml";
pub const ENV_PREFIX: &str = "BAKELEDGER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Directory for the JSON file store. Unset keeps everything in memory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Seed the demo product catalog on startup when none is stored.
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
    /// Optional cap on total stored bytes.
    #[serde(default)]
    pub storage_quota_bytes: Option<usize>,
    #[serde(default = "default_business_name")]
    pub business_name: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_seed_demo() -> bool {
    true
}

fn default_business_name() -> String {
    bakeledger_invoicing::DEFAULT_BUSINESS_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
            seed_demo: default_seed_demo(),
            storage_quota_bytes: None,
            business_name: default_business_name(),
        }
    }
}

impl AppConfig {
    /// Load from the default file location plus environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(format!("{ENV_PREFIX}_CONFIG"))
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true);
        Self::load_from(&file, env)
    }

    /// Load from an explicit file (optional) and environment source.
    pub fn load_from(file: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("log_format", "pretty")?
            .set_default("log_filter", default_log_filter())?
            .set_default("seed_demo", default_seed_demo())?
            .set_default("business_name", default_business_name())?
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
