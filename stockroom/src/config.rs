//! Client configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The file path
//! defaults to `stockroom.yaml` but can be specified via `-f` flag or `STOCKROOM_CONFIG`
//! environment variable. A missing file is not an error; defaults apply.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration (default: `stockroom.yaml`)
//! 2. **Environment variables** - Variables prefixed with `STOCKROOM_` override YAML values
//!
//! For nested values, use double underscores: `STOCKROOM_API__BASE_URL=http://inventory:5000`
//! sets `api.base_url`.
//!
//! ## Example
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:5000
//!   request_timeout: 10s
//! notifications:
//!   ttl: 5s
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::cli::Command;
use crate::error::ClientError;

/// CLI args: the config file plus an optional subcommand
#[derive(Parser, Debug)]
#[command(author, version, about = "Inventory dashboard for the terminal", long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "STOCKROOM_CONFIG", default_value = "stockroom.yaml")]
    pub config: String,

    /// Validate configuration and exit
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the inventory service lives
    pub api: ApiConfig,
    /// Notification area behaviour
    pub notifications: NotificationsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Service root; API paths (`/api/...`) are appended to it
    pub base_url: Url,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:5000").expect("default base URL is valid"),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationsConfig {
    /// How long a notification stays before dismissing itself
    #[serde(with = "humantime_serde")]
    pub ttl: Duration,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl: crate::notify::DEFAULT_TTL,
        }
    }
}

impl Config {
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("STOCKROOM_").ignore(&["config"]).split("__"))
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if !matches!(self.api.base_url.scheme(), "http" | "https") {
            return Err(ClientError::Other(anyhow::anyhow!(
                "Config validation: api.base_url must be an http(s) URL, got '{}'",
                self.api.base_url
            )));
        }
        if self.notifications.ttl.is_zero() {
            return Err(ClientError::Other(anyhow::anyhow!(
                "Config validation: notifications.ttl must be greater than zero"
            )));
        }
        Ok(())
    }
}
