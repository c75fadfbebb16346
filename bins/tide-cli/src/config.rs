//! CLI configuration: built-in defaults, then an optional TOML file, then
//! `TIDE_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tide_core::Q128;
use tide_filter::{default_alpha, default_beta};

/// Environment variable prefix, e.g. `TIDE_LOG_LEVEL`.
pub const ENV_PREFIX: &str = "TIDE";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Log level filter string (e.g. "info", "debug", "tide_filter=trace").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
    /// Alpha-beta filter position gain as a decimal; unset means the default.
    pub alpha: Option<String>,
    /// Alpha-beta filter velocity gain as a decimal; unset means the default.
    pub beta: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
            alpha: None,
            beta: None,
        }
    }
}

impl CliConfig {
    /// Load the layered configuration. A missing `path` is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Position gain for the alpha-beta filter.
    pub fn alpha(&self) -> Result<Q128> {
        match &self.alpha {
            Some(s) => s.parse().with_context(|| format!("invalid alpha {s:?}")),
            None => Ok(default_alpha()),
        }
    }

    /// Velocity gain for the alpha-beta filter.
    pub fn beta(&self) -> Result<Q128> {
        match &self.beta {
            Some(s) => s.parse().with_context(|| format!("invalid beta {s:?}")),
            None => Ok(default_beta()),
        }
    }
}
