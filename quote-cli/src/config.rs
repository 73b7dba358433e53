//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing or partial file is fine:
//!
//! ```toml
//! log_level = "debug"
//! log_file = "quote.log"
//! max_existing_services = 20
//!
//! [[discounts.tiers]]
//! min_services = 2
//! rate = "0.05"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_core::DiscountSchedule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Append log output to this file as well as stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Upper bound applied to the existing-service count entered on step 1.
    pub max_existing_services: usize,

    /// Multi-service discount tiers.
    pub discounts: DiscountSchedule,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            max_existing_services: 100,
            discounts: DiscountSchedule::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("invalid configuration")?;
        config
            .discounts
            .validate()
            .context("invalid discount schedule")?;
        Ok(config)
    }

    /// Reads the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to load config file: {}", path.display()))
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
