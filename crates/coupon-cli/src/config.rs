//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --catalog ./catalog.toml --output json                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     COUPON_CATALOG=./catalog.toml                                      │
//! │     COUPON_LOG=debug                                                   │
//! │     COUPON_OUTPUT=json                                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/coupon-calc/coupon.toml (Linux)                          │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! catalog_path = "/srv/shop/catalog.toml"
//! log_filter = "info,coupon=debug"
//! output = "json"
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

use crate::error::{CliError, CliResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the order summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable receipt.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// CLI Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog file (products and coupons), JSON or TOML.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_filter() -> String {
    "info,coupon=debug".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            catalog_path: None,
            log_filter: default_log_filter(),
            output: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (coupon.toml), skipped when absent
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| CliError::Read { path, source })?;
                config = Self::from_toml_str(&contents)?;
            } else if explicit {
                return Err(CliError::InvalidConfig(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML config document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `COUPON_*` overrides read through `var`.
    ///
    /// `var` is `std::env::var` in production and a map in tests.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("COUPON_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = var("COUPON_LOG") {
            self.log_filter = filter;
        }

        if let Some(output) = var("COUPON_OUTPUT") {
            match output.parse() {
                Ok(parsed) => self.output = parsed,
                Err(_) => warn!(output = %output, "Unknown output format in environment"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "log_filter must not be empty".into(),
            ));
        }

        if let Some(path) = &self.catalog_path {
            if path.as_os_str().is_empty() {
                return Err(CliError::InvalidConfig(
                    "catalog_path must not be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Returns the catalog path or `MissingCatalog`.
    pub fn require_catalog(&self) -> CliResult<&PathBuf> {
        self.catalog_path.as_ref().ok_or(CliError::MissingCatalog)
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "coupon", "coupon-calc")
            .map(|dirs| dirs.config_dir().join("coupon.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
