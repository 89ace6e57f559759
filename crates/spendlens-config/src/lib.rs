//! Configuration management for spendlens
//!
//! This module handles loading, validation, and management of
//! spendlens configuration from YAML files.

pub mod error;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

/// Sentinel shown when a ranking has nothing to rank
pub const NOT_AVAILABLE: &str = "N/A";

// ==================== Configuration Types ====================

/// Input data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the exported transactions JSON file
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data/transactions.json")
}

/// Analytics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of calendar months in the monthly spending series
    #[serde(default = "default_months_back")]
    pub months_back: u32,
    /// Number of records in the recent transactions list
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
    /// Fixed anchor for the monthly window; today (UTC) when unset
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Label for records with a blank category
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
    /// Label for records with a blank payment method
    #[serde(default = "default_unknown_payment_label")]
    pub unknown_payment_label: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            months_back: default_months_back(),
            recent_count: default_recent_count(),
            reference_date: None,
            uncategorized_label: default_uncategorized_label(),
            unknown_payment_label: default_unknown_payment_label(),
        }
    }
}

fn default_months_back() -> u32 {
    6
}

fn default_recent_count() -> usize {
    5
}

fn default_uncategorized_label() -> String {
    "Uncategorized".to_string()
}

fn default_unknown_payment_label() -> String {
    "Unknown".to_string()
}

/// Chart color settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Colors cycled over category slices, in first-seen order
    #[serde(default = "default_category_palette")]
    pub category_palette: Vec<String>,
    /// Colors cycled over monthly buckets, oldest first
    #[serde(default = "default_monthly_palette")]
    pub monthly_palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            category_palette: default_category_palette(),
            monthly_palette: default_monthly_palette(),
        }
    }
}

fn default_category_palette() -> Vec<String> {
    ["#FF6B6B", "#4ECDC4", "#45B7D1", "#F7B731", "#5D5F6E"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_monthly_palette() -> Vec<String> {
    ["#4ECDC4", "#45B7D1", "#F7B731", "#FF6B6B", "#5D5F6E", "#A3A1FB"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Currency symbol
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Number of decimal places
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    /// Thousands separator
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    /// Decimal separator
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
    /// Currency symbol position ("before" or "after")
    #[serde(default)]
    pub symbol_position: SymbolPosition,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
            symbol_position: SymbolPosition::Before,
        }
    }
}

fn default_symbol() -> String {
    "$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ",".to_string()
}

fn default_decimal_sep() -> String {
    ".".to_string()
}

/// Currency symbol position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Before,
    After,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Output settings for the command-line report
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Overview serialized as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Input data settings
    #[serde(default)]
    pub data: DataConfig,
    /// Analytics settings
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Chart settings
    #[serde(default)]
    pub charts: ChartConfig,
    /// Currency settings
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::from(e),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analytics.months_back == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analytics.months_back".to_string(),
                reason: "Months back must be greater than 0".to_string(),
            });
        }

        if self.analytics.months_back > 120 {
            return Err(ConfigError::InvalidValue {
                field: "analytics.months_back".to_string(),
                reason: "Months back must be at most 120".to_string(),
            });
        }

        if self.charts.category_palette.is_empty() {
            return Err(ConfigError::MissingField {
                field: "charts.category_palette".to_string(),
            });
        }

        if self.charts.monthly_palette.is_empty() {
            return Err(ConfigError::MissingField {
                field: "charts.monthly_palette".to_string(),
            });
        }

        if self.analytics.uncategorized_label.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "analytics.uncategorized_label must not be blank".to_string(),
            });
        }

        if self.analytics.unknown_payment_label.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "analytics.unknown_payment_label must not be blank".to_string(),
            });
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}
