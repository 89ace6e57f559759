//! Transaction analytics: aggregates, chart series and the dashboard state

pub mod aggregates;
pub mod error;
pub mod models;
pub mod overview;
pub mod reports;
pub mod series;
pub mod time;

use async_trait::async_trait;
use chrono::NaiveDate;
use spendlens_config::Config;
use std::sync::{Arc, RwLock};

pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{TransactionRecord, TransactionType};
pub use overview::{compute_overview, AnalyticsOptions};
pub use reports::{CategorySlice, HighestSpending, MonthlyBucket, Overview};
pub use time::MonthWindow;

// ==================== Transaction Sources ====================

/// Anything that can hand over a normalized list of transactions
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> String;

    /// Fetch the full record list, in source order
    async fn fetch(&self) -> CoreResult<Vec<TransactionRecord>>;
}

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Fixed record list, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<TransactionRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl TransactionSource for InMemorySource {
    fn name(&self) -> String {
        format!("memory:{}", self.records.len())
    }

    async fn fetch(&self) -> CoreResult<Vec<TransactionRecord>> {
        Ok(self.records.clone())
    }
}

// ==================== Dashboard ====================

/// Loaded transactions plus the settings needed to summarize them
pub struct Dashboard {
    config: Config,
    source: SourceRef,
    records: RwLock<Option<Vec<TransactionRecord>>>,
}

impl Dashboard {
    /// Create a dashboard with config and source; nothing is fetched yet
    ///
    /// Fails with `ConfigError` when the config does not validate.
    pub fn new(config: Config, source: SourceRef) -> CoreResult<Self> {
        config.validate().map_err(|e| CoreError::ConfigError {
            message: e.to_string(),
        })?;

        Ok(Self {
            config,
            source,
            records: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch records from the source, replacing any previous load
    pub async fn load(&self) -> CoreResult<usize> {
        log::info!("Loading transactions from {}", self.source.name());
        let records = self.source.fetch().await?;
        let count = records.len();

        let mut guard = self.records.write().map_err(|e| CoreError::InternalError {
            message: format!("records lock poisoned: {}", e),
        })?;
        *guard = Some(records);

        log::info!("Loaded {} transactions", count);
        Ok(count)
    }

    /// Same as `load`; kept separate for callers refreshing on demand
    pub async fn reload(&self) -> CoreResult<usize> {
        log::debug!("Reloading transactions");
        self.load().await
    }

    pub fn is_loaded(&self) -> bool {
        self.records.read().map(|r| r.is_some()).unwrap_or(false)
    }

    /// Snapshot of the loaded records
    pub fn records(&self) -> CoreResult<Vec<TransactionRecord>> {
        let guard = self.records.read().map_err(|e| CoreError::InternalError {
            message: format!("records lock poisoned: {}", e),
        })?;
        guard.clone().ok_or(CoreError::NotLoaded)
    }

    /// Analytics options derived from the config
    pub fn options(&self) -> AnalyticsOptions {
        AnalyticsOptions::from_config(&self.config)
    }

    /// Overview of the loaded records, window anchored per config
    pub fn overview(&self) -> CoreResult<Overview> {
        self.overview_with(&self.options())
    }

    /// Overview with the monthly window ending on `reference_date`
    pub fn overview_at(&self, reference_date: NaiveDate) -> CoreResult<Overview> {
        self.overview_with(&self.options().with_reference_date(reference_date))
    }

    fn overview_with(&self, options: &AnalyticsOptions) -> CoreResult<Overview> {
        let guard = self.records.read().map_err(|e| CoreError::InternalError {
            message: format!("records lock poisoned: {}", e),
        })?;
        let records = guard.as_ref().ok_or(CoreError::NotLoaded)?;
        Ok(compute_overview(records, options))
    }
}
