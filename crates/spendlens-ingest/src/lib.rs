//! Transaction sources for spendlens
//!
//! Reads exports of the remote `transactions` table and normalizes each row
//! into a `TransactionRecord` before the engine sees it.

use async_trait::async_trait;
use spendlens_core::{CoreResult, TransactionRecord, TransactionSource};
use std::path::PathBuf;

pub mod error;
pub mod remote;

pub use error::{IngestError, IngestResult};
pub use remote::{RemoteMerchant, RemotePaymentMethod, RemoteTransaction};

/// Parse a JSON array of remote rows, keeping their order
pub fn parse_str(content: &str) -> IngestResult<Vec<TransactionRecord>> {
    let rows: Vec<RemoteTransaction> =
        serde_json::from_str(content).map_err(|e| IngestError::InvalidFormat {
            message: e.to_string(),
        })?;

    rows.into_iter().map(RemoteTransaction::into_record).collect()
}

/// Source backed by a JSON export file on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read and normalize the whole file
    pub async fn read(&self) -> IngestResult<Vec<TransactionRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let records = parse_str(&content)?;
        log::debug!("Parsed {} rows from {}", records.len(), self.path.display());
        Ok(records)
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    fn name(&self) -> String {
        format!("json:{}", self.path.display())
    }

    async fn fetch(&self) -> CoreResult<Vec<TransactionRecord>> {
        self.read().await.map_err(|e| e.into_core(self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendlens_core::{CoreError, TransactionType};
    use std::sync::Arc;

    const EXPORT: &str = r#"[
        {
            "transaction_id": 1,
            "amount": 2500,
            "t_date": "2024-06-01T09:00:00+00:00",
            "category": "Salary",
            "type": "Deposit",
            "payment_method": { "payment_type": "Bank Transfer" }
        },
        {
            "transaction_id": 2,
            "amount": "42.10",
            "t_date": "2024-06-03",
            "category": "Food",
            "type": "Withdrawal",
            "payment_method": { "payment_type": "Credit Card" },
            "merchant": { "merchant_name": "Corner Market" }
        }
    ]"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spendlens-ingest-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_parse_str_keeps_order() {
        let records = parse_str(EXPORT).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].transaction_type, TransactionType::Deposit);
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].merchant_name.as_deref(), Some("Corner Market"));
    }

    #[test]
    fn test_parse_str_empty_array() {
        assert!(parse_str("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_str_rejects_non_array() {
        let error = parse_str(r#"{"transaction_id": 1}"#).unwrap_err();
        assert!(matches!(error, IngestError::InvalidFormat { .. }));
    }

    #[test]
    fn test_parse_str_fails_on_bad_row() {
        let content = r#"[
            { "transaction_id": 1, "amount": 5, "t_date": "2024-06-01", "type": "Deposit" },
            { "transaction_id": 2, "amount": -5, "t_date": "2024-06-01", "type": "Withdrawal" }
        ]"#;

        let error = parse_str(content).unwrap_err();
        assert!(matches!(error, IngestError::InvalidAmount { ref transaction_id, .. } if transaction_id == "2"));
    }

    #[tokio::test]
    async fn test_json_file_source_fetch() {
        let path = temp_path("fetch.json");
        tokio::fs::write(&path, EXPORT).await.unwrap();

        let source: spendlens_core::SourceRef = Arc::new(JsonFileSource::new(&path));
        let records = source.fetch().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].payment_method, "Credit Card");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new(temp_path("missing.json"));

        assert!(matches!(source.read().await, Err(IngestError::IoError(_))));
        match source.fetch().await {
            Err(CoreError::SourceError { source_name, .. }) => {
                assert!(source_name.starts_with("json:"));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.len())),
        }
    }
}
