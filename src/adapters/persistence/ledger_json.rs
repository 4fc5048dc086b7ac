//! Implements LedgerPort using a JSON file.
//!
//! File shape: `{"YYYY-MM-DD": "closed" | "open" | null, ...}`. Legacy labels
//! (`休業日` / `営業日`) and non-string values are accepted on read.

use crate::domain::{DomainError, OverrideLedger};
use crate::ports::LedgerPort;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Default file name inside the data directory.
pub const LEDGER_FILE: &str = "holidays.json";

/// JSON file-based override ledger.
pub struct JsonLedger {
    path: PathBuf,
}

impl JsonLedger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl LedgerPort for JsonLedger {
    async fn load_ledger(&self) -> Result<OverrideLedger, DomainError> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(OverrideLedger::new()),
            Err(e) => return Err(DomainError::Ledger(format!("read ledger: {}", e))),
        };
        let raw: BTreeMap<String, Value> = serde_json::from_str(&text)
            .map_err(|e| DomainError::Ledger(format!("parse ledger: {}", e)))?;
        let (ledger, rejected) = OverrideLedger::from_tags(raw.into_iter().map(|(k, v)| {
            let tag = match v {
                Value::String(s) => Some(s),
                _ => None,
            };
            (k, tag)
        }));
        if !rejected.is_empty() {
            warn!(
                path = %self.path.display(),
                keys = ?rejected,
                "ignoring ledger entries with malformed date keys"
            );
        }
        Ok(ledger)
    }

    /// Atomic save using write-replace pattern.
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn save_ledger(&self, ledger: &OverrideLedger) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(ledger).map_err(|e| DomainError::Ledger(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Ledger(format!("create ledger dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Ledger(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Ledger(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Ledger(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Ledger(format!("atomic rename failed: {}", e)))?;

        info!(
            path = %self.path.display(),
            entries = ledger.len(),
            "saved override ledger (JSON)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CivilDate, OverrideStatus};

    fn date(s: &str) -> CivilDate {
        CivilDate::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedger::new(dir.path().join(LEDGER_FILE));
        assert!(store.load_ledger().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLedger::new(dir.path().join("nested").join(LEDGER_FILE));
        let mut ledger = OverrideLedger::new();
        ledger.set(date("2024-07-02"), OverrideStatus::ForcedOpen);
        ledger.set(date("2024-07-10"), OverrideStatus::ForcedClosed);
        store.save_ledger(&ledger).await.unwrap();

        let loaded = store.load_ledger().await.unwrap();
        assert_eq!(loaded, ledger);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_reads_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LEDGER_FILE);
        std::fs::write(
            &path,
            r#"{"2024-07-02": "営業日", "2024-07-10": "休業日", "2024-07-11": true, "bogus": "closed"}"#,
        )
        .unwrap();
        let ledger = JsonLedger::new(&path).load_ledger().await.unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(
            ledger.status(date("2024-07-02")),
            Some(OverrideStatus::ForcedOpen)
        );
        assert_eq!(
            ledger.status(date("2024-07-10")),
            Some(OverrideStatus::ForcedClosed)
        );
        assert!(ledger.contains(date("2024-07-11")));
        assert_eq!(ledger.status(date("2024-07-11")), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LEDGER_FILE);
        std::fs::write(&path, "{not json").unwrap();
        let result = JsonLedger::new(&path).load_ledger().await;
        assert!(matches!(result, Err(DomainError::Ledger(_))));
    }
}
