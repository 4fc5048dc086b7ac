//! SQLite-backed override ledger via libsql. Implements LedgerPort.
//!
//! Single `overrides` table keyed by date; `save_ledger` rewrites the whole table
//! in one transaction so readers never see a half-written ledger.

use crate::domain::{DomainError, OverrideLedger};
use crate::ports::LedgerPort;
use libsql::{Database, params};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default database file name inside the data directory.
pub const LEDGER_DB: &str = "ledger.db";

const OVERRIDES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS overrides (
    date TEXT PRIMARY KEY,
    status TEXT
)"#;

/// SQLite ledger. One database file (ledger.db) in the given base directory.
pub struct SqliteLedger {
    db: Database,
    db_path: PathBuf,
}

impl SqliteLedger {
    /// Connect to (or create) the database and ensure the schema exists.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Ledger(e.to_string()))?;
        let db_path = base.join(LEDGER_DB);
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        let conn = db
            .connect()
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        conn.execute(OVERRIDES_TABLE, ())
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;

        info!(path = %db_path.display(), "SQLite override ledger connected");
        Ok(Self { db, db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait::async_trait]
impl LedgerPort for SqliteLedger {
    async fn load_ledger(&self) -> Result<OverrideLedger, DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        let mut rows = conn
            .query("SELECT date, status FROM overrides ORDER BY date", ())
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        let mut raw = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?
        {
            let date: String = row.get(0).map_err(|e| DomainError::Ledger(e.to_string()))?;
            let status: Option<String> = row.get(1).ok();
            raw.push((date, status));
        }
        let (ledger, rejected) = OverrideLedger::from_tags(raw);
        if !rejected.is_empty() {
            warn!(
                path = %self.db_path.display(),
                keys = ?rejected,
                "ignoring ledger rows with malformed date keys"
            );
        }
        Ok(ledger)
    }

    async fn save_ledger(&self, ledger: &OverrideLedger) -> Result<(), DomainError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        let tx = conn
            .transaction()
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        tx.execute("DELETE FROM overrides", ())
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        for (date, status) in ledger.iter() {
            tx.execute(
                "INSERT INTO overrides (date, status) VALUES (?1, ?2)",
                params![date.date_key(), status.map(|s| s.as_tag())],
            )
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| DomainError::Ledger(e.to_string()))?;

        info!(
            path = %self.db_path.display(),
            entries = ledger.len(),
            "saved override ledger (SQLite)"
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
    async fn test_fresh_database_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteLedger::connect(dir.path()).await.unwrap();
        assert!(store.load_ledger().await.unwrap().is_empty());
        assert!(store.path().ends_with(LEDGER_DB));
    }

    #[tokio::test]
    async fn test_save_replaces_whole_table() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteLedger::connect(dir.path()).await.unwrap();

        let mut first = OverrideLedger::new();
        first.set(date("2024-07-02"), OverrideStatus::ForcedOpen);
        first.set(date("2024-07-10"), OverrideStatus::ForcedClosed);
        store.save_ledger(&first).await.unwrap();
        assert_eq!(store.load_ledger().await.unwrap(), first);

        let mut second = first.clone();
        second.remove(date("2024-07-10"));
        store.save_ledger(&second).await.unwrap();
        let loaded = store.load_ledger().await.unwrap();
        assert_eq!(loaded, second);
        assert_eq!(loaded.len(), 1);
    }
}
