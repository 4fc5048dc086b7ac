//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CivilDate, DomainError, OverrideLedger};

/// Override ledger store. Read-whole / write-whole.
///
/// The caller serializes writers; implementations do no locking of their own.
#[async_trait::async_trait]
pub trait LedgerPort: Send + Sync {
    /// Full read of persisted overrides. A missing store is an empty ledger.
    async fn load_ledger(&self) -> Result<OverrideLedger, DomainError>;

    /// Full overwrite of persisted overrides. Must be durable when `Ok`.
    async fn save_ledger(&self, ledger: &OverrideLedger) -> Result<(), DomainError>;
}

/// Source of "today" in the business's civil calendar. Owns timezone resolution.
pub trait ClockPort: Send + Sync {
    fn today(&self) -> CivilDate;
}
