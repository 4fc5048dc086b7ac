//! Override ledger stores.

pub mod ledger_json;
pub mod ledger_sqlite;

pub use ledger_json::JsonLedger;
pub use ledger_sqlite::SqliteLedger;
