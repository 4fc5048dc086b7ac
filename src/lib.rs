//! closed-days: closed-day calendar engine with Hexagonal Architecture.
//!
//! Recurrence rules (every Tuesday, 2nd and 3rd Monday) merged with a manual
//! override ledger into a per-month calendar window.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
