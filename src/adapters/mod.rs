//! Infrastructure adapters. Implement outbound ports and drive inbound ones.
//!
//! Ledger storage, wall clock, terminal UI. Map errors to DomainError.

pub mod clock;
pub mod persistence;
pub mod ui;
