//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here: the recurrence generator, the
//! override merger and the toggle rule. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod merge;
pub mod recurrence;
pub mod toggle;

pub use entities::{CalendarWindow, CivilDate, MonthKey, OverrideLedger, OverrideStatus};
pub use errors::DomainError;
pub use merge::merge;
pub use recurrence::{RuleMap, generate, is_rule_closed, nth_weekday_of_month};
pub use toggle::{EffectiveStatus, ToggleRequest, apply_toggle};
