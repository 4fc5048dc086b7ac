//! Toggle rule. How an admin request mutates the override ledger.

use crate::domain::recurrence::is_rule_closed;
use crate::domain::{CivilDate, DomainError, OverrideLedger, OverrideStatus};

/// Status after a toggle. `None` means "back to the rule default (open)".
pub type EffectiveStatus = Option<OverrideStatus>;

/// Requested new state for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRequest {
    ForcedClosed,
    ForcedOpen,
    /// No explicit status: revert to "auto". See [`apply_toggle`].
    Clear,
}

impl ToggleRequest {
    /// Parse a submitted status. A missing status is `Clear`; unknown text is rejected.
    pub fn parse(status: Option<&str>) -> Result<Self, DomainError> {
        match status {
            None => Ok(Self::Clear),
            Some(tag) => match OverrideStatus::from_tag(tag) {
                Some(OverrideStatus::ForcedClosed) => Ok(Self::ForcedClosed),
                Some(OverrideStatus::ForcedOpen) => Ok(Self::ForcedOpen),
                None => Err(DomainError::InvalidStatus(tag.to_string())),
            },
        }
    }

    /// Admin calendar click: a closed day is cleared, an open day is force-closed.
    pub fn flip(is_closed_now: bool) -> Self {
        if is_closed_now {
            Self::Clear
        } else {
            Self::ForcedClosed
        }
    }
}

/// Apply `request` for `date` to `ledger` and return the effective status.
///
/// `Clear` on a rule-closed date writes `ForcedOpen`, so clearing always leaves
/// the date open. On any other date it deletes the entry.
pub fn apply_toggle(
    ledger: &mut OverrideLedger,
    date: CivilDate,
    request: ToggleRequest,
) -> EffectiveStatus {
    match request {
        ToggleRequest::ForcedClosed => {
            ledger.set(date, OverrideStatus::ForcedClosed);
            Some(OverrideStatus::ForcedClosed)
        }
        ToggleRequest::ForcedOpen => {
            ledger.set(date, OverrideStatus::ForcedOpen);
            Some(OverrideStatus::ForcedOpen)
        }
        ToggleRequest::Clear if is_rule_closed(date) => {
            ledger.set(date, OverrideStatus::ForcedOpen);
            Some(OverrideStatus::ForcedOpen)
        }
        ToggleRequest::Clear => {
            ledger.remove(date);
            None
        }
    }
}
