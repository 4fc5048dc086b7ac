//! Calendar use cases: publish the closed-day window, apply admin toggles.
//!
//! - Reads "today" from ClockPort
//! - Loads the whole ledger at the start of each call, never caches it
//! - A failed ledger read degrades to the rule-only schedule
//! - A failed ledger write fails the toggle

use crate::domain::{
    self, CalendarWindow, CivilDate, DomainError, EffectiveStatus, OverrideLedger, ToggleRequest,
};
use crate::ports::{ClockPort, LedgerPort};
use std::sync::Arc;
use tracing::{info, warn};

/// Calendar service. Stateless between calls; all state lives behind LedgerPort.
pub struct CalendarService {
    ledger: Arc<dyn LedgerPort>,
    clock: Arc<dyn ClockPort>,
}

impl CalendarService {
    pub fn new(ledger: Arc<dyn LedgerPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { ledger, clock }
    }

    pub fn today(&self) -> CivilDate {
        self.clock.today()
    }

    /// Published read path: `window_months` months starting with the current month.
    pub async fn get_calendar_window(&self, window_months: u32) -> CalendarWindow {
        self.calendar_window_at(self.clock.today(), window_months)
            .await
    }

    /// Same as [`Self::get_calendar_window`] with an explicit reference date.
    pub async fn calendar_window_at(
        &self,
        reference: CivilDate,
        window_months: u32,
    ) -> CalendarWindow {
        let rules = domain::generate(reference, window_months);
        let ledger = self.load_or_empty().await;
        domain::merge(&rules, &ledger)
    }

    /// Whether `date` is closed after overrides.
    pub async fn is_closed(&self, date: CivilDate) -> bool {
        self.calendar_window_at(date, 1).await.contains(date)
    }

    /// Apply one toggle: load ledger, mutate, save. Returns the effective status
    /// only if the save succeeded.
    ///
    /// An unreadable store is treated as empty, so the save replaces it with a
    /// ledger holding only this toggle.
    pub async fn apply_toggle(
        &self,
        date: CivilDate,
        request: ToggleRequest,
    ) -> Result<EffectiveStatus, DomainError> {
        let mut ledger = match self.ledger.load_ledger().await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(
                    error = %e,
                    date = %date,
                    "override ledger unreadable; saving this toggle will replace the stored ledger"
                );
                OverrideLedger::new()
            }
        };
        let effective = domain::apply_toggle(&mut ledger, date, request);
        self.ledger.save_ledger(&ledger).await?;
        info!(
            date = %date,
            ?request,
            effective = effective.map(|s| s.as_tag()).unwrap_or("auto"),
            "override applied"
        );
        Ok(effective)
    }

    async fn load_or_empty(&self) -> OverrideLedger {
        match self.ledger.load_ledger().await {
            Ok(ledger) => ledger,
            Err(e) => {
                warn!(error = %e, "override ledger unreadable; serving rule-only schedule");
                OverrideLedger::new()
            }
        }
    }
}
