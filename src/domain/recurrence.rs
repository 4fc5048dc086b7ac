//! Recurrence generator. Rule-based closed days over a window of months.
//!
//! Rules (fixed, not configurable):
//! - every Tuesday
//! - the 2nd and 3rd Monday of each month

use crate::domain::{CivilDate, MonthKey};
use chrono::Weekday;
use std::collections::{BTreeMap, BTreeSet};

/// Weekly closure day.
pub const WEEKLY_CLOSED_DAY: Weekday = Weekday::Tue;

/// Weekday of the monthly closures.
pub const MONTHLY_CLOSED_DAY: Weekday = Weekday::Mon;

/// Which occurrences of [`MONTHLY_CLOSED_DAY`] are closed each month.
pub const MONTHLY_CLOSED_OCCURRENCES: [usize; 2] = [2, 3];

/// Month -> ascending, duplicate-free rule closures.
pub type RuleMap = BTreeMap<MonthKey, Vec<CivilDate>>;

/// Return the `n`-th (1-based) `weekday` of `month`, scanning forward from the 1st.
///
/// `None` when `n` is zero or the month has fewer than `n` such weekdays.
pub fn nth_weekday_of_month(month: MonthKey, weekday: Weekday, n: usize) -> Option<CivilDate> {
    let index = n.checked_sub(1)?;
    month.days().filter(|d| d.weekday() == weekday).nth(index)
}

/// Rule closures for a single month.
fn closures_for_month(month: MonthKey) -> Vec<CivilDate> {
    let mut closed: BTreeSet<CivilDate> = month
        .days()
        .filter(|d| d.weekday() == WEEKLY_CLOSED_DAY)
        .collect();
    for n in MONTHLY_CLOSED_OCCURRENCES {
        if let Some(d) = nth_weekday_of_month(month, MONTHLY_CLOSED_DAY, n) {
            closed.insert(d);
        }
    }
    closed.into_iter().collect()
}

/// Generate rule closures for `window_months` consecutive months, starting with
/// the month that contains `reference`.
///
/// Pure: identical inputs always give an identical map. A zero-length window
/// yields an empty map.
pub fn generate(reference: CivilDate, window_months: u32) -> RuleMap {
    let mut result = RuleMap::new();
    let mut month = reference.month_key();
    for _ in 0..window_months {
        result.insert(month, closures_for_month(month));
        month = month.next();
    }
    result
}

/// Whether the rule alone closes `date`.
pub fn is_rule_closed(date: CivilDate) -> bool {
    generate(date, 1)
        .get(&date.month_key())
        .is_some_and(|days| days.contains(&date))
}
