//! Override merger. Rule closures + manual ledger -> published calendar window.

use crate::domain::recurrence::RuleMap;
use crate::domain::{CalendarWindow, CivilDate, MonthKey, OverrideLedger, OverrideStatus};
use std::collections::{BTreeMap, BTreeSet};

/// Apply `ledger` on top of `rule_map` and regroup by month.
///
/// - `ForcedClosed` adds the date (no-op if the rule already closed it).
/// - `ForcedOpen` removes it, even if the rule closed it.
/// - An unrecognized entry also removes it; it never forces a closure.
///
/// The output covers exactly the months of `rule_map`. Ledger dates outside
/// those months are ignored, and a month left with no closures maps to an
/// empty sequence.
pub fn merge(rule_map: &RuleMap, ledger: &OverrideLedger) -> CalendarWindow {
    let mut closed: BTreeSet<CivilDate> = rule_map.values().flatten().copied().collect();

    for (date, status) in ledger.iter() {
        match status {
            Some(OverrideStatus::ForcedClosed) => {
                closed.insert(date);
            }
            Some(OverrideStatus::ForcedOpen) | None => {
                closed.remove(&date);
            }
        }
    }

    let mut months: BTreeMap<MonthKey, Vec<CivilDate>> =
        rule_map.keys().map(|m| (*m, Vec::new())).collect();
    // BTreeSet iterates ascending, so each month's vec comes out sorted.
    for date in closed {
        if let Some(days) = months.get_mut(&date.month_key()) {
            days.push(date);
        }
    }
    CalendarWindow::from(months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generate;

    fn date(s: &str) -> CivilDate {
        CivilDate::parse(s).unwrap()
    }

    fn july() -> MonthKey {
        MonthKey::new(2024, 7).unwrap()
    }

    fn ledger(entries: &[(&str, &str)]) -> OverrideLedger {
        let (ledger, rejected) = OverrideLedger::from_tags(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string()))),
        );
        assert!(rejected.is_empty());
        ledger
    }

    #[test]
    fn test_empty_ledger_passes_rules_through() {
        let rules = generate(date("2024-07-01"), 2);
        let window = merge(&rules, &OverrideLedger::new());
        for (month, days) in &rules {
            assert_eq!(window.get(*month), Some(days.as_slice()));
        }
    }

    #[test]
    fn test_forced_open_removes_rule_closure() {
        let rules = generate(date("2024-07-01"), 1);
        assert!(rules[&july()].contains(&date("2024-07-02")));
        let window = merge(&rules, &ledger(&[("2024-07-02", "open")]));
        assert!(!window.date_keys(july()).contains(&"2024-07-02".to_string()));
        assert!(window.contains(date("2024-07-09")));
    }

    #[test]
    fn test_forced_closed_adds_date() {
        let rules = generate(date("2024-07-01"), 1);
        let window = merge(
            &rules,
            &ledger(&[("2024-07-15", "closed"), ("2024-07-22", "休業日")]),
        );
        let keys = window.date_keys(july());
        assert!(keys.contains(&"2024-07-15".to_string()));
        // 4th Monday: not a rule closure.
        assert!(keys.contains(&"2024-07-22".to_string()));
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), rules[&july()].len() + 1);
    }

    #[test]
    fn test_unrecognized_status_never_closes() {
        let rules = generate(date("2024-07-01"), 1);
        let window = merge(
            &rules,
            &ledger(&[("2024-07-09", "pending"), ("2024-07-10", "pending")]),
        );
        assert!(!window.contains(date("2024-07-09")));
        assert!(!window.contains(date("2024-07-10")));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let rules = generate(date("2024-07-01"), 2);
        let overrides = ledger(&[
            ("2024-07-02", "open"),
            ("2024-07-10", "closed"),
            ("2024-07-16", "pending"),
            ("2024-08-06", "営業日"),
        ]);
        let once = merge(&rules, &overrides);
        assert!(!once.contains(date("2024-07-02")));
        assert!(once.contains(date("2024-07-10")));
        assert!(!once.contains(date("2024-07-16")));

        let merged_rules: RuleMap = once.months().map(|(m, v)| (m, v.to_vec())).collect();
        let twice = merge(&merged_rules, &overrides);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_fully_reopened_month_stays_as_empty() {
        let rules = generate(date("2024-07-01"), 2);
        let august = MonthKey::new(2024, 8).unwrap();
        let entries: Vec<(String, Option<String>)> = rules[&august]
            .iter()
            .map(|d| (d.date_key(), Some("open".to_string())))
            .collect();
        let (overrides, _) = OverrideLedger::from_tags(entries);
        let window = merge(&rules, &overrides);
        assert_eq!(window.len(), 2);
        assert_eq!(window.get(august), Some(&[][..]));
        assert_eq!(window.month_keys(), vec!["2024-07", "2024-08"]);
    }

    #[test]
    fn test_out_of_window_closure_is_clipped() {
        let rules = generate(date("2024-07-01"), 2);
        let window = merge(&rules, &ledger(&[("2025-03-05", "closed")]));
        assert_eq!(window.month_keys(), vec!["2024-07", "2024-08"]);
        assert!(!window.contains(date("2025-03-05")));
    }
}
