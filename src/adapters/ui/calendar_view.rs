//! Plain-text month grids. Sunday-first, closed days bracketed: `[ 2]`.

use crate::domain::{CalendarWindow, CivilDate, MonthKey};

const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const BLANK_CELL: &str = "    ";

fn day_cell(date: CivilDate, closed: bool) -> String {
    if closed {
        format!("[{:>2}]", date.day())
    } else {
        format!(" {:>2} ", date.day())
    }
}

/// Render one month. `closed` must be ascending (as in a CalendarWindow).
pub fn render_month(month: MonthKey, closed: &[CivilDate]) -> String {
    let mut lines = vec![
        month.to_string(),
        WEEKDAY_HEADER
            .iter()
            .map(|d| format!(" {} ", d))
            .collect::<String>()
            .trim_end()
            .to_string(),
    ];

    let mut row = String::new();
    let mut column = 0;
    for date in month.days() {
        if column == 0 && row.is_empty() {
            let lead = date.weekday().num_days_from_sunday();
            for _ in 0..lead {
                row.push_str(BLANK_CELL);
            }
            column = lead;
        }
        row.push_str(&day_cell(date, closed.binary_search(&date).is_ok()));
        column += 1;
        if column == 7 {
            lines.push(row.trim_end().to_string());
            row.clear();
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

/// Render every month of the window, followed by a legend.
pub fn render_window(window: &CalendarWindow) -> String {
    let mut blocks: Vec<String> = window
        .months()
        .map(|(month, closed)| render_month(month, closed))
        .collect();
    let total: usize = window.months().map(|(_, closed)| closed.len()).sum();
    blocks.push(format!("[dd] = closed ({} days)", total));
    blocks.join("\n\n")
}
