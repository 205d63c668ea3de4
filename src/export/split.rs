// src/export/split.rs

use crate::models::TimeEntry;
use crate::utils::fields::coerce_hours;
use chrono::{Datelike, NaiveDate, Weekday};

/// Regular hours in a weekday shift before overtime starts.
pub const DAILY_REGULAR_HOURS: f64 = 8.0;

/// Split a total into (regular, overtime).
///
/// Weekend work is all overtime; on weekdays the first
/// [`DAILY_REGULAR_HOURS`] are regular and the rest is overtime.
pub fn derive_split(date: NaiveDate, total_hours: f64) -> (f64, f64) {
    let total = coerce_hours(total_hours);

    if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        return (0.0, total);
    }

    if total <= DAILY_REGULAR_HOURS {
        (total, 0.0)
    } else {
        (DAILY_REGULAR_HOURS, total - DAILY_REGULAR_HOURS)
    }
}

/// RT/OT used for export. The derived split only applies when `enabled`,
/// both explicit values are exactly zero and a total is present.
pub fn effective_hours(entry: &TimeEntry, enabled: bool) -> (f64, f64) {
    let rt = coerce_hours(entry.rt_hours);
    let ot = coerce_hours(entry.ot_hours);

    match entry.total_hours {
        Some(total) if enabled && rt == 0.0 && ot == 0.0 => derive_split(entry.date, total),
        _ => (rt, ot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_is_all_overtime() {
        // 2025-09-20 is a Saturday, 2025-09-21 a Sunday
        assert_eq!(derive_split(ymd(2025, 9, 20), 10.0), (0.0, 10.0));
        assert_eq!(derive_split(ymd(2025, 9, 21), 4.0), (0.0, 4.0));
    }

    #[test]
    fn weekday_caps_regular_at_eight() {
        // 2025-09-16 is a Tuesday
        assert_eq!(derive_split(ymd(2025, 9, 16), 10.0), (8.0, 2.0));
        assert_eq!(derive_split(ymd(2025, 9, 16), 6.0), (6.0, 0.0));
        assert_eq!(derive_split(ymd(2025, 9, 16), 8.0), (8.0, 0.0));
        assert_eq!(derive_split(ymd(2025, 9, 16), -1.0), (0.0, 0.0));
    }

    #[test]
    fn explicit_split_is_never_overridden() {
        let mut e = TimeEntry::new(ymd(2025, 9, 20));
        e.rt_hours = 5.0;
        e.total_hours = Some(12.0);
        assert_eq!(effective_hours(&e, true), (5.0, 0.0));

        e.rt_hours = 0.0;
        assert_eq!(effective_hours(&e, true), (0.0, 12.0));
        assert_eq!(effective_hours(&e, false), (0.0, 0.0));

        e.total_hours = None;
        assert_eq!(effective_hours(&e, true), (0.0, 0.0));
    }
}
