use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

/// Count consecutive days with at least one entry, scanning backward from
/// `as_of`.
///
/// A missing `as_of` day does not zero the streak — the user may simply not
/// have journaled yet today — so the scan restarts at `as_of - 1` and breaks
/// at the first true gap. `lookback` bounds how far back the scan may reach
/// (in days from `as_of`); `None` scans until the first gap.
pub fn current_streak(days: &HashSet<NaiveDate>, as_of: NaiveDate, lookback: Option<u32>) -> u32 {
    let floor = lookback.map(|cap| as_of - Duration::days(cap as i64));

    let mut cursor = as_of;
    if !days.contains(&cursor) {
        cursor -= Duration::days(1);
    }

    let mut streak = 0u32;
    while days.contains(&cursor) {
        if let Some(floor) = floor {
            if cursor < floor {
                break;
            }
        }
        streak += 1;
        cursor -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn days(ds: &[u32]) -> HashSet<NaiveDate> {
        ds.iter().map(|d| date(*d)).collect()
    }

    #[test]
    fn counts_through_today() {
        assert_eq!(current_streak(&days(&[20, 19, 18]), date(20), None), 3);
    }

    #[test]
    fn missed_today_does_not_zero() {
        assert_eq!(current_streak(&days(&[19, 18]), date(20), None), 2);
    }

    #[test]
    fn real_gap_breaks_the_chain() {
        assert_eq!(current_streak(&days(&[18]), date(20), None), 0);
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(current_streak(&HashSet::new(), date(20), None), 0);
    }

    #[test]
    fn gap_in_the_middle_stops_the_scan() {
        assert_eq!(current_streak(&days(&[20, 19, 17, 16]), date(20), None), 2);
    }

    #[test]
    fn lookback_caps_the_scan() {
        let set = days(&[20, 19, 18, 17, 16, 15, 14, 13]);
        assert_eq!(current_streak(&set, date(20), Some(3)), 4);
        assert_eq!(current_streak(&set, date(20), None), 8);
    }
}
