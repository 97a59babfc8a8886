use chrono::{Duration, NaiveDate};

/// One dated numeric observation feeding a trend window.
#[derive(Debug, Clone, Copy)]
pub struct DatedValue {
    pub date_key: NaiveDate,
    pub value: f64,
}

/// One calendar day of a trend window.
///
/// `average` is `None` when the day had no contributing records — a gap in
/// the chart, which is distinct from an average of zero and must stay so.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub label: String,
    pub average: Option<f64>,
}

/// Bucket records by calendar day over a sliding window ending at `end_date`
/// and average each day's values.
///
/// Returns exactly `window_days + 1` points, oldest first, one per day from
/// `end_date - window_days` through `end_date` — every day is present even
/// when empty.
pub fn build_trend(records: &[DatedValue], window_days: u32, end_date: NaiveDate) -> Vec<TrendPoint> {
    let start = end_date - Duration::days(window_days as i64);
    let len = window_days as usize + 1;

    let mut sums = vec![0.0f64; len];
    let mut counts = vec![0u32; len];

    for record in records {
        if record.date_key < start || record.date_key > end_date {
            continue;
        }
        let idx = (record.date_key - start).num_days() as usize;
        sums[idx] += record.value;
        counts[idx] += 1;
    }

    (0..len)
        .map(|idx| {
            let date = start + Duration::days(idx as i64);
            TrendPoint {
                date,
                label: date.format("%b %-d").to_string(),
                average: (counts[idx] > 0).then(|| sums[idx] / counts[idx] as f64),
            }
        })
        .collect()
}

/// Overall average across every record, regardless of day. `None` when there
/// are no records.
pub fn overall_average(records: &[DatedValue]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    Some(records.iter().map(|r| r.value).sum::<f64>() / records.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
    }

    #[test]
    fn window_covers_every_day_inclusive() {
        let trend = build_trend(&[], 6, date(7));
        assert_eq!(trend.len(), 7);
        assert_eq!(trend.first().unwrap().date, date(1));
        assert_eq!(trend.last().unwrap().date, date(7));
        let mut dates: Vec<_> = trend.iter().map(|p| p.date).collect();
        dates.dedup();
        assert_eq!(dates.len(), 7);
    }

    #[test]
    fn empty_days_are_none_not_zero() {
        let records = [DatedValue { date_key: date(5), value: 4.0 }];
        let trend = build_trend(&records, 2, date(6));
        assert_eq!(trend[0].average, None);
        assert_eq!(trend[1].average, Some(4.0));
        assert_eq!(trend[2].average, None);
    }

    #[test]
    fn same_day_records_average() {
        let records = [
            DatedValue { date_key: date(5), value: 4.0 },
            DatedValue { date_key: date(5), value: 1.0 },
        ];
        let trend = build_trend(&records, 0, date(5));
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].average, Some(2.5));
    }

    #[test]
    fn records_outside_the_window_are_ignored() {
        let records = [
            DatedValue { date_key: date(1), value: 5.0 },
            DatedValue { date_key: date(9), value: 5.0 },
            DatedValue { date_key: date(6), value: 3.0 },
        ];
        let trend = build_trend(&records, 2, date(7));
        let contributing: u32 = trend.iter().filter(|p| p.average.is_some()).count() as u32;
        assert_eq!(contributing, 1);
        assert_eq!(trend[1].average, Some(3.0));
    }

    #[test]
    fn labels_are_short_human_dates() {
        let trend = build_trend(&[], 0, date(5));
        assert_eq!(trend[0].label, "Jun 5");
    }

    #[test]
    fn consecutive_mood_values_come_back_in_order() {
        let records = [
            DatedValue { date_key: date(3), value: 4.0 },
            DatedValue { date_key: date(4), value: 1.0 },
            DatedValue { date_key: date(5), value: 2.0 },
        ];
        let trend = build_trend(&records, 2, date(5));
        let averages: Vec<_> = trend.iter().map(|p| p.average).collect();
        assert_eq!(averages, vec![Some(4.0), Some(1.0), Some(2.0)]);
        let overall = overall_average(&records).unwrap();
        assert!((overall - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn overall_average_of_nothing_is_none() {
        assert_eq!(overall_average(&[]), None);
    }
}
