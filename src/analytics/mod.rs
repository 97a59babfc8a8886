//! The shared aggregation layer.
//!
//! Every stats surface (streaks, trends, distributions, insights) computes
//! its numbers through this module — the logic is defined once, not per
//! endpoint.

pub mod normalize;
pub mod sentiment;
pub mod streak;
pub mod trend;

pub use normalize::entry_date_key;
pub use sentiment::{Polarity, SentimentScorer};
pub use streak::current_streak;
pub use trend::{build_trend, overall_average, DatedValue, TrendPoint};

#[cfg(test)]
mod pipeline_tests {
    //! The full read path in miniature: seal entries, open them back,
    //! resolve date keys, aggregate. What the stats endpoints do, minus
    //! the database.

    use chrono::NaiveDate;

    use super::*;
    use crate::crypto::EntryCipher;
    use crate::models::entry::JournalEntry;
    use crate::models::mood;

    fn entry(text: &str, mood: &str, date: &str) -> JournalEntry {
        JournalEntry {
            text: text.into(),
            mood: mood.into(),
            date: date.into(),
            images: vec![],
        }
    }

    #[test]
    fn three_days_of_moods_become_a_three_point_trend() {
        let cipher = EntryCipher::new("pipeline-test-key");
        let entries = [
            entry("a good day", "happy", "2026-06-03T10:00:00Z"),
            entry("a rough day", "sad", "2026-06-04T10:00:00Z"),
            entry("an ordinary day", "neutral", "2026-06-05T10:00:00Z"),
        ];

        // Seal then reopen, as if round-tripping through the store. No
        // server timestamp, so the logical date inside the payload decides
        // the bucket.
        let records: Vec<DatedValue> = entries
            .iter()
            .map(|e| cipher.seal(e).unwrap())
            .map(|sealed| cipher.open::<JournalEntry>(&sealed).unwrap())
            .filter_map(|e| {
                Some(DatedValue {
                    date_key: entry_date_key(None, Some(&e.date))?,
                    value: mood::mood_value(&e.mood)?,
                })
            })
            .collect();

        let end = NaiveDate::from_ymd_opt(2026, 6, 5).unwrap();
        let trend = build_trend(&records, 2, end);

        let averages: Vec<_> = trend.iter().map(|p| p.average).collect();
        assert_eq!(averages, vec![Some(4.0), Some(1.0), Some(2.0)]);

        let overall = overall_average(&records).unwrap();
        assert!((overall - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn unreadable_records_drop_out_of_aggregates() {
        let cipher = EntryCipher::new("pipeline-test-key");
        let wrong_key = EntryCipher::new("some-other-key");

        let readable = cipher.seal(&entry("fine", "content", "2026-06-05")).unwrap();
        let foreign = wrong_key.seal(&entry("lost", "happy", "2026-06-05")).unwrap();

        let opened: Vec<JournalEntry> = [readable, foreign, "garbage".to_string()]
            .iter()
            .filter_map(|sealed| cipher.open(sealed))
            .collect();

        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].mood, "content");
    }
}
