use chrono::{DateTime, NaiveDate, Utc};

/// Resolve the calendar day a record buckets into.
///
/// Resolution order: the server creation timestamp wins when present; else
/// the logical `date` field carried inside the decrypted payload (a full
/// ISO-8601 timestamp or a bare `YYYY-MM-DD`). A record that resolves to
/// neither is dropped from every date-bucketed view, though it still counts
/// toward plain totals.
pub fn entry_date_key(
    created_at: Option<DateTime<Utc>>,
    logical: Option<&str>,
) -> Option<NaiveDate> {
    if let Some(ts) = created_at {
        return Some(ts.date_naive());
    }
    let raw = logical?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn server_timestamp_wins() {
        let created = Utc.with_ymd_and_hms(2026, 6, 5, 23, 10, 0).unwrap();
        let key = entry_date_key(Some(created), Some("2026-01-01T00:00:00Z"));
        assert_eq!(key, Some(NaiveDate::from_ymd_opt(2026, 6, 5).unwrap()));
    }

    #[test]
    fn falls_back_to_logical_timestamp() {
        let key = entry_date_key(None, Some("2026-06-05T08:30:00+02:00"));
        assert_eq!(key, Some(NaiveDate::from_ymd_opt(2026, 6, 5).unwrap()));
    }

    #[test]
    fn accepts_bare_date() {
        let key = entry_date_key(None, Some("2026-06-05"));
        assert_eq!(key, Some(NaiveDate::from_ymd_opt(2026, 6, 5).unwrap()));
    }

    #[test]
    fn unresolvable_record_is_dropped() {
        assert_eq!(entry_date_key(None, None), None);
        assert_eq!(entry_date_key(None, Some("")), None);
        assert_eq!(entry_date_key(None, Some("last tuesday")), None);
    }
}
