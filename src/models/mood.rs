use serde::Serialize;

/// Display + scoring metadata for one mood tag.
///
/// `value` is the fixed 0–5 integer used when averaging moods into a trend.
#[derive(Debug, Clone, Serialize)]
pub struct MoodMeta {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    pub value: u8,
}

/// The fixed mood catalog, shared by every consumer. The mobile client used
/// to re-declare this table per screen with drifting fields; it is defined
/// exactly once here.
pub const MOODS: &[MoodMeta] = &[
    MoodMeta { key: "veryHappy", label: "Very Happy", color: "#fbbf24", icon: "sun", value: 5 },
    MoodMeta { key: "happy", label: "Happy", color: "#34d399", icon: "smile", value: 4 },
    MoodMeta { key: "hopeful", label: "Hopeful", color: "#38bdf8", icon: "sunrise", value: 3 },
    MoodMeta { key: "content", label: "Content", color: "#a3e635", icon: "coffee", value: 3 },
    MoodMeta { key: "neutral", label: "Neutral", color: "#9ca3af", icon: "minus", value: 2 },
    MoodMeta { key: "tired", label: "Tired", color: "#a78bfa", icon: "moon", value: 2 },
    MoodMeta { key: "anxious", label: "Anxious", color: "#f97316", icon: "zap", value: 1 },
    MoodMeta { key: "sad", label: "Sad", color: "#60a5fa", icon: "cloud-rain", value: 1 },
    MoodMeta { key: "overwhelmed", label: "Overwhelmed", color: "#f43f5e", icon: "waves", value: 1 },
    MoodMeta { key: "angry", label: "Angry", color: "#ef4444", icon: "flame", value: 1 },
    MoodMeta { key: "verySad", label: "Very Sad", color: "#818cf8", icon: "cloud", value: 0 },
];

/// Display fallback for mood keys the catalog does not know. Unknown keys
/// never fail a request; they render neutrally and are excluded from value
/// averages (no entry in the 0–5 table).
pub const UNKNOWN_MOOD: MoodMeta = MoodMeta {
    key: "unknown",
    label: "Unknown",
    color: "#9ca3af",
    icon: "help-circle",
    value: 2,
};

pub fn lookup(key: &str) -> Option<&'static MoodMeta> {
    MOODS.iter().find(|m| m.key == key)
}

/// Lookup with the neutral fallback, for display paths.
pub fn lookup_or_unknown(key: &str) -> &'static MoodMeta {
    lookup(key).unwrap_or(&UNKNOWN_MOOD)
}

/// Mood value for averaging, if the key is known.
pub fn mood_value(key: &str) -> Option<f64> {
    lookup(key).map(|m| m.value as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_eleven_moods_with_unique_keys() {
        assert_eq!(MOODS.len(), 11);
        let mut keys: Vec<_> = MOODS.iter().map(|m| m.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 11);
    }

    #[test]
    fn values_stay_on_the_zero_to_five_scale() {
        assert!(MOODS.iter().all(|m| m.value <= 5));
    }

    #[test]
    fn known_keys_resolve() {
        assert_eq!(mood_value("happy"), Some(4.0));
        assert_eq!(mood_value("sad"), Some(1.0));
        assert_eq!(mood_value("neutral"), Some(2.0));
    }

    #[test]
    fn unknown_key_degrades_instead_of_failing() {
        assert_eq!(mood_value("ecstatic"), None);
        assert_eq!(lookup_or_unknown("ecstatic").label, "Unknown");
    }
}
