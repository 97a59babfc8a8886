use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// The logical journal record. This is what gets sealed into the stored
/// payload blob — the database only ever sees its encrypted form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub text: String,
    /// One of the fixed mood keys. Unknown values are tolerated on read and
    /// rendered as "unknown" rather than rejected.
    pub mood: String,
    /// User-intended entry date (ISO-8601). May differ from the storage
    /// creation time, e.g. backdated entries.
    pub date: String,
    #[serde(default)]
    pub images: Vec<EntryImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryImage {
    pub uri: String,
}

/// A row of `journal_entries`: opaque payload plus the unencrypted partition
/// key and server timestamp.
#[derive(Debug, Clone, FromRow)]
pub struct StoredEntry {
    pub id: Uuid,
    pub user_id: String,
    pub payload: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    #[validate(length(max = 20000, message = "Entry text too long"))]
    pub text: String,
    #[validate(length(min = 1, max = 64, message = "Mood key required"))]
    pub mood: String,
    /// Defaults to now when absent.
    pub date: Option<String>,
    #[serde(default)]
    pub images: Vec<EntryImage>,
}

/// Edits overwrite the full logical record — there is no versioning.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntryRequest {
    #[validate(length(max = 20000, message = "Entry text too long"))]
    pub text: String,
    #[validate(length(min = 1, max = 64, message = "Mood key required"))]
    pub mood: String,
    pub date: Option<String>,
    #[serde(default)]
    pub images: Vec<EntryImage>,
}

#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A decrypted entry as returned to clients, with its resolved calendar day.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: Uuid,
    pub text: String,
    pub mood: String,
    pub mood_label: String,
    pub mood_color: String,
    pub date: String,
    /// Calendar day the entry buckets into, when resolvable.
    pub date_key: Option<NaiveDate>,
    pub images: Vec<EntryImage>,
    pub created_at: Option<DateTime<Utc>>,
}
