use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::analytics::entry_date_key;
use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::entry::{
    CreateEntryRequest, EntryQuery, EntryResponse, JournalEntry, StoredEntry, UpdateEntryRequest,
};
use crate::models::mood;
use crate::AppState;

/// A stored entry after decryption, with its resolved calendar day. Records
/// that fail to decrypt never become one of these.
#[derive(Debug, Clone)]
pub struct DecodedEntry {
    pub id: Uuid,
    pub entry: JournalEntry,
    pub date_key: Option<NaiveDate>,
    pub created_at: Option<chrono::DateTime<Utc>>,
}

/// Decrypt one stored row. Unreadable payloads are logged and dropped —
/// never surfaced as an error.
pub fn decode_entry(state: &AppState, row: &StoredEntry) -> Option<DecodedEntry> {
    let entry: JournalEntry = match state.cipher.open(&row.payload) {
        Some(entry) => entry,
        None => {
            tracing::warn!(entry_id = %row.id, "unreadable journal payload, skipping");
            return None;
        }
    };
    let date_key = entry_date_key(row.created_at, Some(&entry.date));
    Some(DecodedEntry {
        id: row.id,
        entry,
        date_key,
        created_at: row.created_at,
    })
}

/// Fetch and decrypt every entry for a user, newest first.
pub async fn fetch_decoded(state: &AppState, user_id: &str) -> AppResult<Vec<DecodedEntry>> {
    let rows = sqlx::query_as::<_, StoredEntry>(
        r#"
        SELECT * FROM journal_entries
        WHERE user_id = $1
        ORDER BY created_at DESC NULLS LAST
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(rows.iter().filter_map(|r| decode_entry(state, r)).collect())
}

fn to_response(decoded: DecodedEntry) -> EntryResponse {
    let meta = mood::lookup_or_unknown(&decoded.entry.mood);
    EntryResponse {
        id: decoded.id,
        text: decoded.entry.text,
        mood: decoded.entry.mood,
        mood_label: meta.label.to_string(),
        mood_color: meta.color.to_string(),
        date: decoded.entry.date,
        date_key: decoded.date_key,
        images: decoded.entry.images,
        created_at: decoded.created_at,
    }
}

fn broadcast_change(state: &AppState, user_id: &str, entry_id: Uuid) {
    if let Some(tx) = state.ws_tx.as_ref() {
        let msg = serde_json::json!({
            "type": "entry_changed",
            "user_id": user_id,
            "entry_id": entry_id,
        });
        let _ = tx.send(msg.to_string());
    }
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<Json<EntryResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if mood::lookup(&body.mood).is_none() {
        tracing::warn!(mood = %body.mood, "unknown mood key on create, storing as-is");
    }

    let entry = JournalEntry {
        text: body.text,
        mood: body.mood,
        date: body
            .date
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        images: body.images,
    };

    let payload = state.cipher.seal(&entry)?;

    let row = sqlx::query_as::<_, StoredEntry>(
        r#"
        INSERT INTO journal_entries (id, user_id, payload)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&auth_user.id)
    .bind(&payload)
    .fetch_one(&state.db)
    .await?;

    broadcast_change(&state, &auth_user.id, row.id);

    Ok(Json(to_response(DecodedEntry {
        id: row.id,
        date_key: entry_date_key(row.created_at, Some(&entry.date)),
        entry,
        created_at: row.created_at,
    })))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EntryQuery>,
) -> AppResult<Json<Vec<EntryResponse>>> {
    let decoded = fetch_decoded(&state, &auth_user.id).await?;

    // Range filtering happens after decryption: the calendar day may come
    // from inside the payload, not from the stored timestamp.
    let filtered = decoded.into_iter().filter(|d| match d.date_key {
        Some(key) => {
            query.start_date.map_or(true, |s| key >= s) && query.end_date.map_or(true, |e| key <= e)
        }
        None => query.start_date.is_none() && query.end_date.is_none(),
    });

    Ok(Json(filtered.map(to_response).collect()))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryRequest>,
) -> AppResult<Json<EntryResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let existing = sqlx::query_as::<_, StoredEntry>(
        "SELECT * FROM journal_entries WHERE id = $1 AND user_id = $2",
    )
    .bind(entry_id)
    .bind(&auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Entry not found".into()))?;

    // Edits overwrite the whole logical record; there is no versioning. The
    // user-intended date is kept from the stored record unless re-supplied.
    let prior: Option<JournalEntry> = state.cipher.open(&existing.payload);
    let date = body
        .date
        .or_else(|| prior.map(|p| p.date))
        .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

    let entry = JournalEntry {
        text: body.text,
        mood: body.mood,
        date,
        images: body.images,
    };
    let payload = state.cipher.seal(&entry)?;

    let row = sqlx::query_as::<_, StoredEntry>(
        r#"
        UPDATE journal_entries SET payload = $3
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(entry_id)
    .bind(&auth_user.id)
    .bind(&payload)
    .fetch_one(&state.db)
    .await?;

    broadcast_change(&state, &auth_user.id, entry_id);

    Ok(Json(to_response(DecodedEntry {
        id: row.id,
        date_key: entry_date_key(row.created_at, Some(&entry.date)),
        entry,
        created_at: row.created_at,
    })))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(entry_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM journal_entries WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(&auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Entry not found".into()));
    }

    broadcast_change(&state, &auth_user.id, entry_id);

    Ok(Json(serde_json::json!({ "deleted": true })))
}
