use std::collections::{BTreeMap, HashSet};

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    build_trend, current_streak, overall_average, DatedValue, Polarity, TrendPoint,
};
use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::handlers::entries::{fetch_decoded, DecodedEntry};
use crate::models::mood;
use crate::models::snapshot::{DayHabit, HabitDayRow};
use crate::rollforward::completion_ratio;
use crate::AppState;

const DEFAULT_TREND_WINDOW: u32 = 30;
const MAX_TREND_WINDOW: u32 = 365;

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<u32>,
}

impl TrendQuery {
    fn window(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_TREND_WINDOW).min(MAX_TREND_WINDOW)
    }
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub current_streak: u32,
    pub lookback_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MoodCount {
    pub mood: String,
    pub label: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SentimentBreakdown {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub positive_pct: f64,
    pub neutral_pct: f64,
    pub negative_pct: f64,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_entries: usize,
    pub current_streak: u32,
    pub average_mood: Option<f64>,
    pub sentiment: SentimentBreakdown,
}

fn entry_day_set(entries: &[DecodedEntry]) -> HashSet<NaiveDate> {
    entries.iter().filter_map(|e| e.date_key).collect()
}

fn mood_records(entries: &[DecodedEntry]) -> Vec<DatedValue> {
    // Unknown mood keys carry no value on the 0-5 scale and stay out of the
    // average rather than dragging it toward a made-up number.
    entries
        .iter()
        .filter_map(|e| {
            let date_key = e.date_key?;
            let value = mood::mood_value(&e.entry.mood)?;
            Some(DatedValue { date_key, value })
        })
        .collect()
}

fn sentiment_records(state: &AppState, entries: &[DecodedEntry]) -> Vec<DatedValue> {
    entries
        .iter()
        .filter_map(|e| {
            let date_key = e.date_key?;
            Some(DatedValue {
                date_key,
                value: state.sentiment.score(&e.entry.text),
            })
        })
        .collect()
}

fn sentiment_breakdown(state: &AppState, entries: &[DecodedEntry]) -> SentimentBreakdown {
    let mut positive = 0usize;
    let mut neutral = 0usize;
    let mut negative = 0usize;
    for e in entries {
        match state.sentiment.classify(&e.entry.text) {
            Polarity::Positive => positive += 1,
            Polarity::Neutral => neutral += 1,
            Polarity::Negative => negative += 1,
        }
    }
    let total = entries.len().max(1) as f64;
    SentimentBreakdown {
        positive,
        neutral,
        negative,
        positive_pct: positive as f64 / total * 100.0,
        neutral_pct: neutral as f64 / total * 100.0,
        negative_pct: negative as f64 / total * 100.0,
    }
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<StreakResponse>> {
    let entries = fetch_decoded(&state, &auth_user.id).await?;
    let today = Utc::now().date_naive();
    let streak = current_streak(
        &entry_day_set(&entries),
        today,
        state.config.streak_lookback_days,
    );

    Ok(Json(StreakResponse {
        current_streak: streak,
        lookback_days: state.config.streak_lookback_days,
    }))
}

pub async fn mood_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let entries = fetch_decoded(&state, &auth_user.id).await?;
    let trend = build_trend(
        &mood_records(&entries),
        query.window(),
        Utc::now().date_naive(),
    );
    Ok(Json(trend))
}

pub async fn sentiment_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let entries = fetch_decoded(&state, &auth_user.id).await?;
    let trend = build_trend(
        &sentiment_records(&state, &entries),
        query.window(),
        Utc::now().date_naive(),
    );
    Ok(Json(trend))
}

/// Completion-ratio trend over the per-day habit snapshots.
pub async fn habit_trend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<TrendQuery>,
) -> AppResult<Json<Vec<TrendPoint>>> {
    let window = query.window();
    let end = Utc::now().date_naive();
    let start = end - chrono::Duration::days(window as i64);

    let rows = sqlx::query_as::<_, HabitDayRow>(
        r#"
        SELECT * FROM habit_days
        WHERE user_id = $1 AND day BETWEEN $2 AND $3
        "#,
    )
    .bind(&auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    let records: Vec<DatedValue> = rows
        .iter()
        .filter_map(|row| {
            let habits: &Vec<DayHabit> = &row.habits.0;
            completion_ratio(habits).map(|value| DatedValue {
                date_key: row.day,
                value,
            })
        })
        .collect();

    Ok(Json(build_trend(&records, window, end)))
}

pub async fn mood_distribution(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MoodCount>>> {
    let entries = fetch_decoded(&state, &auth_user.id).await?;

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for e in &entries {
        let meta = mood::lookup_or_unknown(&e.entry.mood);
        *counts.entry(meta.key).or_default() += 1;
    }

    let distribution = counts
        .into_iter()
        .map(|(key, count)| {
            let meta = mood::lookup_or_unknown(key);
            MoodCount {
                mood: meta.key.to_string(),
                label: meta.label.to_string(),
                color: meta.color.to_string(),
                count,
            }
        })
        .collect();

    Ok(Json(distribution))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<SummaryResponse>> {
    let entries = fetch_decoded(&state, &auth_user.id).await?;
    let today = Utc::now().date_naive();

    Ok(Json(SummaryResponse {
        // Entries without a resolvable day still count here.
        total_entries: entries.len(),
        current_streak: current_streak(
            &entry_day_set(&entries),
            today,
            state.config.streak_lookback_days,
        ),
        average_mood: overall_average(&mood_records(&entries)),
        sentiment: sentiment_breakdown(&state, &entries),
    }))
}
