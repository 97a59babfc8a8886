use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use sqlx::types::Json as SqlJson;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::habits::{load_custom_pool, load_master_list};
use crate::models::snapshot::{DayHabit, HabitDayResponse, ToggleHabitRequest};
use crate::rollforward;
use crate::AppState;

async fn load_snapshot(
    state: &AppState,
    user_id: &str,
    day: NaiveDate,
) -> AppResult<Option<Vec<DayHabit>>> {
    let habits = sqlx::query_scalar::<_, SqlJson<Vec<DayHabit>>>(
        "SELECT habits FROM habit_days WHERE user_id = $1 AND day = $2",
    )
    .bind(user_id)
    .bind(day)
    .fetch_optional(&state.db)
    .await?;

    Ok(habits.map(|h| h.0))
}

async fn save_snapshot(
    state: &AppState,
    user_id: &str,
    day: NaiveDate,
    habits: &[DayHabit],
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO habit_days (user_id, day, habits)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, day) DO UPDATE SET habits = $3, updated_at = NOW()
        "#,
    )
    .bind(user_id)
    .bind(day)
    .bind(SqlJson(habits))
    .execute(&state.db)
    .await?;

    Ok(())
}

/// Load the snapshot for one day, applying the roll-forward rules.
pub async fn get_day(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(day): Path<NaiveDate>,
) -> AppResult<Json<HabitDayResponse>> {
    let today = Utc::now().date_naive();
    let existing = load_snapshot(&state, &auth_user.id, day).await?;

    let habits = match existing {
        None => {
            // First visit materializes the current master list — even for a
            // past day, which is then frozen with today's list.
            let master = load_master_list(&state, &auth_user.id).await?;
            let pool = load_custom_pool(&state, &auth_user.id).await?;
            let resolved = rollforward::resolve_master(&master, &pool);
            save_snapshot(&state, &auth_user.id, day, &resolved).await?;
            resolved
        }
        Some(stored) if day < today => {
            // Frozen history: returned verbatim, never re-derived.
            stored
        }
        Some(stored) => {
            let master = load_master_list(&state, &auth_user.id).await?;
            let pool = load_custom_pool(&state, &auth_user.id).await?;
            let resolved = rollforward::resolve_master(&master, &pool);
            match rollforward::merge_master(&stored, &resolved) {
                Some(merged) => {
                    save_snapshot(&state, &auth_user.id, day, &merged).await?;
                    merged
                }
                None => stored,
            }
        }
    };

    Ok(Json(HabitDayResponse { day, habits }))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(day): Path<NaiveDate>,
    Json(body): Json<ToggleHabitRequest>,
) -> AppResult<Json<HabitDayResponse>> {
    let habits = load_snapshot(&state, &auth_user.id, day)
        .await?
        .ok_or(AppError::NotFound("No habit snapshot for that day".into()))?;

    let toggled = rollforward::toggle_completion(&habits, &body.habit_id)
        .ok_or(AppError::NotFound("Habit not present on that day".into()))?;

    save_snapshot(&state, &auth_user.id, day, &toggled).await?;

    Ok(Json(HabitDayResponse {
        day,
        habits: toggled,
    }))
}

/// Drop one habit from one day only — the master list and every other day
/// are unaffected.
pub async fn remove_habit_for_day(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((day, habit_id)): Path<(NaiveDate, String)>,
) -> AppResult<Json<HabitDayResponse>> {
    let habits = load_snapshot(&state, &auth_user.id, day)
        .await?
        .ok_or(AppError::NotFound("No habit snapshot for that day".into()))?;

    let remaining = rollforward::remove_for_day(&habits, &habit_id)
        .ok_or(AppError::NotFound("Habit not present on that day".into()))?;

    save_snapshot(&state, &auth_user.id, day, &remaining).await?;

    Ok(Json(HabitDayResponse {
        day,
        habits: remaining,
    }))
}
