use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sqlx::types::Json as SqlJson;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::habit::{
    builtin_by_id, builtin_catalog, slugify, CreateCustomHabitRequest, HabitCatalogResponse,
    HabitDefinition, MasterListMutation, MasterListResponse,
};
use crate::AppState;

pub async fn load_custom_pool(state: &AppState, user_id: &str) -> AppResult<Vec<HabitDefinition>> {
    let pool = sqlx::query_scalar::<_, SqlJson<Vec<HabitDefinition>>>(
        "SELECT habits FROM custom_habit_pools WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(pool.map(|p| p.0).unwrap_or_default())
}

pub async fn load_master_list(state: &AppState, user_id: &str) -> AppResult<Vec<String>> {
    let ids = sqlx::query_scalar::<_, Vec<String>>(
        "SELECT habit_ids FROM master_habit_lists WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    Ok(ids.unwrap_or_default())
}

pub async fn get_catalog(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<HabitCatalogResponse>> {
    let custom = load_custom_pool(&state, &auth_user.id).await?;
    Ok(Json(HabitCatalogResponse {
        builtin: builtin_catalog(),
        custom,
    }))
}

pub async fn create_custom_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateCustomHabitRequest>,
) -> AppResult<Json<HabitDefinition>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let id = slugify(&body.name);
    if id.is_empty() {
        return Err(AppError::Validation(
            "Habit name must contain letters or digits".into(),
        ));
    }
    if builtin_by_id(&id).is_some() {
        return Err(AppError::Conflict(format!(
            "'{}' clashes with a built-in habit",
            body.name
        )));
    }

    let mut pool = load_custom_pool(&state, &auth_user.id).await?;
    if pool.iter().any(|h| h.id == id) {
        return Err(AppError::Conflict(format!(
            "A habit named '{}' already exists",
            body.name
        )));
    }

    let habit = HabitDefinition {
        id,
        name: body.name,
        icon: body.icon.unwrap_or_else(|| "star".into()),
        is_custom: true,
    };
    pool.push(habit.clone());

    sqlx::query(
        r#"
        INSERT INTO custom_habit_pools (user_id, habits)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET habits = $2, updated_at = NOW()
        "#,
    )
    .bind(&auth_user.id)
    .bind(SqlJson(&pool))
    .execute(&state.db)
    .await?;

    Ok(Json(habit))
}

pub async fn get_master_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MasterListResponse>> {
    let habit_ids = load_master_list(&state, &auth_user.id).await?;
    Ok(Json(MasterListResponse { habit_ids }))
}

pub async fn add_to_master_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<MasterListMutation>,
) -> AppResult<Json<MasterListResponse>> {
    let known = builtin_by_id(&body.habit_id).is_some()
        || load_custom_pool(&state, &auth_user.id)
            .await?
            .iter()
            .any(|h| h.id == body.habit_id);
    if !known {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    let mut habit_ids = load_master_list(&state, &auth_user.id).await?;
    if !habit_ids.contains(&body.habit_id) {
        habit_ids.push(body.habit_id);
        sqlx::query(
            r#"
            INSERT INTO master_habit_lists (user_id, habit_ids)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET habit_ids = $2, updated_at = NOW()
            "#,
        )
        .bind(&auth_user.id)
        .bind(&habit_ids)
        .execute(&state.db)
        .await?;
    }

    Ok(Json(MasterListResponse { habit_ids }))
}

/// Remove a habit from the standing list. Past-day snapshots are untouched;
/// the habit simply stops rolling forward onto new days.
pub async fn remove_from_master_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<String>,
) -> AppResult<Json<MasterListResponse>> {
    let mut habit_ids = load_master_list(&state, &auth_user.id).await?;
    let before = habit_ids.len();
    habit_ids.retain(|id| id != &habit_id);

    if habit_ids.len() == before {
        return Err(AppError::NotFound("Habit not in master list".into()));
    }

    sqlx::query(
        r#"
        UPDATE master_habit_lists SET habit_ids = $2, updated_at = NOW()
        WHERE user_id = $1
        "#,
    )
    .bind(&auth_user.id)
    .bind(&habit_ids)
    .execute(&state.db)
    .await?;

    Ok(Json(MasterListResponse { habit_ids }))
}
