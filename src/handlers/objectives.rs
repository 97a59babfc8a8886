use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::objective::{CreateObjectiveRequest, Objective, ObjectiveQuery};
use crate::AppState;

pub async fn create_objective(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateObjectiveRequest>,
) -> AppResult<Json<Objective>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let objective = sqlx::query_as::<_, Objective>(
        r#"
        INSERT INTO objectives (id, user_id, objective_date, title)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&auth_user.id)
    .bind(date)
    .bind(&body.title)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(objective))
}

pub async fn list_objectives(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ObjectiveQuery>,
) -> AppResult<Json<Vec<Objective>>> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let objectives = sqlx::query_as::<_, Objective>(
        r#"
        SELECT * FROM objectives
        WHERE user_id = $1 AND objective_date = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(&auth_user.id)
    .bind(date)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(objectives))
}

pub async fn toggle_objective(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(objective_id): Path<Uuid>,
) -> AppResult<Json<Objective>> {
    let objective = sqlx::query_as::<_, Objective>(
        r#"
        UPDATE objectives SET completed = NOT completed, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(objective_id)
    .bind(&auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Objective not found".into()))?;

    Ok(Json(objective))
}

pub async fn delete_objective(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(objective_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM objectives WHERE id = $1 AND user_id = $2")
        .bind(objective_id)
        .bind(&auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Objective not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}
