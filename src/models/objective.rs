use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Objective {
    pub id: Uuid,
    pub user_id: String,
    pub objective_date: NaiveDate,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateObjectiveRequest {
    #[validate(length(min = 1, max = 200, message = "Objective title must be 1-200 characters"))]
    pub title: String,
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectiveQuery {
    pub date: Option<NaiveDate>,
}
