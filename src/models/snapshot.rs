use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::habit::HabitDefinition;

/// One habit entry inside a day's snapshot: the resolved definition as it
/// looked when the snapshot was first materialized, plus completion state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayHabit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub is_custom: bool,
    pub completed: bool,
}

impl DayHabit {
    pub fn from_definition(def: &HabitDefinition) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            icon: def.icon.clone(),
            is_custom: def.is_custom,
            completed: false,
        }
    }
}

/// A row of `habit_days`. Once a snapshot exists for a past day it is frozen:
/// only explicit per-day toggles and removals may change it.
#[derive(Debug, Clone, FromRow)]
pub struct HabitDayRow {
    pub user_id: String,
    pub day: NaiveDate,
    pub habits: sqlx::types::Json<Vec<DayHabit>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HabitDayResponse {
    pub day: NaiveDate,
    pub habits: Vec<DayHabit>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleHabitRequest {
    pub habit_id: String,
}
