use axum::{extract::State, Json};

use crate::services::quotes::{self, Quote};
use crate::AppState;

pub async fn get_quote(State(state): State<AppState>) -> Json<Quote> {
    Json(quotes::quote_of_the_day(&state.config).await)
}
