use axum::{extract::State, http::StatusCode};

use foodgram_core::health::check_database;

use crate::state::AppState;

/// `GET /readyz`: 200 once the database answers.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    check_database(&state.db).await
}
