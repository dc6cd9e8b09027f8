use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Serialize;

use crate::error::FoodgramError;
use crate::state::AppState;
use crate::usecase::short_link::{GetShortLinkUseCase, ResolveShortLinkUseCase};

// ── GET /api/recipes/{id}/get-link/ ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, FoodgramError> {
    let uc = GetShortLinkUseCase::new(state.recipe_repo());
    let code = uc.execute(id).await?;
    Ok(Json(ShortLinkResponse {
        short_link: state.absolute(&format!("/s/{code}/")),
    }))
}

// ── GET /s/{code}/ ───────────────────────────────────────────────────────────

/// 302 to the recipe's front-end page.
pub async fn resolve(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, FoodgramError> {
    let uc = ResolveShortLinkUseCase {
        recipes: state.recipe_repo(),
    };
    let recipe_id = uc.execute(&code).await?;
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, format!("/recipes/{recipe_id}/"))],
    ))
}
