use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::error::FoodgramError;
use crate::handlers::extract::QueryParams;
use crate::handlers::response::{IngredientResponse, TagResponse};
use crate::state::AppState;
use crate::usecase::catalog::{
    GetIngredientUseCase, GetTagUseCase, ListTagsUseCase, SearchIngredientsUseCase,
};

// ── GET /api/tags/ ───────────────────────────────────────────────────────────

pub async fn list_tags(
    State(state): State<AppState>,
) -> Result<Json<Vec<TagResponse>>, FoodgramError> {
    let uc = ListTagsUseCase {
        tags: state.tag_repo(),
    };
    let tags = uc.execute().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

// ── GET /api/tags/{id}/ ──────────────────────────────────────────────────────

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TagResponse>, FoodgramError> {
    let uc = GetTagUseCase {
        tags: state.tag_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── GET /api/ingredients/?name= ──────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct IngredientQuery {
    pub name: Option<String>,
}

pub async fn list_ingredients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<IngredientQuery>,
) -> Result<Json<Vec<IngredientResponse>>, FoodgramError> {
    let uc = SearchIngredientsUseCase {
        ingredients: state.ingredient_repo(),
    };
    let found = uc.execute(query.name.as_deref()).await?;
    Ok(Json(found.into_iter().map(IngredientResponse::from).collect()))
}

// ── GET /api/ingredients/{id}/ ───────────────────────────────────────────────

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<IngredientResponse>, FoodgramError> {
    let uc = GetIngredientUseCase {
        ingredients: state.ingredient_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}
