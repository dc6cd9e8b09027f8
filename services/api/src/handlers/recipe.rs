use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;

use foodgram_auth_types::identity::{Identity, MaybeIdentity};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::domain::draft::{DraftIngredient, RecipeDraft};
use crate::domain::shopping_list::SHOPPING_LIST_FILENAME;
use crate::domain::types::{RecipeFilter, RecipeMark};
use crate::error::FoodgramError;
use crate::handlers::extract::{self, JsonBody, QueryParams};
use crate::handlers::pagination::envelope;
use crate::handlers::response::{RecipeResponse, RecipeShortResponse};
use crate::state::AppState;
use crate::usecase::mark::{AddRecipeMarkUseCase, RemoveRecipeMarkUseCase};
use crate::usecase::recipe::{
    CreateRecipeUseCase, DeleteRecipeUseCase, GetRecipeUseCase, ListRecipesUseCase,
    UpdateRecipeUseCase,
};
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── Query params ─────────────────────────────────────────────────────────────

/// `tags` may repeat; a recipe matches if it carries any of them.
#[derive(Deserialize, Default)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "True"))
}

impl RecipeListQuery {
    /// Mark filters only apply to an authenticated viewer.
    fn filter(&self, viewer: Option<i32>) -> RecipeFilter {
        RecipeFilter {
            author: self.author,
            tags: self.tags.clone(),
            favorited_by: viewer.filter(|_| flag(self.is_favorited.as_deref())),
            in_cart_of: viewer.filter(|_| flag(self.is_in_shopping_cart.as_deref())),
        }
    }
}

// ── Request body ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IngredientAmountBody {
    pub id: i32,
    #[serde(deserialize_with = "extract::integer")]
    pub amount: i64,
}

#[derive(Deserialize, Default)]
pub struct RecipeWriteBody {
    pub name: Option<String>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "extract::optional_integer")]
    pub cooking_time: Option<i64>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<IngredientAmountBody>>,
    pub tags: Option<Vec<i32>>,
}

impl From<RecipeWriteBody> for RecipeDraft {
    fn from(body: RecipeWriteBody) -> Self {
        RecipeDraft {
            name: body.name,
            text: body.text,
            cooking_time: body.cooking_time,
            image: body.image,
            ingredients: body.ingredients.map(|lines| {
                lines
                    .into_iter()
                    .map(|l| DraftIngredient {
                        id: l.id,
                        amount: l.amount,
                    })
                    .collect()
            }),
            tags: body.tags,
        }
    }
}

async fn render(
    state: &AppState,
    viewer: Option<i32>,
    recipe_id: i32,
) -> Result<RecipeResponse, FoodgramError> {
    let uc = GetRecipeUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        follows: state.follow_repo(),
        marks: state.mark_repo(),
    };
    let view = uc.execute(viewer, recipe_id).await?;
    Ok(RecipeResponse::new(state, view))
}

// ── GET /api/recipes/ ────────────────────────────────────────────────────────

pub async fn list_recipes(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<RecipeListQuery>,
) -> Result<Json<Page<RecipeResponse>>, FoodgramError> {
    let viewer = identity.user_id();
    let page = PageRequest::new(query.page, query.limit);
    let uc = ListRecipesUseCase {
        recipes: state.recipe_repo(),
        users: state.user_repo(),
        follows: state.follow_repo(),
        marks: state.mark_repo(),
    };
    let paged = uc.execute(viewer, query.filter(viewer), page).await?;
    Ok(Json(envelope(&state.public_url, &uri, page, paged, |v| {
        RecipeResponse::new(&state, v)
    })))
}

// ── POST /api/recipes/ ───────────────────────────────────────────────────────

pub async fn create_recipe(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RecipeWriteBody>,
) -> Result<(StatusCode, Json<RecipeResponse>), FoodgramError> {
    let uc = CreateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        media: state.media_store(),
    };
    let recipe = uc.execute(identity.user_id, body.into()).await?;
    let response = render(&state, Some(identity.user_id), recipe.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// ── GET /api/recipes/{id}/ ───────────────────────────────────────────────────

pub async fn get_recipe(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    Ok(Json(render(&state, identity.user_id(), id).await?))
}

// ── PATCH /api/recipes/{id}/ ─────────────────────────────────────────────────

pub async fn update_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<RecipeWriteBody>,
) -> Result<Json<RecipeResponse>, FoodgramError> {
    let uc = UpdateRecipeUseCase {
        recipes: state.recipe_repo(),
        tags: state.tag_repo(),
        ingredients: state.ingredient_repo(),
        media: state.media_store(),
    };
    let recipe = uc.execute(identity.user_id, id, body.into()).await?;
    Ok(Json(render(&state, Some(identity.user_id), recipe.id).await?))
}

// ── DELETE /api/recipes/{id}/ ────────────────────────────────────────────────

pub async fn delete_recipe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let uc = DeleteRecipeUseCase {
        recipes: state.recipe_repo(),
        media: state.media_store(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST / DELETE /api/recipes/{id}/favorite/ and /shopping_cart/ ────────────

async fn add_mark(
    state: &AppState,
    mark: RecipeMark,
    user_id: i32,
    recipe_id: i32,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    let uc = AddRecipeMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.mark_repo(),
    };
    let recipe = uc.execute(mark, user_id, recipe_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RecipeShortResponse::new(state, recipe)),
    ))
}

async fn remove_mark(
    state: &AppState,
    mark: RecipeMark,
    user_id: i32,
    recipe_id: i32,
) -> Result<StatusCode, FoodgramError> {
    let uc = RemoveRecipeMarkUseCase {
        recipes: state.recipe_repo(),
        marks: state.mark_repo(),
    };
    uc.execute(mark, user_id, recipe_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    add_mark(&state, RecipeMark::Favorite, identity.user_id, id).await
}

pub async fn remove_favorite(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_mark(&state, RecipeMark::Favorite, identity.user_id, id).await
}

pub async fn add_to_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShortResponse>), FoodgramError> {
    add_mark(&state, RecipeMark::ShoppingCart, identity.user_id, id).await
}

pub async fn remove_from_cart(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    remove_mark(&state, RecipeMark::ShoppingCart, identity.user_id, id).await
}

// ── GET /api/recipes/download_shopping_cart/ ─────────────────────────────────

pub async fn download_shopping_cart(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, FoodgramError> {
    let uc = DownloadShoppingListUseCase {
        recipes: state.recipe_repo(),
    };
    let body = uc.execute(identity.user_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        body,
    ))
}
