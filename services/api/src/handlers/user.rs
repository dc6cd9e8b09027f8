use axum::{
    Json,
    extract::{OriginalUri, Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use foodgram_auth_types::identity::{Identity, MaybeIdentity};
use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::FoodgramError;
use crate::handlers::extract::{JsonBody, QueryParams};
use crate::handlers::pagination::envelope;
use crate::handlers::response::{CreatedUserResponse, SubscriptionResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::follow::{ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase};
use crate::usecase::user::{
    DeleteAvatarUseCase, GetUserUseCase, ListUsersUseCase, RegisterUserInput,
    RegisterUserUseCase, SetAvatarUseCase, SetPasswordInput, SetPasswordUseCase,
};

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Deserialize, Default)]
pub struct SubscriptionQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u64>,
}

// ── GET /api/users/ ──────────────────────────────────────────────────────────

pub async fn list_users(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Page<UserResponse>>, FoodgramError> {
    let page = query.page_request();
    let uc = ListUsersUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let paged = uc.execute(identity.user_id(), page).await?;
    Ok(Json(envelope(&state.public_url, &uri, page, paged, |p| {
        UserResponse::new(&state, p)
    })))
}

// ── POST /api/users/ ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterBody>,
) -> Result<(StatusCode, Json<CreatedUserResponse>), FoodgramError> {
    let uc = RegisterUserUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterUserInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users/{id}/ and /api/users/me/ ──────────────────────────────────

pub async fn get_user(
    identity: MaybeIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let profile = uc.execute(identity.user_id(), id).await?;
    Ok(Json(UserResponse::new(&state, profile)))
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, FoodgramError> {
    let uc = GetUserUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    let profile = uc.execute(Some(identity.user_id), identity.user_id).await?;
    Ok(Json(UserResponse::new(&state, profile)))
}

// ── POST /api/users/set_password/ ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPasswordBody {
    pub current_password: String,
    pub new_password: String,
}

pub async fn set_password(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SetPasswordBody>,
) -> Result<StatusCode, FoodgramError> {
    let uc = SetPasswordUseCase {
        users: state.user_repo(),
    };
    uc.execute(
        identity.user_id,
        SetPasswordInput {
            current_password: body.current_password,
            new_password: body.new_password,
        },
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT / DELETE /api/users/me/avatar/ ───────────────────────────────────────

#[derive(Deserialize)]
pub struct AvatarBody {
    pub avatar: Option<String>,
}

#[derive(Serialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

pub async fn set_avatar(
    identity: Identity,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AvatarBody>,
) -> Result<Json<AvatarResponse>, FoodgramError> {
    let uc = SetAvatarUseCase {
        users: state.user_repo(),
        media: state.media_store(),
    };
    let path = uc.execute(identity.user_id, body.avatar.as_deref()).await?;
    Ok(Json(AvatarResponse {
        avatar: state.media_url(&path),
    }))
}

pub async fn delete_avatar(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<StatusCode, FoodgramError> {
    let uc = DeleteAvatarUseCase {
        users: state.user_repo(),
        media: state.media_store(),
    };
    uc.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/users/subscriptions/ ────────────────────────────────────────────

pub async fn list_subscriptions(
    identity: Identity,
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    QueryParams(query): QueryParams<SubscriptionQuery>,
) -> Result<Json<Page<SubscriptionResponse>>, FoodgramError> {
    let page = PageRequest::new(query.page, query.limit);
    let uc = ListSubscriptionsUseCase {
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let paged = uc
        .execute(identity.user_id, page, query.recipes_limit)
        .await?;
    Ok(Json(envelope(&state.public_url, &uri, page, paged, |s| {
        SubscriptionResponse::new(&state, s)
    })))
}

// ── POST / DELETE /api/users/{id}/subscribe/ ─────────────────────────────────

#[derive(Deserialize, Default)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<u64>,
}

pub async fn subscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    QueryParams(query): QueryParams<SubscribeQuery>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), FoodgramError> {
    let uc = SubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
        recipes: state.recipe_repo(),
    };
    let subscription = uc.execute(identity.user_id, id, query.recipes_limit).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(&state, subscription)),
    ))
}

pub async fn unsubscribe(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, FoodgramError> {
    let uc = UnsubscribeUseCase {
        users: state.user_repo(),
        follows: state.follow_repo(),
    };
    uc.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
