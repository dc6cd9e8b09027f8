use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use foodgram_core::health::healthz;
use foodgram_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, logout},
    catalog::{get_ingredient, get_tag, list_ingredients, list_tags},
    health::readyz,
    recipe::{
        add_favorite, add_to_cart, create_recipe, delete_recipe, download_shopping_cart,
        get_recipe, list_recipes, remove_favorite, remove_from_cart, update_recipe,
    },
    short_link::{get_link, resolve},
    user::{
        delete_avatar, get_me, get_user, list_subscriptions, list_users, register, set_avatar,
        set_password, subscribe, unsubscribe,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.media.root);
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/api/auth/token/login/", post(login))
        .route("/api/auth/token/logout/", post(logout))
        // Users
        .route("/api/users/", get(list_users).post(register))
        .route("/api/users/me/", get(get_me))
        .route("/api/users/me/avatar/", put(set_avatar).delete(delete_avatar))
        .route("/api/users/set_password/", post(set_password))
        .route("/api/users/subscriptions/", get(list_subscriptions))
        .route("/api/users/{id}/", get(get_user))
        .route("/api/users/{id}/subscribe/", post(subscribe).delete(unsubscribe))
        // Reference data
        .route("/api/tags/", get(list_tags))
        .route("/api/tags/{id}/", get(get_tag))
        .route("/api/ingredients/", get(list_ingredients))
        .route("/api/ingredients/{id}/", get(get_ingredient))
        // Recipes
        .route("/api/recipes/", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        .route("/api/recipes/{id}/get-link/", get(get_link))
        .route(
            "/api/recipes/{id}/favorite/",
            post(add_favorite).delete(remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(add_to_cart).delete(remove_from_cart),
        )
        // Short links
        .route("/s/{code}/", get(resolve))
        // Media
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
