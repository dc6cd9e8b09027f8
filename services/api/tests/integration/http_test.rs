//! Router-level checks for requests that are answered before storage is
//! touched. The database handle is disconnected unless a test needs a
//! storage failure, which comes from a mock connection.

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::{Value, json};

use foodgram_api::infra::media::FsMediaStore;
use foodgram_api::router::build_router;
use foodgram_api::state::AppState;
use foodgram_testing::auth::MockAuth;

use crate::helpers::TEST_JWT_SECRET;

fn server() -> TestServer {
    server_on(DatabaseConnection::Disconnected)
}

fn server_on(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
        token_ttl_secs: 3600,
        public_url: "http://testserver".to_owned(),
        media: FsMediaStore::new(std::env::temp_dir().join("foodgram-http-test-media")),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn auth(user_id: i32) -> MockAuth {
    MockAuth::new(user_id, TEST_JWT_SECRET)
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_live_but_not_ready_without_database() {
    let server = server();
    server.get("/healthz").await.assert_status(StatusCode::OK);
    server
        .get("/readyz")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// ── Authentication ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_on_private_endpoints() {
    let server = server();
    server
        .get("/api/users/me/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/auth/token/logout/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/recipes/download_shopping_cart/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/recipes/1/favorite/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_invalid_token_even_on_public_listing() {
    let server = server();
    server
        .get("/api/recipes/")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Token not-a-jwt"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_other_secret() {
    let server = server();
    let (name, value) = MockAuth::new(1, "another-secret").authorization();
    server
        .post("/api/auth/token/logout/")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_logout_with_valid_token() {
    let server = server();
    let (name, value) = auth(1).authorization();
    server
        .post("/api/auth/token/logout/")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn should_accept_bearer_prefix() {
    let server = server();
    let value = HeaderValue::from_str(&format!("Bearer {}", auth(1).token())).unwrap();
    server
        .post("/api/auth/token/logout/")
        .add_header(AUTHORIZATION, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

// ── Validation before storage ────────────────────────────────────────────────

#[tokio::test]
async fn should_name_image_when_creating_recipe_without_one() {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&json!({
            "name": "Soup",
            "text": "Boil water.",
            "cooking_time": 5,
            "ingredients": [{"id": 1, "amount": 2}],
            "tags": [1, 2]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["image"].is_array());
    assert_eq!(body["fields"].as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_empty_ingredients_and_tags_together() {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&json!({"name": "Soup", "ingredients": [], "tags": []}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["fields"]["ingredients"].is_array());
    assert!(body["fields"]["tags"].is_array());
}

#[tokio::test]
async fn should_reject_self_subscription() {
    let server = server();
    let (name, value) = auth(3).authorization();
    let response = server
        .post("/api/users/3/subscribe/")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "CANNOT_SUBSCRIBE_TO_SELF");
}

#[tokio::test]
async fn should_reject_reserved_username_on_registration() {
    let server = server();
    let response = server
        .post("/api/users/")
        .json(&json!({
            "email": "me@example.com",
            "username": "me",
            "first_name": "Me",
            "last_name": "Myself",
            "password": "s3cret-pass"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["fields"]["username"].is_array());
}

#[tokio::test]
async fn should_require_avatar_in_body() {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .put("/api/users/me/avatar/")
        .add_header(name, value)
        .json(&json!({"avatar": null}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["fields"]["avatar"].is_array());
}

#[tokio::test]
async fn should_report_storage_failure_as_internal_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".into())])
        .into_connection();
    let server = server_on(db);
    let response = server.get("/api/tags/").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INTERNAL");
    assert_eq!(body["message"], "internal error");
}

// ── Malformed input ──────────────────────────────────────────────────────────

async fn post_recipe(body: Value) -> Value {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .post("/api/recipes/")
        .add_header(name, value)
        .json(&body)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.json()
}

#[tokio::test]
async fn should_name_missing_ingredient_amount() {
    let body = post_recipe(json!({
        "name": "Soup",
        "text": "Boil water.",
        "cooking_time": 5,
        "ingredients": [{"id": 1}],
        "tags": [1]
    }))
    .await;

    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(
        body["fields"]["ingredients[0].amount"][0],
        "this field is required"
    );
}

#[tokio::test]
async fn should_name_non_numeric_cooking_time() {
    let body = post_recipe(json!({
        "name": "Soup",
        "text": "Boil water.",
        "cooking_time": "abc",
        "ingredients": [{"id": 1, "amount": 2}],
        "tags": [1]
    }))
    .await;

    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["cooking_time"].is_array());
}

#[tokio::test]
async fn should_accept_numeric_strings_for_amount_and_cooking_time() {
    // Parsing succeeds, so the first failing stage is the missing image.
    let body = post_recipe(json!({
        "name": "Soup",
        "text": "Boil water.",
        "cooking_time": "5",
        "ingredients": [{"id": 1, "amount": "2"}],
        "tags": [1]
    }))
    .await;

    assert_eq!(body["kind"], "VALIDATION");
    let fields: Vec<&String> = body["fields"].as_object().unwrap().keys().collect();
    assert_eq!(fields, ["image"]);
}

#[tokio::test]
async fn should_report_unparsable_body_as_validation_error() {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .patch("/api/recipes/1/")
        .add_header(name, value)
        .text("{not json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["fields"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn should_name_missing_registration_field() {
    let server = server();
    let response = server
        .post("/api/users/")
        .json(&json!({
            "email": "cook@example.com",
            "first_name": "Cook",
            "last_name": "Book",
            "password": "s3cret-pass"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["fields"]["username"][0], "this field is required");
}

#[tokio::test]
async fn should_report_bad_query_value_as_validation_error() {
    let server = server();
    let (name, value) = auth(1).authorization();
    let response = server
        .get("/api/users/subscriptions/")
        .add_query_param("recipes_limit", "lots")
        .add_header(name, value)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
}
