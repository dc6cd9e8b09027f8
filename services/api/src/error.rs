use std::collections::BTreeMap;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Per-field validation messages, rendered as `{"field": ["message", ...]}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FoodgramError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FoodgramError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Foodgram service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum FoodgramError {
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The token is valid but its account has since been removed.
    #[error("account no longer exists")]
    UnknownAccount,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("recipe is already in favorites")]
    AlreadyInFavorites,
    #[error("recipe is already in shopping cart")]
    AlreadyInShoppingCart,
    #[error("already subscribed")]
    AlreadySubscribed,
    #[error("cannot subscribe to yourself")]
    CannotSubscribeToSelf,
    #[error("recipe is not in favorites")]
    NotInFavorites,
    #[error("recipe is not in shopping cart")]
    NotInShoppingCart,
    #[error("not subscribed")]
    NotSubscribed,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("short link not found")]
    ShortLinkNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl FoodgramError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UnknownAccount => "UNKNOWN_ACCOUNT",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::AlreadyInFavorites => "ALREADY_IN_FAVORITES",
            Self::AlreadyInShoppingCart => "ALREADY_IN_SHOPPING_CART",
            Self::AlreadySubscribed => "ALREADY_SUBSCRIBED",
            Self::CannotSubscribeToSelf => "CANNOT_SUBSCRIBE_TO_SELF",
            Self::NotInFavorites => "NOT_IN_FAVORITES",
            Self::NotInShoppingCart => "NOT_IN_SHOPPING_CART",
            Self::NotSubscribed => "NOT_SUBSCRIBED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::ShortLinkNotFound => "SHORT_LINK_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidCredentials
            | Self::UserAlreadyExists
            | Self::AlreadyInFavorites
            | Self::AlreadyInShoppingCart
            | Self::AlreadySubscribed
            | Self::CannotSubscribeToSelf
            | Self::NotInFavorites
            | Self::NotInShoppingCart
            | Self::NotSubscribed => StatusCode::BAD_REQUEST,
            Self::UnknownAccount => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound
            | Self::ShortLinkNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for FoodgramError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref fields) = self {
            body["fields"] = serde_json::json!(fields);
        }
        (status, axum::Json(body)).into_response()
    }
}
