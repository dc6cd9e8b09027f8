//! `Authorization` header extractors.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::header::AUTHORIZATION;
use http::request::Parts;

use crate::token::validate_token;

/// Application state that knows the token signing secret.
pub trait TokenSecret {
    fn token_secret(&self) -> &str;
}

/// Authenticated caller, read from `Authorization: Token <jwt>`.
///
/// `Bearer <jwt>` is accepted as well. Returns 401 if the header is absent or
/// the token does not validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
}

/// Caller that may be anonymous.
///
/// A missing header yields `MaybeIdentity(None)`; a header carrying an invalid
/// token is still rejected with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn user_id(&self) -> Option<i32> {
        self.0.map(|identity| identity.user_id)
    }
}

fn credentials(parts: &Parts) -> Result<Option<&str>, StatusCode> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;
    value
        .strip_prefix("Token ")
        .or_else(|| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Some)
        .ok_or(StatusCode::UNAUTHORIZED)
}

fn resolve(parts: &Parts, secret: &str) -> Result<Option<Identity>, StatusCode> {
    let Some(token) = credentials(parts)? else {
        return Ok(None);
    };
    match validate_token(token, secret) {
        Ok(info) => Ok(Some(Identity {
            user_id: info.user_id,
        })),
        Err(e) => {
            tracing::debug!(error = %e, "rejected auth token");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: TokenSecret + Send + Sync,
{
    type Rejection = StatusCode;

    // Resolve synchronously and hand back a 'static future so the returned
    // future does not borrow `parts` or `state`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = resolve(parts, state.token_secret())
            .and_then(|identity| identity.ok_or(StatusCode::UNAUTHORIZED));
        async move { result }
    }
}

impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: TokenSecret + Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = resolve(parts, state.token_secret()).map(MaybeIdentity);
        async move { result }
    }
}
