//! Request extractors that report malformed input as validation errors
//! instead of axum's plain-text rejections.

use std::fmt;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum_extra::extract::Query;
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Deserialize;

use crate::domain::draft::REQUIRED;
use crate::error::{FieldErrors, FoodgramError};

/// Key for errors that belong to no single field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// JSON request body. A body that does not match `T` is reported under the
/// path of the offending field.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FoodgramError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            FoodgramError::Validation(FieldErrors::single(NON_FIELD_ERRORS, e.body_text()))
        })?;
        decode(&bytes)
            .map(JsonBody)
            .map_err(FoodgramError::Validation)
    }
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FieldErrors> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        let (field, message) = describe(&e.path().to_string(), e.inner());
        FieldErrors::single(&field, message)
    })?;
    deserializer
        .end()
        .map_err(|e| FieldErrors::single(NON_FIELD_ERRORS, without_position(&e)))?;
    Ok(value)
}

fn describe(path: &str, error: &serde_json::Error) -> (String, String) {
    let message = without_position(error);
    if error.is_syntax() || error.is_eof() {
        return (NON_FIELD_ERRORS.to_owned(), message);
    }
    // serde reports a missing field against its parent.
    if let Some(name) = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.strip_suffix('`'))
    {
        let field = match path {
            "." => name.to_owned(),
            parent => format!("{parent}.{name}"),
        };
        return (field, REQUIRED.to_owned());
    }
    match path {
        "." => (NON_FIELD_ERRORS.to_owned(), message),
        field => (field.to_owned(), message),
    }
}

fn without_position(error: &serde_json::Error) -> String {
    let text = error.to_string();
    match text.rsplit_once(" at line ") {
        Some((message, _)) if error.line() != 0 => message.to_owned(),
        _ => text,
    }
}

/// Query string parameters. Keys may repeat for `Vec` fields.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FoodgramError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                FoodgramError::Validation(FieldErrors::single(NON_FIELD_ERRORS, e.body_text()))
            })?;
        Ok(QueryParams(value))
    }
}

// ── Integers that may arrive as strings ──────────────────────────────────────

struct IntegerVisitor;

impl Visitor<'_> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a valid integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim()
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// `5` and `"5"` both read as 5.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    deserializer.deserialize_any(IntegerVisitor)
}

/// Like [`integer`], with `null` read as absent.
pub fn optional_integer<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    struct Integer(#[serde(deserialize_with = "integer")] i64);

    Ok(Option::<Integer>::deserialize(deserializer)?.map(|Integer(v)| v))
}
