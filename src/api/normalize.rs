//! Request normalization for the user endpoints.
//!
//! Turns raw query strings, path segments and bodies into typed values or
//! client errors before anything reaches storage. Pagination is repaired
//! silently; ids and bodies are rejected.

use axum::{
    body::Bytes,
    extract::{
        FromRequest, FromRequestParts, RawPathParams, Request,
        rejection::RawPathParamsRejection,
    },
    http::request::Parts,
};
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Page size used when `limit` is absent, non-numeric or not positive
pub const DEFAULT_LIMIT: i64 = 10;

/// Offset used when `offset` is absent, non-numeric or negative
pub const DEFAULT_OFFSET: i64 = 0;

/// Path parameter holding the user id
pub const ID_PARAM: &str = "id";

/// Catch-all parameter for anything after the id segment, e.g. `/users/4/x`
pub const TRAILING_PARAM: &str = "trailing";

pub fn normalize_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|limit| *limit > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

pub fn normalize_offset(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|offset| *offset >= 0)
        .unwrap_or(DEFAULT_OFFSET)
}

/// Parses the id segment of a `/users/{id}` path.
pub fn parse_user_id(raw: &str) -> AppResult<i64> {
    if raw.is_empty() {
        return Err(AppError::MissingIdentifier);
    }
    raw.parse::<i64>().map_err(|_| AppError::InvalidIdentifier)
}

/// Decodes the first JSON value of `body` into `T`.
///
/// Decoding is lenient in the same places common JSON clients expect:
/// - object keys match field names case-insensitively (fields are lowercase)
/// - a repeated key overwrites the earlier value
/// - invalid UTF-8 is replaced with U+FFFD
///
/// A top-level `null` yields `T::default()`. Bytes after the first value are
/// not inspected.
pub fn decode_json_body<T>(body: &[u8]) -> AppResult<T>
where
    T: DeserializeOwned + Default,
{
    let text = String::from_utf8_lossy(body);
    let mut values = serde_json::Deserializer::from_str(&text).into_iter::<FoldedObject>();

    let object = match values.next() {
        Some(Ok(FoldedObject(object))) => object,
        Some(Err(e)) => {
            tracing::debug!(error = %e, "Rejected request body");
            return Err(AppError::MalformedBody);
        }
        None => return Err(AppError::MalformedBody),
    };

    match object {
        None => Ok(T::default()),
        Some(map) => serde_json::from_value(Value::Object(map)).map_err(|e| {
            tracing::debug!(error = %e, "Rejected request body");
            AppError::MalformedBody
        }),
    }
}

/// Top-level JSON object with lowercased keys, or `None` for `null`.
///
/// Keys are folded in document order, so the last of several keys that
/// differ only in case wins.
struct FoldedObject(Option<Map<String, Value>>);

impl<'de> Deserialize<'de> for FoldedObject {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FoldedVisitor;

        impl<'de> Visitor<'de> for FoldedVisitor {
            type Value = FoldedObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object or null")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FoldedObject(None))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(FoldedObject(None))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = Map::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.insert(key.to_lowercase(), value);
                }
                Ok(FoldedObject(Some(map)))
            }
        }

        deserializer.deserialize_any(FoldedVisitor)
    }
}

/// User id taken from the request path.
///
/// Routes without an id segment produce `MissingIdentifier`. A trailing slash
/// or extra segments after the id make the segment non-numeric, so they
/// produce `InvalidIdentifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let params = RawPathParams::from_request_parts(parts, state)
            .await
            .map_err(|rejection| match rejection {
                RawPathParamsRejection::InvalidUtf8InPathParam(_) => AppError::InvalidIdentifier,
                _ => AppError::MissingIdentifier,
            })?;

        let mut raw_id = "";
        for (key, value) in &params {
            if key == TRAILING_PARAM {
                return Err(AppError::InvalidIdentifier);
            }
            if key == ID_PARAM {
                raw_id = value;
            }
        }

        // `/users/42/` carries the id param but the segment is really "42/".
        if !raw_id.is_empty() && parts.uri.path().ends_with('/') {
            return Err(AppError::InvalidIdentifier);
        }

        parse_user_id(raw_id).map(UserId)
    }
}

/// JSON request body decoded regardless of `Content-Type`.
///
/// Any failure to read or decode the body becomes `MalformedBody`.
#[derive(Debug, Clone, Default)]
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            AppError::MalformedBody
        })?;

        decode_json_body(&body).map(JsonPayload)
    }
}
