//! List query parameters.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query},
    http::{Uri, request::Parts},
};
use utoipa::IntoParams;

use crate::api::normalize::{normalize_limit, normalize_offset};

/// Effective `limit`/`offset` for `GET /users`.
///
/// Extraction never fails: missing, malformed or out-of-range values fall
/// back to the defaults, and only the first occurrence of each key counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum number of users to return (default 10)
    #[param(minimum = 1, example = 10)]
    pub limit: i64,

    /// Number of users to skip, ordered by id (default 0)
    #[param(minimum = 0, example = 0)]
    pub offset: i64,
}

impl ListQuery {
    pub fn from_uri(uri: &Uri) -> Self {
        let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        Self {
            limit: normalize_limit(first("limit")),
            offset: normalize_offset(first("offset")),
        }
    }
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_uri(&parts.uri))
    }
}
