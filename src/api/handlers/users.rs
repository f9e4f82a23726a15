//! User CRUD request handlers.
//!
//! Each handler normalizes its input through the extractors in
//! [`crate::api::normalize`], forwards one call to the `UserStore`, and maps
//! the outcome to a response.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    routing::{MethodRouter, get},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    CreateUserRequest, ErrorResponse, ListQuery, UpdateUserRequest, UserResponse,
};
use crate::api::normalize::{JsonPayload, UserId};
use crate::error::{AppError, AppResult, StoreOperation};
use crate::state::AppState;

/// Creates user-related routes.
///
/// `/users/`, a trailing slash after the id and further segments are served
/// by the same id-addressed handlers so they answer with the id errors
/// instead of 404.
pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(create_user))
        .routes(routes!(get_user))
        .routes(routes!(update_user))
        .routes(routes!(delete_user))
        .route("/users/", by_id_methods())
        .route("/users/{id}/", by_id_methods())
        .route("/users/{id}/{*trailing}", by_id_methods())
}

fn by_id_methods() -> MethodRouter<AppState> {
    get(get_user).patch(update_user).delete(delete_user)
}

/// GET /users - List users ordered by id
#[utoipa::path(
    get,
    path = "/users",
    tag = USER_TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "One page of users", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_users(
    State(state): State<AppState>,
    query: ListQuery,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .users
        .list(query.limit, query.offset)
        .await
        .map_err(|e| AppError::from_store(StoreOperation::List, e))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /users - Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = USER_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_user(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let new_user = payload.into_new_user()?;
    let user = state
        .users
        .create(new_user)
        .await
        .map_err(|e| AppError::from_store(StoreOperation::Create, e))?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{id} - Get a user by id
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Missing or non-integer id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(|e| AppError::from_store(StoreOperation::Get, e))?;

    Ok(Json(UserResponse::from(user)))
}

/// PATCH /users/{id} - Update the fields present in the body
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Bad id, malformed body or no fields", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonPayload(payload): JsonPayload<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let update = payload.into_update_user()?;
    let user = state
        .users
        .update(id, update)
        .await
        .map_err(|e| AppError::from_store(StoreOperation::Update, e))?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id} - Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Missing or non-integer id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn delete_user(State(state): State<AppState>, UserId(id): UserId) -> AppResult<StatusCode> {
    state
        .users
        .delete(id)
        .await
        .map_err(|e| AppError::from_store(StoreOperation::Delete, e))?;

    Ok(StatusCode::NO_CONTENT)
}
