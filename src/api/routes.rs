//! Router configuration for the API.

use std::time::Duration;

use axum::{Json, Router, middleware, routing::get};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::api::doc::{ApiDoc, OPENAPI_PATH};
use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// Layers run outermost first: request id, logging, compression, error
/// envelope, then the request timeout closest to the handlers so its 408
/// also receives the envelope.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::users::user_routes())
        .merge(handlers::health::health_routes())
        .split_for_parts();

    router
        .route(OPENAPI_PATH, get(move || async move { Json(api) }))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(global_error_handler))
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
