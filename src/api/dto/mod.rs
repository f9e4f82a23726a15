//! Data Transfer Objects for API requests and responses.
//!
//! - `user` - user request/response bodies
//! - `error` - the `{"error": ...}` envelope
//! - `pagination` - list query parameters
//! - `health` - health probe bodies

mod error;
mod health;
mod pagination;
mod user;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::ListQuery;
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
