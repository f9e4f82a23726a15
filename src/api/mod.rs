//! HTTP API layer: request normalization, handlers, middleware and DTOs.

pub mod doc;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod normalize;
pub mod routes;
