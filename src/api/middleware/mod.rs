//! Middleware components for request processing.
//!
//! Request ID tracking, request logging, and the uniform error envelope.

mod error_handler;
mod logging;
mod request_id;

pub use error_handler::{envelope_message, global_error_handler};
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
