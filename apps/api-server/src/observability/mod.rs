//! Observability module - request IDs and request-scoped tracing.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware, current_request_id};
