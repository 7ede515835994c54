//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. CORS (only when origins are configured)
//! 3. `TraceLayer` (one `http_request` span per request)
//! 4. Request ID (read or generate `x-request-id`, record it on the span)

pub mod cors;
pub mod request_id;
pub mod trace;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use trace::trace_layer;
