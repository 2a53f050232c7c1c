//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (one span per request)
//! 3. Request ID (recorded into that span, echoed in the response)
//! 4. CORS
//!
//! Authentication is not a layer: restricted handlers take a
//! [`RequireBearer`] extractor.

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, OptionalBearer, RequireBearer};
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
