//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. `TraceLayer` (request span with `request_id` and `tenant` fields)
//! 3. Request ID (fills `request_id`, echoes `x-request-id`)
//! 4. Session layer (tower-sessions with `MemoryStore`)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
