//! Middleware module
//!
//! Contains HTTP middleware for CORS and request logging.

pub mod cors;
pub mod logging;

pub use cors::preflight;
pub use logging::{log_request, RequestId, REQUEST_ID_HEADER, TRACE_ID_HEADER};
