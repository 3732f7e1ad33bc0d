//! Utility modules
//!
//! String helpers and upstream timeout handling.

pub mod string;
pub mod timeout;

pub use string::{char_len, escape_xml, truncate_str};
pub use timeout::{with_timeout, TimeoutError, DEFAULT_UPSTREAM_TIMEOUT};
