//! Services module
//!
//! Provider dispatch for both proxies, the shared upstream client, and the
//! mock content generators.

pub mod chat;
pub mod image;
pub mod placeholder;
pub mod story;
pub mod upstream;

pub use chat::ChatService;
pub use image::ImageService;
pub use upstream::{Upstream, UpstreamClient, UpstreamError};
