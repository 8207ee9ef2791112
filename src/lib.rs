/// Emote Service Library
///
/// Post-and-profile aggregation service for an emoji-only micro-blog:
/// persists posts, enforces a per-author sliding-window rate limit on
/// creation, and assembles feeds by joining stored posts with author
/// profiles from an external identity provider.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Post, profile, and feed data structures
/// - `services`: Business logic (post service, feed assembly, rate limiting)
/// - `db`: Database access layer and post repository
/// - `identity`: Identity provider lookup boundary
/// - `middleware`: Authenticated-user extraction
/// - `validators`: Emoji-only content validation
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validators;

pub use config::Config;
pub use error::{AppError, Result};
