/// HTTP request handlers
pub mod posts;
pub mod profile;

pub use posts::{create_post, get_feed, get_user_posts};
pub use profile::get_profile_by_username;

use crate::services::PostService;
use std::sync::Arc;

/// Shared handler state.
pub struct AppState {
    pub posts: Arc<PostService>,
}
