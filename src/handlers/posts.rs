/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::handlers::AppState;
use crate::middleware::UserId;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
}

/// Create a new post
/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let post = state.posts.create_post(&user_id.0, &req.content).await?;
    Ok(HttpResponse::Created().json(post))
}

/// The public feed, newest first
/// GET /api/v1/feed
pub async fn get_feed(state: web::Data<AppState>) -> Result<HttpResponse> {
    let feed = state.posts.list_feed().await?;
    Ok(HttpResponse::Ok().json(feed))
}

/// All posts by one author, newest first
/// GET /api/v1/posts/user/{user_id}
pub async fn get_user_posts(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let feed = state.posts.list_by_author(&user_id).await?;
    Ok(HttpResponse::Ok().json(feed))
}
