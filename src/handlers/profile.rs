/// Profile handlers - resolve provider profiles for profile pages
use crate::error::Result;
use crate::handlers::AppState;
use actix_web::{web, HttpResponse};

/// Look up a profile by username
/// GET /api/v1/profiles/{username}
pub async fn get_profile_by_username(
    state: web::Data<AppState>,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let profile = state.posts.resolve_profile(&username).await?;
    Ok(HttpResponse::Ok().json(profile))
}
