use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::extract::ApiQuery;
use super::params::PageQuery;
use super::ApiResponse;
use crate::error::Result;
use crate::models::AuthorPosts;
use crate::services::BlogService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/:slug", get(get_author))
}

async fn get_author(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<AuthorPosts>> {
    let page = query.resolve(&state.config.pagination);
    let service = BlogService::new(state.repo.clone());
    let author = service.get_author(&slug, page).await?;

    Ok(ApiResponse::paginated(author))
}
