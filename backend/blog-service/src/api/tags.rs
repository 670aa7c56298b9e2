use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::extract::ApiQuery;
use super::params::PageQuery;
use super::ApiResponse;
use crate::error::Result;
use crate::models::{TagPosts, TagWithCount};
use crate::services::BlogService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags))
        .route("/:slug", get(get_tag))
}

async fn list_tags(State(state): State<AppState>) -> Result<ApiResponse<Vec<TagWithCount>>> {
    let service = BlogService::new(state.repo.clone());
    let tags = service.list_tags().await?;

    Ok(ApiResponse::ok(tags))
}

async fn get_tag(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<TagPosts>> {
    let page = query.resolve(&state.config.pagination);
    let service = BlogService::new(state.repo.clone());
    let tag = service.get_tag(&slug, page).await?;

    Ok(ApiResponse::paginated(tag))
}
