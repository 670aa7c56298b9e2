use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::extract::ApiQuery;
use super::params::PostListQuery;
use super::ApiResponse;
use crate::error::Result;
use crate::models::{PostDetail, PostSummary};
use crate::services::{BlogService, ListPostsParams};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts))
        .route("/:slug", get(get_post))
}

async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PostListQuery>,
) -> Result<ApiResponse<Vec<PostSummary>>> {
    let params = ListPostsParams {
        page: query.paging.resolve(&state.config.pagination),
        search: query.search_term().map(String::from),
        category: query.category_slug().map(String::from),
        tag: query.tag_slug().map(String::from),
        featured: query.featured(),
        locale: state.config.content.resolve_locale(query.locale.as_deref()),
    };

    let service = BlogService::new(state.repo.clone());
    let posts = service.list_posts(params).await?;

    Ok(ApiResponse::paginated(posts))
}

async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<PostDetail>> {
    let service = BlogService::new(state.repo.clone());
    let post = service.get_post(&slug).await?;

    Ok(ApiResponse::ok(post))
}
