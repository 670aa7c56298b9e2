use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};

use super::extract::ApiQuery;
use super::params::PageQuery;
use super::ApiResponse;
use crate::error::Result;
use crate::models::{CategoryPosts, CategoryWithCount};
use crate::services::BlogService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/:slug", get(get_category))
}

async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryWithCount>>> {
    let service = BlogService::new(state.repo.clone());
    let categories = service.list_categories().await?;

    Ok(ApiResponse::ok(categories))
}

async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<CategoryPosts>> {
    let page = query.resolve(&state.config.pagination);
    let service = BlogService::new(state.repo.clone());
    let category = service.get_category(&slug, page).await?;

    Ok(ApiResponse::paginated(category))
}
