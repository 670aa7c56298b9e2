mod admin;
mod authors;
mod categories;
mod extract;
mod inquiries;
mod params;
mod posts;
mod response;
mod tags;

use axum::Router;

use crate::AppState;

pub use extract::{ApiJson, ApiQuery};
pub use params::{PageQuery, PostListQuery};
pub use response::{ApiResponse, Pagination};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/posts", posts::routes())
        .nest("/categories", categories::routes())
        .nest("/tags", tags::routes())
        .nest("/authors", authors::routes())
        .nest("/inquiries", inquiries::routes())
        .nest("/admin", admin::routes(state))
}
