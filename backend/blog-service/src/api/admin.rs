use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use serde::Serialize;
use uuid::Uuid;

use super::extract::ApiQuery;
use super::params::PageQuery;
use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::middleware::{require_session, CurrentSession, SessionRole};
use crate::models::Inquiry;
use crate::services::{BlogService, InquiryService};
use crate::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/inquiries", get(list_inquiries))
        .route("/comments/:id/approve", post(approve_comment))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

#[derive(Debug, Serialize)]
pub struct CommentApproval {
    pub id: Uuid,
    pub approved: bool,
}

async fn list_inquiries(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<ApiResponse<Vec<Inquiry>>> {
    session.require_role(&[SessionRole::Admin])?;

    let page = query.resolve(&state.config.pagination);
    let service = InquiryService::new(state.inquiries.clone(), state.config.content.clone());
    let inquiries = service.list(page).await?;

    Ok(ApiResponse::paginated(inquiries))
}

async fn approve_comment(
    State(state): State<AppState>,
    Extension(session): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<ApiResponse<CommentApproval>> {
    session.require_role(&[SessionRole::Admin, SessionRole::Editor])?;

    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound("Comment"))?;
    let service = BlogService::new(state.repo.clone());
    service.approve_comment(id).await?;

    tracing::info!(comment_id = %id, approved_by = %session.user_id, "Comment approved");

    Ok(ApiResponse::ok(CommentApproval { id, approved: true }))
}
