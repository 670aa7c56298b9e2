use axum::{extract::State, routing::post, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::extract::ApiJson;
use super::ApiResponse;
use crate::error::Result;
use crate::models::InquiryPayload;
use crate::services::InquiryService;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(submit_inquiry))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryReceipt {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

async fn submit_inquiry(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<InquiryPayload>,
) -> Result<ApiResponse<InquiryReceipt>> {
    let service = InquiryService::new(state.inquiries.clone(), state.config.content.clone());
    let inquiry = service.submit(payload).await?;

    Ok(ApiResponse::created(InquiryReceipt {
        id: inquiry.id,
        created_at: inquiry.created_at,
    }))
}
