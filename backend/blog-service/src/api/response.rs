use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::FieldError;
use crate::models::{Page, Paginated};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: Page, total: i64) -> Self {
        Self {
            page: page.page(),
            limit: page.limit(),
            total,
            total_pages: page.total_pages(total),
        }
    }
}

/// Uniform envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            pagination: None,
            status: StatusCode::OK,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            ..Self::ok(data)
        }
    }

    pub fn paginated(result: Paginated<T>) -> Self {
        Self {
            pagination: Some(Pagination::new(result.page, result.total)),
            ..Self::ok(result.items)
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
            pagination: None,
            status: StatusCode::OK,
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure("Validation failed")
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginated_envelope_shape() {
        let result = Paginated {
            items: vec![1, 2, 3],
            page: Page::new(2, 3),
            total: 7,
        };
        let json = serde_json::to_value(ApiResponse::paginated(result)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "data": [1, 2, 3],
                "pagination": { "page": 2, "limit": 3, "total": 7, "totalPages": 3 }
            })
        );
    }

    #[test]
    fn failure_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::failure("Tag not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "Tag not found" })
        );
    }
}
