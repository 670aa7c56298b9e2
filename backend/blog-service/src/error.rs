use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::ApiResponse;

/// Field-level validation failure returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation(errors) => ApiResponse::<()>::invalid(errors),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                ApiResponse::failure("Internal server error")
            }
            other => ApiResponse::failure(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = to_camel_case(&field);
                errs.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}")),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::Validation(fields)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(vec![FieldError {
            field: "query".to_string(),
            message: rejection.body_text(),
        }])
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let error = match &rejection {
            JsonRejection::JsonDataError(e) => json_data_error(&e.body_text()),
            other => FieldError {
                field: "body".to_string(),
                message: other.body_text(),
            },
        };
        AppError::Validation(vec![error])
    }
}

/// Split `"<prefix>: <path>: <detail>"` into a field error on `<path>`.
/// Errors at the document root carry no path and are reported on `body`.
fn json_data_error(text: &str) -> FieldError {
    let detail = text.split_once(": ").map_or(text, |(_, rest)| rest);
    match detail.split_once(": ") {
        Some((path, message)) if !path.is_empty() && !path.contains(char::is_whitespace) => {
            FieldError {
                field: path.to_string(),
                message: message.to_string(),
            }
        }
        _ => FieldError {
            field: "body".to_string(),
            message: detail.to_string(),
        },
    }
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_has_no_data() {
        let (status, body) = body_json(AppError::NotFound("Post")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Post not found");
        assert!(body.get("data").is_none());
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_detail() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused on 10.0.0.5:5432"));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[tokio::test]
    async fn validation_lists_fields() {
        let err = AppError::Validation(vec![FieldError {
            field: "email".into(),
            message: "Invalid email address".into(),
        }]);
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "email");
    }

    #[test]
    fn json_data_errors_name_the_offending_field() {
        let err = json_data_error(
            "Failed to deserialize the JSON body into the target type: \
             inquiryType: invalid type: integer `5`, expected a string at line 1 column 18",
        );
        assert_eq!(err.field, "inquiryType");
        assert!(err.message.starts_with("invalid type"));

        let err = json_data_error(
            "Failed to deserialize the JSON body into the target type: \
             invalid type: sequence, expected struct InquiryPayload at line 1 column 0",
        );
        assert_eq!(err.field, "body");
    }

    #[test]
    fn field_names_are_camel_cased() {
        assert_eq!(to_camel_case("inquiry_type"), "inquiryType");
        assert_eq!(to_camel_case("name"), "name");
    }
}
