use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Query` whose rejection is reported in the response envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `Json` whose rejection is reported as field-level validation errors.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
