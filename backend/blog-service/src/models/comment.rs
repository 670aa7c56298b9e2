use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Approved comment as exposed by the read API. `parent_id` is `None` for
/// top-level comments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
