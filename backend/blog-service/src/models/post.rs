use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Comment, Localized, Tag};

/// Author fields embedded in post views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRef {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub avatar: Option<String>,
}

/// Category fields embedded in post views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
}

/// Post row joined with its author and category, used by every list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: Localized,
    pub excerpt: Localized,
    pub cover_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: i64,
    pub featured: bool,
    pub author: Option<AuthorRef>,
    pub category: Option<CategoryRef>,
    /// Only populated by views that resolve tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    pub created_at: DateTime<Utc>,
}

/// Full post as loaded for the detail view, before comments and related
/// posts are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub summary: PostSummary,
    pub content: Localized,
    pub updated_at: DateTime<Utc>,
}

/// Top-level comment with its approved replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub content: Localized,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<CommentThread>,
    pub related_posts: Vec<PostSummary>,
}
