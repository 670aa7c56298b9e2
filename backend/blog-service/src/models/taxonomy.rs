use serde::Serialize;
use uuid::Uuid;

use super::{Localized, PostSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
    pub description: Localized,
    pub order_index: i32,
}

/// Active category with the number of posts referencing it. The count is
/// taken over every post row, published or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    pub slug: String,
    pub name: Localized,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagWithCount {
    #[serde(flatten)]
    pub tag: Tag,
    pub post_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: Localized,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPosts {
    pub category: Category,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPosts {
    pub tag: Tag,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPosts {
    pub author: Author,
    pub post_count: i64,
    pub posts: Vec<PostSummary>,
}
