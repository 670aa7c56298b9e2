use anyhow::Result;
use uuid::Uuid;

use crate::models::{
    Author, Category, CategoryWithCount, Comment, Inquiry, NewInquiry, Page, PostFilter,
    PostRecord, PostSummary, Tag, TagWithCount,
};

/// Read access to blog content, plus the two writes the read paths and the
/// moderation surface need (view counter, comment approval).
///
/// `PostgresBlogRepository` is the production implementation; services only
/// see this trait so the store can be swapped in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BlogRepository: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    /// Published posts matching `filter`, newest first.
    async fn list_published_posts(&self, filter: &PostFilter, page: Page)
        -> Result<Vec<PostSummary>>;

    /// Number of published posts matching `filter`.
    async fn count_published_posts(&self, filter: &PostFilter) -> Result<i64>;

    /// Tags of every post in `post_ids`, as `(post_id, tag)` pairs.
    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>>;

    async fn find_published_post(&self, slug: &str) -> Result<Option<PostRecord>>;

    /// All approved comments of a post, newest first.
    async fn approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    /// Most recent published posts other than `post_id`.
    async fn recent_posts_excluding(&self, post_id: Uuid, limit: i64) -> Result<Vec<PostSummary>>;

    /// Adds one view and returns the stored count.
    async fn increment_view_count(&self, post_id: Uuid) -> Result<i64>;

    async fn list_active_categories(&self) -> Result<Vec<CategoryWithCount>>;

    async fn find_active_category(&self, slug: &str) -> Result<Option<Category>>;

    async fn list_tags(&self) -> Result<Vec<TagWithCount>>;

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>>;

    async fn post_ids_for_tag(&self, tag_id: Uuid) -> Result<Vec<Uuid>>;

    async fn find_active_author(&self, slug: &str) -> Result<Option<Author>>;

    /// Returns false when no comment has that id.
    async fn approve_comment(&self, comment_id: Uuid) -> Result<bool>;
}

/// Persistence for contact form submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait InquiryRepository: Send + Sync {
    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry>;

    async fn list_inquiries(&self, page: Page) -> Result<Vec<Inquiry>>;

    async fn count_inquiries(&self) -> Result<i64>;
}
