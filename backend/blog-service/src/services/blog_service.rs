// Blog service - assembles posts, taxonomy and comments from the repository
use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::comments::build_comment_tree;
use crate::error::{AppError, Result};
use crate::models::{
    AuthorPosts, CategoryPosts, CategoryWithCount, Page, Paginated, PostDetail, PostFilter,
    PostRecord, PostSummary, SearchTerm, Tag, TagPosts, TagWithCount,
};
use crate::repository::BlogRepository;

/// Number of related posts attached to a post detail.
pub const RELATED_POSTS_LIMIT: i64 = 3;

#[derive(Debug, Clone)]
pub struct ListPostsParams {
    pub page: Page,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    /// Locale whose title/content the search term is matched against.
    pub locale: String,
}

pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }

    /// List published posts with author, category and tags
    pub async fn list_posts(&self, params: ListPostsParams) -> Result<Paginated<Vec<PostSummary>>> {
        let filter = PostFilter {
            search: params.search.map(|term| SearchTerm {
                term,
                locale: params.locale,
            }),
            category_slug: params.category,
            tag_slug: params.tag,
            featured: params.featured,
            ..Default::default()
        };

        let mut posts = self.repo.list_published_posts(&filter, params.page).await?;
        let total = self.repo.count_published_posts(&filter).await?;
        self.attach_tags(&mut posts).await?;

        Ok(Paginated {
            items: posts,
            page: params.page,
            total,
        })
    }

    /// Resolve tags for a whole page with a single lookup.
    async fn attach_tags(&self, posts: &mut [PostSummary]) -> Result<()> {
        if posts.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let mut by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (post_id, tag) in self.repo.tags_for_posts(&ids).await? {
            by_post.entry(post_id).or_default().push(tag);
        }

        for post in posts.iter_mut() {
            post.tags = Some(by_post.remove(&post.id).unwrap_or_default());
        }
        Ok(())
    }

    /// Get a published post by slug and count the view
    pub async fn get_post(&self, slug: &str) -> Result<PostDetail> {
        let PostRecord {
            summary,
            content,
            updated_at,
        } = self
            .repo
            .find_published_post(slug)
            .await?
            .ok_or(AppError::NotFound("Post"))?;

        let mut posts = [summary];
        self.attach_tags(&mut posts).await?;
        let [mut summary] = posts;
        let post_id = summary.id;

        let comments = build_comment_tree(self.repo.approved_comments(post_id).await?);

        let related_posts = match self
            .repo
            .recent_posts_excluding(post_id, RELATED_POSTS_LIMIT)
            .await
        {
            Ok(posts) => posts,
            Err(e) => {
                warn!(%post_id, error = ?e, "Related posts lookup failed");
                Vec::new()
            }
        };

        match self.repo.increment_view_count(post_id).await {
            Ok(views) => summary.view_count = views,
            Err(e) => warn!(%post_id, error = ?e, "Failed to record post view"),
        }

        Ok(PostDetail {
            summary,
            content,
            updated_at,
            comments,
            related_posts,
        })
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryWithCount>> {
        Ok(self.repo.list_active_categories().await?)
    }

    /// Active category with its published posts
    pub async fn get_category(&self, slug: &str, page: Page) -> Result<Paginated<CategoryPosts>> {
        let category = self
            .repo
            .find_active_category(slug)
            .await?
            .ok_or(AppError::NotFound("Category"))?;

        let filter = PostFilter {
            category_id: Some(category.id),
            ..Default::default()
        };
        let posts = self.repo.list_published_posts(&filter, page).await?;
        let total = self.repo.count_published_posts(&filter).await?;

        Ok(Paginated {
            items: CategoryPosts { category, posts },
            page,
            total,
        })
    }

    pub async fn list_tags(&self) -> Result<Vec<TagWithCount>> {
        Ok(self.repo.list_tags().await?)
    }

    /// Tag with its published posts, resolved through the post/tag join
    pub async fn get_tag(&self, slug: &str, page: Page) -> Result<Paginated<TagPosts>> {
        let tag = self
            .repo
            .find_tag(slug)
            .await?
            .ok_or(AppError::NotFound("Tag"))?;

        let post_ids = self.repo.post_ids_for_tag(tag.id).await?;
        if post_ids.is_empty() {
            return Ok(Paginated {
                items: TagPosts {
                    tag,
                    posts: Vec::new(),
                },
                page,
                total: 0,
            });
        }

        let filter = PostFilter {
            post_ids: Some(post_ids),
            ..Default::default()
        };
        let posts = self.repo.list_published_posts(&filter, page).await?;
        let total = self.repo.count_published_posts(&filter).await?;

        Ok(Paginated {
            items: TagPosts { tag, posts },
            page,
            total,
        })
    }

    /// Active author with published post count and posts
    pub async fn get_author(&self, slug: &str, page: Page) -> Result<Paginated<AuthorPosts>> {
        let author = self
            .repo
            .find_active_author(slug)
            .await?
            .ok_or(AppError::NotFound("Author"))?;

        let filter = PostFilter {
            author_id: Some(author.id),
            ..Default::default()
        };
        let post_count = self.repo.count_published_posts(&filter).await?;
        let posts = self.repo.list_published_posts(&filter, page).await?;

        Ok(Paginated {
            items: AuthorPosts {
                author,
                post_count,
                posts,
            },
            page,
            total: post_count,
        })
    }

    pub async fn approve_comment(&self, comment_id: Uuid) -> Result<()> {
        if !self.repo.approve_comment(comment_id).await? {
            return Err(AppError::NotFound("Comment"));
        }
        Ok(())
    }
}
