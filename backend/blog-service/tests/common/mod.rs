//! In-memory store and router harness shared by the API tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use tower::ServiceExt;
use uuid::Uuid;

use blog_service::config::Config;
use blog_service::models::{
    Author, AuthorRef, Category, CategoryRef, CategoryWithCount, Comment, Inquiry, Localized,
    NewInquiry, Page, PostFilter, PostRecord, PostSummary, Tag, TagWithCount,
};
use blog_service::repository::{BlogRepository, InquiryRepository};
use blog_service::{router, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct StoredPost {
    pub id: Uuid,
    pub slug: String,
    pub title: Localized,
    pub content: Localized,
    pub published: bool,
    pub featured: bool,
    pub view_count: i64,
    pub author_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub published_at: Option<DateTime<Utc>>,
}

pub struct StoredComment {
    pub comment: Comment,
    pub approved: bool,
}

#[derive(Default)]
pub struct Data {
    pub authors: Vec<(Author, bool)>,
    pub categories: Vec<(Category, bool)>,
    pub tags: Vec<Tag>,
    pub posts: Vec<StoredPost>,
    pub post_tags: Vec<(Uuid, Uuid)>,
    pub comments: Vec<StoredComment>,
    pub inquiries: Vec<Inquiry>,
}

#[derive(Default)]
pub struct MemoryStore {
    pub data: Mutex<Data>,
}

fn localized(text: &str) -> Localized {
    [("en", text)].into_iter().collect()
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
}

impl MemoryStore {
    pub fn add_author(&self, slug: &str, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().authors.push((
            Author {
                id,
                slug: slug.into(),
                name: slug.to_uppercase(),
                avatar: None,
                bio: Localized::default(),
            },
            active,
        ));
        id
    }

    pub fn add_category(&self, slug: &str, order_index: i32, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().categories.push((
            Category {
                id,
                slug: slug.into(),
                name: localized(slug),
                description: Localized::default(),
                order_index,
            },
            active,
        ));
        id
    }

    pub fn add_tag(&self, slug: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().tags.push(Tag {
            id,
            slug: slug.into(),
            name: localized(slug),
        });
        id
    }

    /// `day` orders posts: higher is more recent.
    pub fn add_post(
        &self,
        slug: &str,
        title: &str,
        published: bool,
        day: i64,
        author_id: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().posts.push(StoredPost {
            id,
            slug: slug.into(),
            title: localized(title),
            content: localized(&format!("Body of {title}")),
            published,
            featured: false,
            view_count: 0,
            author_id,
            category_id,
            published_at: published.then(|| epoch() + Duration::days(day)),
        });
        id
    }

    pub fn set_featured(&self, post_id: Uuid) {
        let mut data = self.data.lock().unwrap();
        if let Some(post) = data.posts.iter_mut().find(|p| p.id == post_id) {
            post.featured = true;
        }
    }

    pub fn tag_post(&self, post_id: Uuid, tag_id: Uuid) {
        self.data.lock().unwrap().post_tags.push((post_id, tag_id));
    }

    pub fn add_comment(
        &self,
        post_id: Uuid,
        parent_id: Option<Uuid>,
        minute: i64,
        approved: bool,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.data.lock().unwrap().comments.push(StoredComment {
            comment: Comment {
                id,
                post_id,
                parent_id,
                author_name: "reader".into(),
                content: "Nice post".into(),
                created_at: epoch() + Duration::minutes(minute),
            },
            approved,
        });
        id
    }

    pub fn is_approved(&self, comment_id: Uuid) -> bool {
        self.data
            .lock()
            .unwrap()
            .comments
            .iter()
            .any(|c| c.comment.id == comment_id && c.approved)
    }

    fn summary(data: &Data, post: &StoredPost) -> PostSummary {
        let author = post
            .author_id
            .and_then(|id| data.authors.iter().find(|(a, _)| a.id == id))
            .map(|(a, _)| AuthorRef {
                id: a.id,
                slug: a.slug.clone(),
                name: a.name.clone(),
                avatar: a.avatar.clone(),
            });
        let category = post
            .category_id
            .and_then(|id| data.categories.iter().find(|(c, _)| c.id == id))
            .map(|(c, _)| CategoryRef {
                id: c.id,
                slug: c.slug.clone(),
                name: c.name.clone(),
            });

        PostSummary {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: Localized::default(),
            cover_image: None,
            published: post.published,
            published_at: post.published_at,
            view_count: post.view_count,
            featured: post.featured,
            author,
            category,
            tags: None,
            created_at: epoch(),
        }
    }

    fn matches(data: &Data, post: &StoredPost, filter: &PostFilter) -> bool {
        if !post.published {
            return false;
        }
        if let Some(search) = &filter.search {
            let needle = search.term.to_lowercase();
            let hit = |field: &Localized| {
                field
                    .get(&search.locale)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            };
            if !hit(&post.title) && !hit(&post.content) {
                return false;
            }
        }
        if let Some(slug) = &filter.category_slug {
            let in_category = data
                .categories
                .iter()
                .any(|(c, _)| Some(c.id) == post.category_id && &c.slug == slug);
            if !in_category {
                return false;
            }
        }
        if filter.category_id.is_some() && filter.category_id != post.category_id {
            return false;
        }
        if let Some(slug) = &filter.tag_slug {
            let tagged = data.post_tags.iter().any(|(post_id, tag_id)| {
                *post_id == post.id && data.tags.iter().any(|t| t.id == *tag_id && &t.slug == slug)
            });
            if !tagged {
                return false;
            }
        }
        if filter.author_id.is_some() && filter.author_id != post.author_id {
            return false;
        }
        if let Some(ids) = &filter.post_ids {
            if !ids.contains(&post.id) {
                return false;
            }
        }
        if let Some(featured) = filter.featured {
            if post.featured != featured {
                return false;
            }
        }
        true
    }

    fn filtered(data: &Data, filter: &PostFilter) -> Vec<PostSummary> {
        let mut posts: Vec<&StoredPost> = data
            .posts
            .iter()
            .filter(|p| Self::matches(data, p, filter))
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        posts.into_iter().map(|p| Self::summary(data, p)).collect()
    }
}

#[async_trait::async_trait]
impl BlogRepository for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn list_published_posts(
        &self,
        filter: &PostFilter,
        page: Page,
    ) -> Result<Vec<PostSummary>> {
        let data = self.data.lock().unwrap();
        Ok(Self::filtered(&data, filter)
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn count_published_posts(&self, filter: &PostFilter) -> Result<i64> {
        let data = self.data.lock().unwrap();
        Ok(Self::filtered(&data, filter).len() as i64)
    }

    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .post_tags
            .iter()
            .filter(|(post_id, _)| post_ids.contains(post_id))
            .filter_map(|(post_id, tag_id)| {
                data.tags
                    .iter()
                    .find(|t| t.id == *tag_id)
                    .map(|t| (*post_id, t.clone()))
            })
            .collect())
    }

    async fn find_published_post(&self, slug: &str) -> Result<Option<PostRecord>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .posts
            .iter()
            .find(|p| p.published && p.slug == slug)
            .map(|p| PostRecord {
                summary: Self::summary(&data, p),
                content: p.content.clone(),
                updated_at: epoch(),
            }))
    }

    async fn approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .comments
            .iter()
            .filter(|c| c.approved && c.comment.post_id == post_id)
            .map(|c| c.comment.clone())
            .collect())
    }

    async fn recent_posts_excluding(
        &self,
        post_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        let data = self.data.lock().unwrap();
        Ok(Self::filtered(&data, &PostFilter::default())
            .into_iter()
            .filter(|p| p.id != post_id)
            .take(limit as usize)
            .collect())
    }

    async fn increment_view_count(&self, post_id: Uuid) -> Result<i64> {
        let mut data = self.data.lock().unwrap();
        let post = data
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| anyhow::anyhow!("post {post_id} vanished"))?;
        post.view_count += 1;
        Ok(post.view_count)
    }

    async fn list_active_categories(&self) -> Result<Vec<CategoryWithCount>> {
        let data = self.data.lock().unwrap();
        let mut categories: Vec<CategoryWithCount> = data
            .categories
            .iter()
            .filter(|(_, active)| *active)
            .map(|(c, _)| CategoryWithCount {
                category: c.clone(),
                post_count: data
                    .posts
                    .iter()
                    .filter(|p| p.category_id == Some(c.id))
                    .count() as i64,
            })
            .collect();
        categories.sort_by(|a, b| {
            (a.category.order_index, &a.category.slug)
                .cmp(&(b.category.order_index, &b.category.slug))
        });
        Ok(categories)
    }

    async fn find_active_category(&self, slug: &str) -> Result<Option<Category>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .categories
            .iter()
            .find(|(c, active)| *active && c.slug == slug)
            .map(|(c, _)| c.clone()))
    }

    async fn list_tags(&self) -> Result<Vec<TagWithCount>> {
        let data = self.data.lock().unwrap();
        let mut tags: Vec<TagWithCount> = data
            .tags
            .iter()
            .map(|t| TagWithCount {
                tag: t.clone(),
                post_count: data.post_tags.iter().filter(|(_, id)| *id == t.id).count() as i64,
            })
            .collect();
        tags.sort_by(|a, b| {
            b.post_count
                .cmp(&a.post_count)
                .then_with(|| a.tag.slug.cmp(&b.tag.slug))
        });
        Ok(tags)
    }

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>> {
        let data = self.data.lock().unwrap();
        Ok(data.tags.iter().find(|t| t.slug == slug).cloned())
    }

    async fn post_ids_for_tag(&self, tag_id: Uuid) -> Result<Vec<Uuid>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .post_tags
            .iter()
            .filter(|(_, id)| *id == tag_id)
            .map(|(post_id, _)| *post_id)
            .collect())
    }

    async fn find_active_author(&self, slug: &str) -> Result<Option<Author>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .authors
            .iter()
            .find(|(a, active)| *active && a.slug == slug)
            .map(|(a, _)| a.clone()))
    }

    async fn approve_comment(&self, comment_id: Uuid) -> Result<bool> {
        let mut data = self.data.lock().unwrap();
        match data.comments.iter_mut().find(|c| c.comment.id == comment_id) {
            Some(c) => {
                c.approved = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl InquiryRepository for MemoryStore {
    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry> {
        let stored = Inquiry {
            id: Uuid::new_v4(),
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
            company: inquiry.company.clone(),
            phone: inquiry.phone.clone(),
            message: inquiry.message.clone(),
            inquiry_type: inquiry.inquiry_type,
            locale: inquiry.locale.clone(),
            created_at: Utc::now(),
        };
        self.data.lock().unwrap().inquiries.push(stored.clone());
        Ok(stored)
    }

    async fn list_inquiries(&self, page: Page) -> Result<Vec<Inquiry>> {
        let data = self.data.lock().unwrap();
        Ok(data
            .inquiries
            .iter()
            .rev()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count_inquiries(&self) -> Result<i64> {
        Ok(self.data.lock().unwrap().inquiries.len() as i64)
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    router(AppState {
        repo: store.clone(),
        inquiries: store,
        config: test_config(),
    })
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}
