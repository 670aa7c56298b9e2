use anyhow::{Context, Result};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{BlogRepository, InquiryRepository};
use crate::models::{
    Author, AuthorRef, Category, CategoryRef, CategoryWithCount, Comment, Inquiry, InquiryType,
    Localized, NewInquiry, Page, PostFilter, PostRecord, PostSummary, Tag, TagWithCount,
};
use crate::utils::contains_pattern;

const POST_SUMMARY_COLUMNS: &str = r#"
    p.id, p.slug, p.title, p.excerpt, p.cover_image, p.published, p.published_at,
    p.view_count, p.featured, p.created_at,
    a.id AS author_id, a.slug AS author_slug, a.name AS author_name, a.avatar AS author_avatar,
    c.id AS category_id, c.slug AS category_slug, c.name AS category_name
"#;

const POST_JOINS: &str = r#"
    FROM posts p
    LEFT JOIN authors a ON a.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
"#;

const RECENT_FIRST: &str = " ORDER BY p.published_at DESC NULLS LAST, p.created_at DESC";

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `filter` as `AND` predicates. The builder must already contain a
/// `WHERE` clause over `posts p` joined with `categories c`.
fn push_post_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &PostFilter) {
    if let Some(search) = &filter.search {
        let pattern = contains_pattern(&search.term);
        qb.push(" AND ((p.title ->> ")
            .push_bind(search.locale.clone())
            .push(") ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR (p.content ->> ")
            .push_bind(search.locale.clone())
            .push(") ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(slug) = &filter.category_slug {
        qb.push(" AND c.slug = ").push_bind(slug.clone());
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id);
    }
    if let Some(slug) = &filter.tag_slug {
        qb.push(
            " AND EXISTS (SELECT 1 FROM post_tags pt JOIN tags t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id AND t.slug = ",
        )
        .push_bind(slug.clone())
        .push(")");
    }
    if let Some(author_id) = filter.author_id {
        qb.push(" AND p.author_id = ").push_bind(author_id);
    }
    if let Some(ids) = &filter.post_ids {
        qb.push(" AND p.id = ANY(").push_bind(ids.clone()).push(")");
    }
    if let Some(featured) = filter.featured {
        qb.push(" AND p.featured = ").push_bind(featured);
    }
}

fn localized(row: &PgRow, column: &str) -> Result<Localized, sqlx::Error> {
    Ok(row.try_get::<Json<Localized>, _>(column)?.0)
}

fn post_summary_from_row(row: &PgRow) -> Result<PostSummary, sqlx::Error> {
    let author = match row.try_get::<Option<Uuid>, _>("author_id")? {
        Some(id) => Some(AuthorRef {
            id,
            slug: row.try_get("author_slug")?,
            name: row.try_get("author_name")?,
            avatar: row.try_get("author_avatar")?,
        }),
        None => None,
    };
    let category = match row.try_get::<Option<Uuid>, _>("category_id")? {
        Some(id) => Some(CategoryRef {
            id,
            slug: row.try_get("category_slug")?,
            name: localized(row, "category_name")?,
        }),
        None => None,
    };

    Ok(PostSummary {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        title: localized(row, "title")?,
        excerpt: localized(row, "excerpt")?,
        cover_image: row.try_get("cover_image")?,
        published: row.try_get("published")?,
        published_at: row.try_get("published_at")?,
        view_count: row.try_get("view_count")?,
        featured: row.try_get("featured")?,
        author,
        category,
        tags: None,
        created_at: row.try_get("created_at")?,
    })
}

fn category_from_row(row: &PgRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: localized(row, "name")?,
        description: localized(row, "description")?,
        order_index: row.try_get("order_index")?,
    })
}

fn tag_from_row(row: &PgRow) -> Result<Tag, sqlx::Error> {
    Ok(Tag {
        id: row.try_get("id")?,
        slug: row.try_get("slug")?,
        name: localized(row, "name")?,
    })
}

fn inquiry_from_row(row: &PgRow) -> Result<Inquiry> {
    let inquiry_type: String = row.try_get("inquiry_type")?;
    let inquiry_type = InquiryType::parse(&inquiry_type)
        .with_context(|| format!("unknown inquiry type {inquiry_type}"))?;

    Ok(Inquiry {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        company: row.try_get("company")?,
        phone: row.try_get("phone")?,
        message: row.try_get("message")?,
        inquiry_type,
        locale: row.try_get("locale")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("PostgreSQL health check failed")?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_published_posts(
        &self,
        filter: &PostFilter,
        page: Page,
    ) -> Result<Vec<PostSummary>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT ");
        qb.push(POST_SUMMARY_COLUMNS)
            .push(POST_JOINS)
            .push(" WHERE p.published = TRUE");
        push_post_filters(&mut qb, filter);
        qb.push(RECENT_FIRST)
            .push(" LIMIT ")
            .push_bind(i64::from(page.limit()))
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list published posts")?;

        let posts = rows
            .iter()
            .map(post_summary_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = posts.len(), "Listed published posts");
        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn count_published_posts(&self, filter: &PostFilter) -> Result<i64> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM posts p LEFT JOIN categories c ON c.id = p.category_id \
             WHERE p.published = TRUE",
        );
        push_post_filters(&mut qb, filter);

        let total = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .context("Failed to count published posts")?;
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn tags_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<(Uuid, Tag)>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(
            r#"
            SELECT pt.post_id, t.id, t.slug, t.name
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id = ANY($1)
            ORDER BY t.slug ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load tags for posts")?;

        rows.iter()
            .map(|row| -> Result<(Uuid, Tag)> {
                Ok((row.try_get("post_id")?, tag_from_row(row)?))
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn find_published_post(&self, slug: &str) -> Result<Option<PostRecord>> {
        let query = format!(
            "SELECT {POST_SUMMARY_COLUMNS}, p.content, p.updated_at {POST_JOINS} \
             WHERE p.slug = $1 AND p.published = TRUE"
        );
        let row = sqlx::query(&query)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to find post by slug")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(PostRecord {
            summary: post_summary_from_row(&row)?,
            content: localized(&row, "content")?,
            updated_at: row.try_get("updated_at")?,
        }))
    }

    #[instrument(skip(self))]
    async fn approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, post_id, parent_id, author_name, content, created_at
            FROM comments
            WHERE post_id = $1 AND approved = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load comments")?;

        let comments = rows
            .iter()
            .map(|row| -> Result<Comment, sqlx::Error> {
                Ok(Comment {
                    id: row.try_get("id")?,
                    post_id: row.try_get("post_id")?,
                    parent_id: row.try_get("parent_id")?,
                    author_name: row.try_get("author_name")?,
                    content: row.try_get("content")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(comments)
    }

    #[instrument(skip(self))]
    async fn recent_posts_excluding(&self, post_id: Uuid, limit: i64) -> Result<Vec<PostSummary>> {
        let query = format!(
            "SELECT {POST_SUMMARY_COLUMNS} {POST_JOINS} \
             WHERE p.published = TRUE AND p.id <> $1{RECENT_FIRST} LIMIT $2"
        );
        let rows = sqlx::query(&query)
            .bind(post_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load related posts")?;

        let posts = rows
            .iter()
            .map(post_summary_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn increment_view_count(&self, post_id: Uuid) -> Result<i64> {
        let views: i64 = sqlx::query_scalar(
            r#"
            UPDATE posts
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING view_count
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to increment view count")?;
        Ok(views)
    }

    #[instrument(skip(self))]
    async fn list_active_categories(&self) -> Result<Vec<CategoryWithCount>> {
        // Counts every post row referencing the category, published or not.
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.slug, c.name, c.description, c.order_index,
                   COUNT(p.id) AS post_count
            FROM categories c
            LEFT JOIN posts p ON p.category_id = c.id
            WHERE c.active = TRUE
            GROUP BY c.id
            ORDER BY c.order_index ASC, c.slug ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list categories")?;

        rows.iter()
            .map(|row| -> Result<CategoryWithCount> {
                Ok(CategoryWithCount {
                    category: category_from_row(row)?,
                    post_count: row.try_get("post_count")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn find_active_category(&self, slug: &str) -> Result<Option<Category>> {
        let row = sqlx::query(
            r#"
            SELECT id, slug, name, description, order_index
            FROM categories
            WHERE slug = $1 AND active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find category")?;

        Ok(row.as_ref().map(category_from_row).transpose()?)
    }

    #[instrument(skip(self))]
    async fn list_tags(&self) -> Result<Vec<TagWithCount>> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.slug, t.name, COUNT(pt.post_id) AS post_count
            FROM tags t
            LEFT JOIN post_tags pt ON pt.tag_id = t.id
            GROUP BY t.id
            ORDER BY post_count DESC, t.slug ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list tags")?;

        rows.iter()
            .map(|row| -> Result<TagWithCount> {
                Ok(TagWithCount {
                    tag: tag_from_row(row)?,
                    post_count: row.try_get("post_count")?,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>> {
        let row = sqlx::query("SELECT id, slug, name FROM tags WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to find tag")?;

        Ok(row.as_ref().map(tag_from_row).transpose()?)
    }

    #[instrument(skip(self))]
    async fn post_ids_for_tag(&self, tag_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar("SELECT post_id FROM post_tags WHERE tag_id = $1")
            .bind(tag_id)
            .fetch_all(&self.pool)
            .await
            .context("Failed to resolve tagged posts")?;
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn find_active_author(&self, slug: &str) -> Result<Option<Author>> {
        let row = sqlx::query(
            r#"
            SELECT id, slug, name, avatar, bio
            FROM authors
            WHERE slug = $1 AND active = TRUE
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to find author")?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Author {
            id: row.try_get("id")?,
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            avatar: row.try_get("avatar")?,
            bio: localized(&row, "bio")?,
        }))
    }

    #[instrument(skip(self))]
    async fn approve_comment(&self, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query("UPDATE comments SET approved = TRUE WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .context("Failed to approve comment")?;

        debug!(%comment_id, rows = result.rows_affected(), "Approved comment");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl InquiryRepository for PostgresBlogRepository {
    #[instrument(skip_all)]
    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> Result<Inquiry> {
        let row = sqlx::query(
            r#"
            INSERT INTO inquiries (name, email, company, phone, message, inquiry_type, locale)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, email, company, phone, message, inquiry_type, locale, created_at
            "#,
        )
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.company)
        .bind(&inquiry.phone)
        .bind(&inquiry.message)
        .bind(inquiry.inquiry_type.as_str())
        .bind(&inquiry.locale)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert inquiry")?;

        inquiry_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn list_inquiries(&self, page: Page) -> Result<Vec<Inquiry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, company, phone, message, inquiry_type, locale, created_at
            FROM inquiries
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list inquiries")?;

        rows.iter().map(inquiry_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn count_inquiries(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count inquiries")?;
        Ok(total)
    }
}
