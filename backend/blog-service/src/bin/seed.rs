//! Database seed script for demo blog content
//! Run with: cargo run --bin seed

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use blog_service::config::Config;
use blog_service::db::Database;
use blog_service::middleware::{encode_session, Claims, SessionRole};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    println!("Connecting to database...");
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;
    println!("Connected successfully!");

    let pool = &db.pg;

    let jane = upsert_author(
        pool,
        "jane-doe",
        "Jane Doe",
        json!({ "en": "Creative director.", "fr": "Directrice de création." }),
    )
    .await?;
    let omar = upsert_author(
        pool,
        "omar-haddad",
        "Omar Haddad",
        json!({ "en": "Lead engineer.", "ar": "كبير المهندسين." }),
    )
    .await?;

    let design = upsert_category(
        pool,
        "design",
        json!({ "en": "Design", "fr": "Design", "ar": "تصميم" }),
        1,
    )
    .await?;
    let engineering = upsert_category(
        pool,
        "engineering",
        json!({ "en": "Engineering", "fr": "Ingénierie", "ar": "هندسة" }),
        2,
    )
    .await?;

    let branding = upsert_tag(pool, "branding", json!({ "en": "Branding", "fr": "Image de marque" })).await?;
    let rust = upsert_tag(pool, "rust", json!({ "en": "Rust" })).await?;
    upsert_tag(pool, "typography", json!({ "en": "Typography", "fr": "Typographie" })).await?;

    let posts = [
        ("rebranding-a-bakery", "Rebranding a bakery", jane, design, true, true, vec![branding]),
        ("logo-grids", "Logo grids that scale", jane, design, true, false, vec![branding]),
        ("async-rust-in-production", "Async Rust in production", omar, engineering, true, false, vec![rust]),
        ("draft-design-tokens", "Design tokens (draft)", jane, design, false, false, vec![]),
    ];

    let mut first_post = None;
    for (index, (slug, title, author, category, published, featured, tags)) in
        posts.into_iter().enumerate()
    {
        let post_id = upsert_post(
            pool,
            slug,
            title,
            author,
            category,
            published,
            featured,
            Duration::days(index as i64),
        )
        .await?;
        for tag_id in tags {
            sqlx::query(
                "INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(post_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        }
        first_post.get_or_insert(post_id);
        println!("Post ready: {}", slug);
    }

    if let Some(post_id) = first_post {
        seed_comments(pool, post_id).await?;
    }

    let now = Utc::now().timestamp();
    let token = encode_session(
        &Claims {
            sub: Uuid::new_v4().to_string(),
            email: "admin@agency.dev".to_string(),
            role: SessionRole::Admin,
            exp: (now + 7 * 24 * 3600) as usize,
            iat: now as usize,
        },
        &config.auth.jwt_secret,
    )?;

    println!("\n========================================");
    println!("Demo content ready!");
    println!("========================================");
    println!("Admin session token (7 days):\n{}", token);
    println!("========================================");

    db.close().await;
    Ok(())
}

async fn upsert_author(
    pool: &PgPool,
    slug: &str,
    name: &str,
    bio: serde_json::Value,
) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO authors (slug, name, bio)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, bio = EXCLUDED.bio
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(name)
    .bind(Json(bio))
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_category(
    pool: &PgPool,
    slug: &str,
    name: serde_json::Value,
    order_index: i32,
) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO categories (slug, name, order_index)
        VALUES ($1, $2, $3)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name, order_index = EXCLUDED.order_index
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(Json(name))
    .bind(order_index)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_tag(pool: &PgPool, slug: &str, name: serde_json::Value) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO tags (slug, name)
        VALUES ($1, $2)
        ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(Json(name))
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
async fn upsert_post(
    pool: &PgPool,
    slug: &str,
    title: &str,
    author_id: Uuid,
    category_id: Uuid,
    published: bool,
    featured: bool,
    age: Duration,
) -> anyhow::Result<Uuid> {
    let published_at = published.then(|| Utc::now() - age);
    let id = sqlx::query_scalar(
        r#"
        INSERT INTO posts
            (slug, title, excerpt, content, published, published_at, featured, author_id, category_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (slug) DO UPDATE SET
            title = EXCLUDED.title,
            published = EXCLUDED.published,
            published_at = EXCLUDED.published_at,
            featured = EXCLUDED.featured,
            updated_at = NOW()
        RETURNING id
        "#,
    )
    .bind(slug)
    .bind(Json(json!({ "en": title })))
    .bind(Json(json!({ "en": format!("{title}: a short look.") })))
    .bind(Json(json!({ "en": format!("# {title}\n\nNotes from the studio.") })))
    .bind(published)
    .bind(published_at)
    .bind(featured)
    .bind(author_id)
    .bind(category_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_comments(pool: &PgPool, post_id: Uuid) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Comments already seeded, skipping");
        return Ok(());
    }

    let parent: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO comments (post_id, author_name, content, approved)
        VALUES ($1, 'Sam', 'Love the new wordmark.', TRUE)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO comments (post_id, parent_id, author_name, content, approved)
        VALUES ($1, $2, 'Jane Doe', 'Thanks Sam!', TRUE),
               ($1, NULL, 'Anonymous', 'Pending moderation.', FALSE)
        "#,
    )
    .bind(post_id)
    .bind(parent)
    .execute(pool)
    .await?;

    println!("Comments seeded");
    Ok(())
}
