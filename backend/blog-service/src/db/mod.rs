use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

#[derive(Clone)]
pub struct Database {
    pub pg: PgPool,
}

impl Database {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pg = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
            .connect(&config.database.url)
            .await?;

        tracing::info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool established"
        );

        Ok(Self { pg })
    }

    pub async fn run_migrations(&self) -> anyhow::Result<()> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pg)
            .await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    pub async fn close(&self) {
        self.pg.close().await;
        tracing::info!("PostgreSQL connection pool closed");
    }
}
