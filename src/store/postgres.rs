use super::PostStore;
use crate::models::{NewPost, Post};
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    /// Open a pool, verify it, and apply the embedded migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database pool ready (max_connections={})", max_connections);

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, name, prompt, photo_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, prompt, photo_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.name)
        .bind(&post.prompt)
        .bind(&post.photo_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert post: {}", e);
            Error::PersistenceFailed(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    #[ignore] // Requires DATABASE_URL pointing at a disposable Postgres
    async fn test_insert_post_round_trip() {
        let database_url = std::env::var("DATABASE_URL").unwrap();
        let store = PgPostStore::connect(&database_url, 2, Duration::from_secs(5))
            .await
            .unwrap();

        let before = Utc::now();
        let post = store
            .insert_post(NewPost {
                name: "ada".to_string(),
                prompt: "a lighthouse at dusk".to_string(),
                photo_url: "https://replicate.delivery/xezq/lighthouse.webp".to_string(),
            })
            .await
            .unwrap();

        assert!(!post.id.is_nil());
        assert_eq!(post.name, "ada");
        assert_eq!(post.prompt, "a lighthouse at dusk");
        assert_eq!(
            post.photo_url,
            "https://replicate.delivery/xezq/lighthouse.webp"
        );
        assert!(post.created_at >= before - chrono::Duration::seconds(60));
        assert!(post.created_at <= Utc::now() + chrono::Duration::seconds(60));

        let second = store
            .insert_post(NewPost {
                name: "ada".to_string(),
                prompt: "a lighthouse at dusk".to_string(),
                photo_url: "https://replicate.delivery/xezq/lighthouse.webp".to_string(),
            })
            .await
            .unwrap();
        assert_ne!(second.id, post.id);
    }
}
