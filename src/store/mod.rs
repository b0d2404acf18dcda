//! Post persistence
//!
//! Posts live in Postgres in production; tests use the in-memory double.

pub mod mock;
pub mod postgres;

pub use mock::MockPostStore;
pub use postgres::PgPostStore;

use crate::models::{NewPost, Post};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a validated post; the store assigns `id` and `created_at`.
    async fn insert_post(&self, post: NewPost) -> Result<Post>;
}
