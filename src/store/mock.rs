use super::PostStore;
use crate::models::{NewPost, Post};
use crate::{Error, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Clone)]
pub struct MockPostStore {
    posts: Arc<Mutex<Vec<Post>>>,
    failure: Arc<Mutex<Option<String>>>,
    insert_count: Arc<Mutex<usize>>,
}

impl MockPostStore {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            insert_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Make every insert fail with the given store message.
    pub fn with_failure(self, message: String) -> Self {
        *self.failure.lock().unwrap() = Some(message);
        self
    }

    pub fn get_insert_count(&self) -> usize {
        *self.insert_count.lock().unwrap()
    }

    pub fn get_posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

impl Default for MockPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post> {
        *self.insert_count.lock().unwrap() += 1;

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::PersistenceFailed(message));
        }

        let stored = Post {
            id: Uuid::new_v4(),
            name: post.name,
            prompt: post.prompt,
            photo_url: post.photo_url,
            created_at: Utc::now(),
        };
        self.posts.lock().unwrap().push(stored.clone());
        Ok(stored)
    }
}
