use super::parse_absolute_url;
use crate::models::{NewPost, Post};
use crate::store::PostStore;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Validates and persists gallery posts.
#[derive(Clone)]
pub struct PostGateway {
    store: Arc<dyn PostStore>,
}

impl PostGateway {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn create_post(&self, name: &str, prompt: &str, photo_url: &str) -> Result<Post> {
        let new_post = validate(name, prompt, photo_url)?;

        let post = self.store.insert_post(new_post).await.map_err(|e| {
            error!("Failed to create post: {}", e);
            match e {
                Error::PersistenceFailed(_) => e,
                other => Error::PersistenceFailed(other.message()),
            }
        })?;

        info!("Created post {} by {}", post.id, post.name);
        Ok(post)
    }
}

fn validate(name: &str, prompt: &str, photo_url: &str) -> Result<NewPost> {
    let fields = [("name", name), ("prompt", prompt), ("photo", photo_url)];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let photo_url = photo_url.trim();
    if parse_absolute_url(photo_url).is_none() {
        return Err(Error::InvalidInput(format!(
            "photo must be an absolute URL, got '{}'",
            photo_url
        )));
    }

    Ok(NewPost {
        name: name.trim().to_string(),
        prompt: prompt.trim().to_string(),
        photo_url: photo_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockPostStore;
    use pretty_assertions::assert_eq;

    fn gateway(store: &MockPostStore) -> PostGateway {
        PostGateway::new(Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_create_post_returns_stored_fields() {
        let store = MockPostStore::new();
        let post = gateway(&store)
            .create_post("ada", "a cat", "https://example.com/x.png")
            .await
            .unwrap();

        assert_eq!(post.name, "ada");
        assert_eq!(post.prompt, "a cat");
        assert_eq!(post.photo_url, "https://example.com/x.png");
        assert_eq!(store.get_posts(), vec![post]);
    }

    #[tokio::test]
    async fn test_empty_name_rejected_before_store() {
        let store = MockPostStore::new();
        let err = gateway(&store)
            .create_post("", "a cat", "https://x")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.message().contains("name"));
        assert_eq!(store.get_insert_count(), 0);
    }

    #[test]
    fn test_reports_every_missing_field() {
        let err = validate(" ", "", "").unwrap_err();
        assert_eq!(
            err.message(),
            "Missing required fields: name, prompt, photo"
        );
    }

    #[tokio::test]
    async fn test_photo_must_be_absolute_url() {
        let store = MockPostStore::new();
        let err = gateway(&store)
            .create_post("ada", "a cat", "example.com/x.png")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(store.get_insert_count(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_failed() {
        let store = MockPostStore::new().with_failure("connection reset by peer".to_string());
        let err = gateway(&store)
            .create_post("ada", "a cat", "https://example.com/x.png")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::PersistenceFailed(_)));
        assert_eq!(err.message(), "connection reset by peer");
    }
}
