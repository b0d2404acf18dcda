//! Data models and structures
//!
//! Defines the persisted post record and the JSON bodies exchanged with the
//! gallery frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated image shared to the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub name: String,
    pub prompt: String,
    #[serde(rename = "photo")]
    pub photo_url: String,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a post that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub name: String,
    pub prompt: String,
    pub photo_url: String,
}

/// Fixed image-quality parameters sent with every prompt.
///
/// | option | effect |
/// |---|---|
/// | `num_inference_steps` | sampling steps |
/// | `guidance` | prompt adherence |
/// | `aspect_ratio` | output shape (square) |
/// | `output_format` | web-optimized encoding |
/// | `output_quality` | compression level |
/// | `safety_tolerance` | provider content-safety threshold |
/// | `prompt_upsampling` | provider-side prompt expansion |
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationInput {
    pub prompt: String,
    pub num_inference_steps: u32,
    pub guidance: f32,
    pub aspect_ratio: &'static str,
    pub output_format: &'static str,
    pub output_quality: u8,
    pub safety_tolerance: u8,
    pub prompt_upsampling: bool,
}

impl GenerationInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            num_inference_steps: 28,
            guidance: 3.0,
            aspect_ratio: "1:1",
            output_format: "webp",
            output_quality: 80,
            safety_tolerance: 2,
            prompt_upsampling: true,
        }
    }
}

// HTTP request/response bodies
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub photo: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub data: Post,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
