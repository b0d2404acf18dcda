//! Image-generation provider integration
//!
//! Provides the provider seam used by the generation gateway, the Replicate
//! HTTP implementation, and an in-memory double for tests.

pub mod mock;
pub mod output;
pub mod replicate;

pub use mock::MockImageProvider;
pub use output::{FileOutput, ProviderOutput};
pub use replicate::ReplicateImageClient;

use crate::models::GenerationInput;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Run one generation to completion and return the raw provider output.
    async fn run(&self, input: &GenerationInput) -> Result<ProviderOutput>;
}
