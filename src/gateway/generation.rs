use super::parse_absolute_url;
use crate::ai::{ImageProvider, ProviderOutput};
use crate::models::GenerationInput;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Turns a prompt into a provider-hosted image URL.
#[derive(Clone)]
pub struct GenerationGateway {
    provider: Arc<dyn ImageProvider>,
}

impl GenerationGateway {
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider }
    }

    /// Generate one image for `prompt`.
    ///
    /// Blank prompts fail with [`Error::InvalidInput`] without calling the
    /// provider. Every other failure is reported as
    /// [`Error::GenerationFailed`].
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::InvalidInput("Please provide a prompt".to_string()));
        }

        let input = GenerationInput::new(prompt);
        let outcome = match self.provider.run(&input).await {
            Ok(output) => normalize_output(output),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(url) => {
                info!("Generated image for prompt ({} chars): {}", prompt.len(), url);
                Ok(url)
            }
            Err(e) => {
                error!("Image generation failed: {}", e);
                Err(Error::GenerationFailed(e.to_string()))
            }
        }
    }
}

/// Reduce a provider output to a single absolute URL string.
pub fn normalize_output(output: ProviderOutput) -> Result<String> {
    debug!("Normalizing provider output: {}", output.describe());

    let candidate = match output {
        ProviderOutput::File(file) => file.url()?.to_string(),
        ProviderOutput::List(items) => items.into_iter().next().unwrap_or_default(),
        other @ ProviderOutput::Other(_) => {
            return Err(Error::UnexpectedProviderFormat(other.describe()));
        }
    };

    let candidate = candidate.trim();
    if candidate.is_empty() || parse_absolute_url(candidate).is_none() {
        return Err(Error::EmptyOrInvalidUrl(format!("'{}'", candidate)));
    }

    Ok(candidate.to_string())
}
