use super::client::ReplicateHttpClient;
use super::types::{Prediction, PredictionRequest, PredictionStatus};
use crate::ai::{ImageProvider, ProviderOutput};
use crate::config::Config;
use crate::models::GenerationInput;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Where a prediction for the configured model is created.
#[derive(Debug, Clone, PartialEq)]
enum ModelRef {
    /// `owner/name`, served by the model's latest version.
    Official { owner: String, name: String },
    /// `owner/name:version`, pinned to one version hash.
    Version(String),
}

impl ModelRef {
    fn parse(model: &str) -> Result<Self> {
        let model = model.trim();
        let (path, version) = match model.split_once(':') {
            Some((path, version)) => (path, Some(version)),
            None => (model, None),
        };

        let (owner, name) = path
            .split_once('/')
            .filter(|(owner, name)| !owner.is_empty() && !name.is_empty() && !name.contains('/'))
            .ok_or_else(|| {
                Error::Config(format!(
                    "Replicate model '{}' must look like owner/name[:version]",
                    model
                ))
            })?;

        match version {
            Some(version) if !version.is_empty() => Ok(ModelRef::Version(version.to_string())),
            Some(_) => Err(Error::Config(format!(
                "Replicate model '{}' has an empty version",
                model
            ))),
            None => Ok(ModelRef::Official {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
        }
    }
}

pub struct ReplicateImageClient {
    http: ReplicateHttpClient,
    model: String,
    model_ref: ModelRef,
    poll_interval: Duration,
}

impl ReplicateImageClient {
    /// Fails with [`Error::Config`] when `model` is not `owner/name[:version]`.
    pub fn new(http: ReplicateHttpClient, model: &str, poll_interval: Duration) -> Result<Self> {
        let model_ref = ModelRef::parse(model)?;
        Ok(Self {
            http,
            model: model.trim().to_string(),
            model_ref,
            poll_interval,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = ReplicateHttpClient::new(
            config.replicate_api_token.clone(),
            config.provider_timeout,
        )?
        .with_base_url(config.replicate_base_url.clone());

        Self::new(http, &config.replicate_model, config.poll_interval)
    }

    async fn create_prediction(&self, input: &GenerationInput) -> Result<Prediction> {
        match &self.model_ref {
            ModelRef::Official { owner, name } => {
                let path = format!("/v1/models/{}/{}/predictions", owner, name);
                let request = PredictionRequest {
                    version: None,
                    input,
                };
                self.http.post(&path, &request).await
            }
            ModelRef::Version(version) => {
                let request = PredictionRequest {
                    version: Some(version.as_str()),
                    input,
                };
                self.http.post("/v1/predictions", &request).await
            }
        }
    }

    async fn wait_for_completion(&self, mut prediction: Prediction) -> Result<Prediction> {
        while !prediction.status.is_terminal() {
            let poll_url = prediction
                .urls
                .as_ref()
                .and_then(|urls| urls.get.clone())
                .ok_or_else(|| {
                    Error::AiProvider(format!(
                        "Prediction {} is {:?} but has no polling URL",
                        prediction.id, prediction.status
                    ))
                })?;

            tracing::debug!(
                "Prediction {} is {:?}; polling again in {:?}",
                prediction.id,
                prediction.status,
                self.poll_interval
            );
            tokio::time::sleep(self.poll_interval).await;
            prediction = self.http.get_url(&poll_url).await?;
        }

        Ok(prediction)
    }
}

#[async_trait]
impl ImageProvider for ReplicateImageClient {
    async fn run(&self, input: &GenerationInput) -> Result<ProviderOutput> {
        tracing::debug!("Creating Replicate prediction with model {}", self.model);

        let created = self.create_prediction(input).await?;
        let prediction = self.wait_for_completion(created).await?;

        match prediction.status {
            PredictionStatus::Succeeded => {
                let output = ProviderOutput::from_value(prediction.output.unwrap_or(Value::Null));
                tracing::debug!(
                    "Prediction {} succeeded with {} output",
                    prediction.id,
                    output.describe()
                );
                Ok(output)
            }
            status => Err(Error::AiProvider(format!(
                "Prediction {} ended with status {:?}: {}",
                prediction.id,
                status,
                prediction.error_message()
            ))),
        }
    }
}
