use crate::{Error, Result};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com";

/// Thin Replicate REST client shared by prediction calls.
pub struct ReplicateHttpClient {
    pub(crate) client: Client,
    api_token: Option<String>,
    pub(crate) base_url: String,
}

impl ReplicateHttpClient {
    pub fn new(api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new_with_client(api_token, client))
    }

    pub fn new_with_client(api_token: Option<String>, client: Client) -> Self {
        Self {
            client,
            api_token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn token(&self) -> Result<&str> {
        self.api_token
            .as_deref()
            .ok_or_else(|| Error::AiProvider("REPLICATE_API_TOKEN is not configured".to_string()))
    }

    /// POST to a path under the base URL, asking the provider to hold the
    /// connection until the prediction settles.
    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let token = self.token()?;
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Prefer", "wait")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Replicate: {}", e);
                e
            })?;

        Self::decode(response).await
    }

    /// GET an absolute URL handed out by the provider (e.g. `urls.get`).
    ///
    /// The URL must share the base URL's scheme, host and port, so the
    /// bearer token never leaves the configured API origin.
    pub async fn get_url<Resp: DeserializeOwned>(&self, url: &str) -> Result<Resp> {
        let token = self.token()?;
        let url = self.same_origin(url)?;
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to poll Replicate: {}", e);
                e
            })?;

        Self::decode(response).await
    }

    fn same_origin(&self, url: &str) -> Result<Url> {
        let refuse = || {
            tracing::warn!("Refusing to poll {} outside {}", url, self.base_url);
            Error::AiProvider(format!("Refusing to poll {} outside {}", url, self.base_url))
        };

        let target = Url::parse(url).map_err(|_| refuse())?;
        let base = Url::parse(&self.base_url).map_err(|_| refuse())?;
        let same = target.scheme() == base.scheme()
            && target.host_str() == base.host_str()
            && target.port_or_known_default() == base.port_or_known_default();

        if same {
            Ok(target)
        } else {
            Err(refuse())
        }
    }

    async fn decode<Resp: DeserializeOwned>(response: Response) -> Result<Resp> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Replicate API error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Replicate API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Replicate response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Replicate response: {}", e))
        })
    }
}
