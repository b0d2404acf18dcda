//! Process configuration, read once at startup.

use crate::ai::replicate::client::DEFAULT_BASE_URL as DEFAULT_REPLICATE_BASE_URL;
use crate::{Error, Result};
use std::time::Duration;

const DEFAULT_REPLICATE_MODEL: &str = "black-forest-labs/flux-1.1-pro";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://nomit-ai-app.onrender.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub replicate_api_token: Option<String>,
    pub replicate_model: String,
    pub replicate_base_url: String,
    pub provider_timeout: Duration,
    pub poll_interval: Duration,
    pub database_url: String,
    pub database_max_connections: u32,
    pub database_acquire_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub json_body_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let replicate_api_token = lookup("REPLICATE_API_TOKEN").filter(|t| !t.trim().is_empty());
        if replicate_api_token.is_none() {
            tracing::warn!("REPLICATE_API_TOKEN is not set; image generation requests will fail");
        }

        let database_url = lookup("DATABASE_URL")
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::StartupFailed("DATABASE_URL not set".to_string()))?;

        Ok(Self {
            replicate_api_token,
            replicate_model: lookup("REPLICATE_MODEL")
                .unwrap_or_else(|| DEFAULT_REPLICATE_MODEL.to_string()),
            replicate_base_url: lookup("REPLICATE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_REPLICATE_BASE_URL.to_string()),
            provider_timeout: Duration::from_secs(parse_or(&lookup, "PROVIDER_TIMEOUT_SECS", 120)?),
            poll_interval: Duration::from_millis(parse_or(
                &lookup,
                "PREDICTION_POLL_INTERVAL_MS",
                1000,
            )?),
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            database_acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                5,
            )?),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            allowed_origins: parse_origins(
                &lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            json_body_limit: parse_or(&lookup, "JSON_BODY_LIMIT", 64 * 1024)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/gallery")]))
                .unwrap();

        assert!(config.replicate_api_token.is_none());
        assert_eq!(config.replicate_model, "black-forest-labs/flux-1.1-pro");
        assert_eq!(config.port, 8080);
        assert_eq!(config.json_body_limit, 65536);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_database_url_is_startup_failure() {
        let err = Config::from_lookup(lookup_from(&[("REPLICATE_API_TOKEN", "r8_x")])).unwrap_err();
        assert!(matches!(err, Error::StartupFailed(_)));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_acquire_timeout_override() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.database_acquire_timeout, Duration::from_secs(2));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("DATABASE_ACQUIRE_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_ACQUIRE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_origins_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/gallery"),
            ("CORS_ALLOWED_ORIGINS", " http://localhost:3000/ ,, https://gallery.example.com"),
        ]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://gallery.example.com"]
        );
    }
}
