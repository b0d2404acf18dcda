//! Provider output shapes.

use crate::{Error, Result};
use reqwest::Url;
use serde_json::Value;

/// Handle to a provider-hosted file whose URL is resolved on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutput {
    href: String,
}

impl FileOutput {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    pub fn url(&self) -> Result<Url> {
        Url::parse(self.href.trim())
            .map_err(|e| Error::EmptyOrInvalidUrl(format!("'{}': {}", self.href, e)))
    }
}

/// Output of a finished prediction.
///
/// Variant order mirrors the order in which shapes are recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutput {
    File(FileOutput),
    List(Vec<String>),
    Other(Value),
}

impl ProviderOutput {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(href) => ProviderOutput::File(FileOutput::new(href)),
            Value::Array(items) if items.iter().all(Value::is_string) => ProviderOutput::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => ProviderOutput::Other(other),
        }
    }

    /// Short description of the shape, for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            ProviderOutput::File(_) => "file".to_string(),
            ProviderOutput::List(items) => format!("list of {} strings", items.len()),
            ProviderOutput::Other(Value::Null) => "null".to_string(),
            ProviderOutput::Other(Value::Bool(_)) => "boolean".to_string(),
            ProviderOutput::Other(Value::Number(_)) => "number".to_string(),
            ProviderOutput::Other(Value::Object(map)) if map.is_empty() => {
                "empty object".to_string()
            }
            ProviderOutput::Other(Value::Object(_)) => "object".to_string(),
            ProviderOutput::Other(Value::Array(_)) => "mixed array".to_string(),
            ProviderOutput::Other(Value::String(_)) => "string".to_string(),
        }
    }
}
