//! Request/response boundaries between the HTTP layer and the external
//! provider and store.

pub mod generation;
pub mod post;

pub use generation::GenerationGateway;
pub use post::PostGateway;

use reqwest::Url;

/// Parse `value` as an absolute URL with a scheme and a host.
pub(crate) fn parse_absolute_url(value: &str) -> Option<Url> {
    Url::parse(value).ok().filter(|url| url.has_host())
}

#[cfg(test)]
mod tests {
    use super::parse_absolute_url;

    #[test]
    fn test_parse_absolute_url() {
        assert!(parse_absolute_url("https://example.com/x.png").is_some());
        assert!(parse_absolute_url("https://x").is_some());
        assert!(parse_absolute_url("example.com/x.png").is_none());
        assert!(parse_absolute_url("/x.png").is_none());
        assert!(parse_absolute_url("mailto:ada@example.com").is_none());
        assert!(parse_absolute_url("").is_none());
    }
}
