//! CMS REST API client.
//!
//! Provides a sync HTTP client with optional bearer-token authentication.

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::ClientError;
use crate::source::{ContentSource, FetchResponse};

/// CMS REST API client.
pub struct CmsClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl CmsClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - CMS API base URL (trailing slashes are ignored)
    /// * `token` - Optional bearer token
    /// * `timeout_secs` - Global request timeout
    #[must_use]
    pub fn new(base_url: &str, token: Option<&str>, timeout_secs: u64) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.map(str::to_owned),
        }
    }

    /// Build the full request URL for an endpoint path and encoded query.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `path` does not start with `/`
    /// or `query` is neither empty nor starts with `?`.
    pub fn url_for(&self, path: &str, query: &str) -> Result<String, ClientError> {
        if !path.starts_with('/') {
            return Err(ClientError::InvalidUrl(format!(
                "endpoint path must start with '/': {path}"
            )));
        }
        if !query.is_empty() && !query.starts_with('?') {
            return Err(ClientError::InvalidUrl(format!(
                "query must start with '?': {query}"
            )));
        }
        Ok(format!("{}{path}{query}", self.base_url))
    }
}

impl ContentSource for CmsClient {
    fn fetch(&self, path: &str, query: &str) -> Result<FetchResponse, ClientError> {
        let url = self.url_for(path, query)?;
        debug!("GET {}", url);

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ClientError::HttpResponse {
                status,
                body: error_body,
                url,
            });
        }

        let body = body_reader.read_to_string()?;
        let json = serde_json::from_str(&body)?;
        Ok(FetchResponse { json, url })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_url_for_joins_base_path_and_query() {
        let client = CmsClient::new("https://cms.example.com/api/", None, 30);

        let url = client.url_for("/pages", "?locale=en&path=%2Fen").unwrap();

        assert_eq!(url, "https://cms.example.com/api/pages?locale=en&path=%2Fen");
    }

    #[test]
    fn test_url_for_without_query() {
        let client = CmsClient::new("https://cms.example.com", Some("t"), 30);
        assert_eq!(
            client.url_for("/languages", "").unwrap(),
            "https://cms.example.com/languages"
        );
    }

    #[test]
    fn test_url_for_rejects_relative_path() {
        let client = CmsClient::new("https://cms.example.com", None, 30);
        let err = client.url_for("pages", "").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_url_for_rejects_malformed_query() {
        let client = CmsClient::new("https://cms.example.com", None, 30);
        assert!(client.url_for("/pages", "locale=en").is_err());
    }
}
