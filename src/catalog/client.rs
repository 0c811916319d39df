//! HTTP client shared foundation
//!
//! A thin wrapper around `reqwest::Client` with a fixed User-Agent. Each
//! call is a single GET; there is no retry and no caching. Callers that
//! want backoff implement it on top.

use crate::error::CatalogError;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("addoncat/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper that maps every failure to a `CatalogError`
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client sending the given User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| CatalogError::transport("client setup", None, e))?;

        Ok(Self { client })
    }

    /// Perform a GET request and return the body as text.
    ///
    /// `operation` and `target` are only used to give errors context.
    pub async fn get_text(
        &self,
        url: &Url,
        operation: &str,
        target: Option<&str>,
    ) -> Result<String, CatalogError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::transport(operation, target, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                operation: operation.to_string(),
                target: target.map(str::to_string),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::transport(operation, target, e))?;

        debug!("'{}' returned {} bytes", operation, body.len());
        Ok(body)
    }
}
