//! HTTP implementation of the catalog operations
//!
//! Endpoints, relative to the configured base URL:
//! - `api/?op=list`
//! - `api/?op=check-<version>`
//! - `api/?op=addondep&id=<id>`
//! - `api/?op=addonfile&id=<id>`
//! - `api/?op=updates`
//! - `api/?op=addondetail&id=<id>`
//! - `download/?f=<path>` and `license/<path>` for static files

use crate::catalog::{text, xml, CatalogService, HttpClient, SearchCondition};
use crate::config::Config;
use crate::domain::{Addon, UpdateRecord};
use crate::error::{AppError, CatalogError};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

const OP_LIST: &str = "list";
const OP_ADDON_DEPENDENCY: &str = "addondep";
const OP_ADDON_FILE: &str = "addonfile";
const OP_UPDATES: &str = "updates";
const OP_ADDON_DETAIL: &str = "addondetail";
const OP_DOWNLOAD: &str = "download";
const OP_LICENSE: &str = "license";

/// Catalog client talking to one base URL
pub struct CatalogClient {
    client: HttpClient,
    base_url: Url,
    /// Addon id -> icon path from the last successful listing
    icons: HashMap<String, String>,
}

impl CatalogClient {
    /// Create a client for the catalog at `base_url`
    pub fn new(base_url: Url) -> Result<Self, CatalogError> {
        Ok(Self::with_client(base_url, HttpClient::new()?))
    }

    /// Create a client for the configured catalog
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(config.base_url()?.clone())?)
    }

    /// Create a client with a custom HTTP client (for testing)
    pub fn with_client(base_url: Url, client: HttpClient) -> Self {
        Self {
            client,
            base_url,
            icons: HashMap::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Icon path of an addon from the last successful listing
    pub fn icon_path(&self, addon_id: &str) -> Option<&str> {
        self.icons.get(addon_id).map(String::as_str)
    }

    /// Build `<base>api/?op=<operation>` plus `&key=value` for each parameter
    pub fn api_url(&self, operation: &str, params: &[(&str, &str)]) -> Result<Url, CatalogError> {
        let mut raw = format!("{}api/?op={}", self.base_url, operation);
        for (key, value) in params {
            raw.push('&');
            raw.push_str(key);
            raw.push('=');
            raw.extend(url::form_urlencoded::byte_serialize(value.as_bytes()));
        }
        parse_url(operation, raw)
    }

    /// Build the `check-<version>` status URL; the version is form-urlencoded
    pub fn status_url(&self, version: &str) -> Result<Url, CatalogError> {
        let encoded: String = url::form_urlencoded::byte_serialize(version.as_bytes()).collect();
        self.api_url(&format!("check-{}", encoded), &[])
    }

    /// URL to download a file published by the catalog
    pub fn file_download_url(&self, path: &str) -> Result<Url, CatalogError> {
        parse_url(OP_DOWNLOAD, format!("{}download/?f={}", self.base_url, path))
    }

    /// URL to download a license file published by the catalog
    pub fn license_download_url(&self, path: &str) -> Result<Url, CatalogError> {
        parse_url(OP_LICENSE, format!("{}license/{}", self.base_url, path))
    }

    async fn fetch(
        &self,
        operation: &str,
        params: &[(&str, &str)],
        target: Option<&str>,
    ) -> Result<String, CatalogError> {
        let url = self.api_url(operation, params)?;
        self.client.get_text(&url, operation, target).await
    }
}

fn parse_url(operation: &str, raw: String) -> Result<Url, CatalogError> {
    Url::parse(&raw).map_err(|source| CatalogError::InvalidUrl {
        operation: operation.to_string(),
        url: raw,
        source,
    })
}

#[async_trait]
impl CatalogService for CatalogClient {
    async fn check_status(&self, version: &str) -> Result<i32, CatalogError> {
        let operation = format!("check-{}", version);
        let url = self.status_url(version)?;
        let body = self.client.get_text(&url, &operation, None).await?;
        text::parse_status(&body, &operation)
    }

    async fn search_for_addons(
        &mut self,
        condition: &SearchCondition,
    ) -> Result<Vec<Addon>, CatalogError> {
        if !condition.is_empty() {
            debug!("search condition {:?} is not sent to the catalog", condition);
        }

        let body = self.fetch(OP_LIST, &[], None).await?;
        let parsed = xml::parse_addon_list(&body, OP_LIST)?;

        let mut icons = HashMap::new();
        let mut addons = Vec::with_capacity(parsed.len());
        for entry in parsed {
            if let Some(icon) = entry.icon {
                icons.insert(entry.addon.id().to_string(), icon);
            }
            addons.push(entry.addon);
        }
        self.icons = icons;

        debug!("catalog lists {} addons", addons.len());
        Ok(addons)
    }

    async fn get_addon_dependency(&self, addon_id: &str) -> Result<Addon, CatalogError> {
        let body = self
            .fetch(OP_ADDON_DEPENDENCY, &[("id", addon_id)], Some(addon_id))
            .await?;
        xml::parse_addon_dependency(&body, OP_ADDON_DEPENDENCY, addon_id)
    }

    async fn get_addon_file(&self, addon_id: &str) -> Result<String, CatalogError> {
        let body = self
            .fetch(OP_ADDON_FILE, &[("id", addon_id)], Some(addon_id))
            .await?;
        text::parse_addon_file(&body, OP_ADDON_FILE, addon_id)
    }

    async fn get_update_records(&self) -> Result<Vec<UpdateRecord>, CatalogError> {
        let body = self.fetch(OP_UPDATES, &[], None).await?;
        text::parse_update_records(&body, OP_UPDATES)
    }

    async fn get_module_details(&self, addon_id: &str) -> Result<String, CatalogError> {
        let body = self
            .fetch(OP_ADDON_DETAIL, &[("id", addon_id)], Some(addon_id))
            .await?;
        Ok(text::join_lines(&body))
    }
}
