//! Client for the remote addon catalog
//!
//! This module provides:
//! - HTTP client shared foundation
//! - The `CatalogService` trait describing the six catalog operations
//! - `CatalogClient`, the HTTP implementation of that trait
//! - Response parsers for the XML and line-oriented bodies

mod client;
mod service;
pub mod text;
pub mod xml;

pub use client::HttpClient;
pub use service::CatalogClient;
pub use text::UNKNOWN_STATUS;

use crate::domain::{Addon, UpdateRecord};
use crate::error::CatalogError;
use async_trait::async_trait;

/// Filter a caller wants applied to an addon search.
///
/// The `list` endpoint takes no filter parameters, so the condition is
/// currently neither sent nor applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCondition {
    pub keyword: Option<String>,
}

impl SearchCondition {
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyword.is_none()
    }
}

/// Operations offered by the remote addon catalog
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Ask the catalog for the status code of the given application version
    async fn check_status(&self, version: &str) -> Result<i32, CatalogError>;

    /// List all addons offered by the catalog
    async fn search_for_addons(
        &mut self,
        condition: &SearchCondition,
    ) -> Result<Vec<Addon>, CatalogError>;

    /// Fetch the license and dependencies of one addon
    async fn get_addon_dependency(&self, addon_id: &str) -> Result<Addon, CatalogError>;

    /// Fetch the remote path of an addon's install file
    async fn get_addon_file(&self, addon_id: &str) -> Result<String, CatalogError>;

    /// Fetch the modules with newer versions available
    async fn get_update_records(&self) -> Result<Vec<UpdateRecord>, CatalogError>;

    /// Fetch the free-text details page of an addon
    async fn get_module_details(&self, addon_id: &str) -> Result<String, CatalogError>;
}
