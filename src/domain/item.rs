//! Base record for everything shown in an addon or module list

use serde::{Deserialize, Serialize};
use std::fmt;

/// An installable or installed unit as listed by the catalog or the local install list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier assigned by the remote catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Version string, empty when unknown
    #[serde(default)]
    pub version: String,
    pub enabled: bool,
    pub installed: bool,
    pub update_available: bool,
    pub is_addon: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Item {
    /// Creates a new item with an empty version and all flags cleared
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the version (builder pattern)
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Marks the item as installed and enabled (builder pattern)
    pub fn installed(mut self) -> Self {
        self.installed = true;
        self.enabled = true;
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{} ({})", self.name, self.id)
        } else {
            write!(f, "{} ({}) {}", self.name, self.id, self.version)
        }
    }
}
