//! Addon records as returned by the catalog

use super::{Dependency, Item, Repository};
use serde::{Deserialize, Serialize};
use std::fmt;

/// License attached to an addon
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct License {
    /// License name or full text as published by the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// SPDX identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spdx: Option<String>,
    /// Path of the license file on the catalog server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl License {
    /// Returns true if the catalog sent nothing at all for the license
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.spdx.is_none() && self.file.is_none()
    }
}

/// An installable addon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    #[serde(flatten)]
    pub item: Item,
    /// Dependencies in document order
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "License::is_empty")]
    pub license: License,
    /// Id of the repository this addon came from; lookup only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Addon {
    /// Creates a new addon with no dependencies and no license
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut item = Item::new(id, name);
        item.is_addon = true;
        Self {
            item,
            dependencies: Vec::new(),
            license: License::default(),
            repository: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn name(&self) -> &str {
        &self.item.name
    }

    pub fn version(&self) -> &str {
        &self.item.version
    }

    pub fn is_addon(&self) -> bool {
        self.item.is_addon
    }

    /// Appends a dependency, keeping insertion order
    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.dependencies.push(dependency);
    }

    /// Returns only the dependencies that must be present
    pub fn required_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.required)
    }

    /// Sets the repository reference (builder pattern)
    pub fn with_repository(mut self, repository_id: impl Into<String>) -> Self {
        self.repository = Some(repository_id.into());
        self
    }

    /// Resolves the repository reference against a list of known repositories
    pub fn resolve_repository<'a>(&self, repositories: &'a [Repository]) -> Option<&'a Repository> {
        self.repository
            .as_deref()
            .and_then(|id| Repository::find(repositories, id))
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addon_new_is_addon() {
        let addon = Addon::new("a", "A");
        assert!(addon.is_addon());
        assert_eq!(addon.id(), "a");
        assert_eq!(addon.name(), "A");
        assert_eq!(addon.version(), "");
        assert!(addon.dependencies.is_empty());
        assert!(addon.license.is_empty());
    }

    #[test]
    fn test_add_dependency_keeps_order() {
        let mut addon = Addon::new("a", "A");
        addon.add_dependency(Dependency::module("first"));
        addon.add_dependency(Dependency::jar("second.jar").optional());
        addon.add_dependency(Dependency::maven("g:third:1"));

        let targets: Vec<_> = addon.dependencies.iter().map(|d| d.target.as_str()).collect();
        assert_eq!(targets, vec!["first", "second.jar", "g:third:1"]);

        let required: Vec<_> = addon.required_dependencies().map(|d| d.target.as_str()).collect();
        assert_eq!(required, vec!["first", "g:third:1"]);
    }

    #[test]
    fn test_resolve_repository() {
        let repos = vec![
            Repository::new("main", "Main", "https://catalog.example.org/"),
            Repository::new("beta", "Beta", "https://beta.example.org/"),
        ];
        let addon = Addon::new("a", "A").with_repository("beta");
        assert_eq!(addon.resolve_repository(&repos).unwrap().name, "Beta");

        let orphan = Addon::new("b", "B").with_repository("gone");
        assert!(orphan.resolve_repository(&repos).is_none());

        assert!(Addon::new("c", "C").resolve_repository(&repos).is_none());
    }

    #[test]
    fn test_serde_addon_flattens_item() {
        let mut addon = Addon::new("a", "A");
        addon.item.version = "1.2".to_string();
        addon.license.spdx = Some("MIT".to_string());
        let json = serde_json::to_value(&addon).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["version"], "1.2");
        assert_eq!(json["license"]["spdx"], "MIT");

        let parsed: Addon = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, addon);
    }
}
