//! Dependency information structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a dependency target refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DependencyKind {
    /// Another catalog module, referenced by module id
    Module,
    /// A Maven artifact, referenced by `group:artifact:version`
    MavenLibrary,
    /// A bare jar, referenced by file name
    JarLibrary,
}

impl DependencyKind {
    /// Returns a short label for display
    pub fn label(&self) -> &'static str {
        match self {
            DependencyKind::Module => "module",
            DependencyKind::MavenLibrary => "maven",
            DependencyKind::JarLibrary => "jar",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reference from an addon to something it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Module id, Maven coordinate, or jar file name depending on `kind`
    pub target: String,
    pub kind: DependencyKind,
    pub required: bool,
}

impl Dependency {
    /// Creates a new required dependency
    pub fn new(target: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            target: target.into(),
            kind,
            required: true,
        }
    }

    /// Creates a module dependency
    pub fn module(id: impl Into<String>) -> Self {
        Self::new(id, DependencyKind::Module)
    }

    /// Creates a Maven library dependency
    pub fn maven(coordinate: impl Into<String>) -> Self {
        Self::new(coordinate, DependencyKind::MavenLibrary)
    }

    /// Creates a jar library dependency
    pub fn jar(file_name: impl Into<String>) -> Self {
        Self::new(file_name, DependencyKind::JarLibrary)
    }

    /// Marks the dependency as optional (builder pattern)
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let optional_marker = if self.required { "" } else { " (optional)" };
        write!(f, "{} [{}]{}", self.target, self.kind, optional_marker)
    }
}
