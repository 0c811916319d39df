use serde::{Deserialize, Serialize};

/// A catalog an addon can originate from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl Repository {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Finds a repository by id
    pub fn find<'a>(repositories: &'a [Repository], id: &str) -> Option<&'a Repository> {
        repositories.iter().find(|r| r.id == id)
    }
}
