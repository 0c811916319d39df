//! Update records reported by the catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// "This module has a newer version available"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub module_id: String,
    pub version: String,
}

impl UpdateRecord {
    pub fn new(module_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            version: version.into(),
        }
    }

    /// Parses a `moduleId:version` line, splitting on the first colon only
    pub fn parse_line(line: &str) -> Option<Self> {
        let (module_id, version) = line.split_once(':')?;
        Some(Self::new(module_id, version))
    }
}

impl fmt::Display for UpdateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_simple() {
        let record = UpdateRecord::parse_line("mod.a:1.5").unwrap();
        assert_eq!(record, UpdateRecord::new("mod.a", "1.5"));
    }

    #[test]
    fn test_parse_line_splits_on_first_colon() {
        let record = UpdateRecord::parse_line("b:2.0:beta").unwrap();
        assert_eq!(record.module_id, "b");
        assert_eq!(record.version, "2.0:beta");
    }

    #[test]
    fn test_parse_line_without_colon() {
        assert!(UpdateRecord::parse_line("no-separator").is_none());
    }

    #[test]
    fn test_display_matches_line_format() {
        let record = UpdateRecord::new("b", "2.0:beta");
        assert_eq!(format!("{}", record), "b:2.0:beta");
    }
}
