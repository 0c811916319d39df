//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CatalogError: anything that went wrong talking to the remote catalog
//! - PersistError: local cache / changes-log file failures
//! - ConfigError: invalid configuration values

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote catalog errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Local persistence errors
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised by catalog operations.
///
/// Transport failures, malformed responses and missing records all surface
/// as this one type. Every variant names the operation that failed and,
/// where the operation targets an addon, its id.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Connection could not be opened or the body could not be read
    #[error("catalog request '{operation}'{} failed: {source}", target_suffix(.target))]
    Transport {
        operation: String,
        target: Option<String>,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("catalog request '{operation}'{} returned HTTP {status}", target_suffix(.target))]
    HttpStatus {
        operation: String,
        target: Option<String>,
        status: u16,
    },

    /// Response body did not have the expected shape
    #[error("malformed response to '{operation}'{}: {message}", target_suffix(.target))]
    Malformed {
        operation: String,
        target: Option<String>,
        message: String,
    },

    /// Response body was not well-formed XML
    #[error("invalid XML in response to '{operation}'{}: {source}", target_suffix(.target))]
    Xml {
        operation: String,
        target: Option<String>,
        #[source]
        source: roxmltree::Error,
    },

    /// Well-formed response without a record for the requested addon
    #[error("no record for addon '{addon_id}' in response to '{operation}'")]
    NoRecord { operation: String, addon_id: String },

    /// URL construction failed
    #[error("invalid catalog URL for '{operation}' ('{url}'): {source}")]
    InvalidUrl {
        operation: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

fn target_suffix(target: &Option<String>) -> String {
    match target {
        Some(id) => format!(" for '{}'", id),
        None => String::new(),
    }
}

/// Errors related to the local flat files
#[derive(Error, Debug)]
pub enum PersistError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content could not be interpreted
    #[error("failed to parse {path} line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Base URL is not a valid absolute URL
    #[error("invalid catalog base URL '{value}': {message}")]
    InvalidBaseUrl { value: String, message: String },

    /// A catalog operation was requested without a base URL
    #[error("no catalog base URL configured (use --base-url or ADDONCAT_BASE_URL)")]
    MissingBaseUrl,

    /// No config directory given and none could be derived
    #[error("no configuration directory available: {message}")]
    NoConfigDir { message: String },
}

impl CatalogError {
    /// Creates a new Transport error
    pub fn transport(
        operation: impl Into<String>,
        target: Option<&str>,
        source: reqwest::Error,
    ) -> Self {
        CatalogError::Transport {
            operation: operation.into(),
            target: target.map(str::to_string),
            source,
        }
    }

    /// Creates a new Malformed error
    pub fn malformed(
        operation: impl Into<String>,
        target: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        CatalogError::Malformed {
            operation: operation.into(),
            target: target.map(str::to_string),
            message: message.into(),
        }
    }

    /// Creates a new Xml error
    pub fn xml(operation: impl Into<String>, target: Option<&str>, source: roxmltree::Error) -> Self {
        CatalogError::Xml {
            operation: operation.into(),
            target: target.map(str::to_string),
            source,
        }
    }

    /// Creates a new NoRecord error
    pub fn no_record(operation: impl Into<String>, addon_id: impl Into<String>) -> Self {
        CatalogError::NoRecord {
            operation: operation.into(),
            addon_id: addon_id.into(),
        }
    }

    /// Returns the name of the catalog operation that failed
    pub fn operation(&self) -> &str {
        match self {
            CatalogError::Transport { operation, .. }
            | CatalogError::HttpStatus { operation, .. }
            | CatalogError::Malformed { operation, .. }
            | CatalogError::Xml { operation, .. }
            | CatalogError::NoRecord { operation, .. }
            | CatalogError::InvalidUrl { operation, .. } => operation,
        }
    }
}

impl PersistError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        PersistError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_malformed_with_target() {
        let err = CatalogError::malformed("addonfile", Some("org.demo"), "empty response");
        let msg = format!("{}", err);
        assert!(msg.contains("malformed response to 'addonfile'"));
        assert!(msg.contains("for 'org.demo'"));
        assert!(msg.contains("empty response"));
    }

    #[test]
    fn test_catalog_error_malformed_without_target() {
        let err = CatalogError::malformed("check-1.0", None, "not an integer");
        let msg = format!("{}", err);
        assert_eq!(
            msg,
            "malformed response to 'check-1.0': not an integer"
        );
    }

    #[test]
    fn test_catalog_error_http_status() {
        let err = CatalogError::HttpStatus {
            operation: "list".to_string(),
            target: None,
            status: 503,
        };
        assert!(format!("{}", err).contains("HTTP 503"));
    }

    #[test]
    fn test_catalog_error_xml() {
        let source = roxmltree::Document::parse("<result>").unwrap_err();
        let err = CatalogError::xml("list", None, source);
        let msg = format!("{}", err);
        assert!(msg.contains("invalid XML in response to 'list'"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_catalog_error_no_record() {
        let err = CatalogError::no_record("addondep", "org.missing");
        assert_eq!(
            format!("{}", err),
            "no record for addon 'org.missing' in response to 'addondep'"
        );
        assert_eq!(err.operation(), "addondep");
    }

    #[test]
    fn test_catalog_error_invalid_url_names_operation() {
        let source = url::Url::parse("http://[::1").unwrap_err();
        let err = CatalogError::InvalidUrl {
            operation: "download".to_string(),
            url: "http://[::1".to_string(),
            source,
        };
        assert_eq!(err.operation(), "download");
        assert!(format!("{}", err).contains("for 'download'"));
    }

    #[test]
    fn test_catalog_error_operation() {
        let err = CatalogError::malformed("updates", None, "x");
        assert_eq!(err.operation(), "updates");
    }

    #[test]
    fn test_persist_error_read() {
        let err = PersistError::read(
            "/cfg/available-updates.cfg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = format!("{}", err);
        assert!(msg.contains("failed to read"));
        assert!(msg.contains("available-updates.cfg"));
    }

    #[test]
    fn test_persist_error_parse() {
        let err = PersistError::parse("/cfg/available-updates.cfg", 1, "status is not an integer");
        let msg = format!("{}", err);
        assert!(msg.contains("line 1"));
        assert!(msg.contains("status is not an integer"));
    }

    #[test]
    fn test_config_error_invalid_base_url() {
        let err = ConfigError::InvalidBaseUrl {
            value: "not a url".to_string(),
            message: "relative URL without a base".to_string(),
        };
        assert!(format!("{}", err).contains("invalid catalog base URL"));
    }

    #[test]
    fn test_app_error_from_catalog_error() {
        let app_err: AppError = CatalogError::no_record("addondep", "x").into();
        assert!(format!("{}", app_err).contains("no record for addon 'x'"));
    }

    #[test]
    fn test_app_error_from_persist_error() {
        let app_err: AppError = PersistError::parse("/f", 2, "bad").into();
        assert!(format!("{}", app_err).contains("line 2"));
    }

    #[test]
    fn test_error_debug_trait() {
        let err = CatalogError::no_record("addondep", "x");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NoRecord"));
    }
}
