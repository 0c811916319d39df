//! Output formatting for catalog results
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::changes::AddonUpdateChanges;
use crate::domain::{Addon, UpdateRecord};
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    /// Create format from CLI arguments
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Result of looking up one module in the available-updates cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck<'a> {
    pub module_id: &'a str,
    pub current_version: &'a str,
    pub latest_version: Option<&'a str>,
    pub update_available: bool,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the addon list returned by a catalog search
    fn format_addons(&self, addons: &[Addon], writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format one addon with its license and dependencies
    fn format_addon(&self, addon: &Addon, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format the status reported for an application version
    fn format_status(
        &self,
        version: &str,
        status: i32,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format catalog update records
    fn format_updates(
        &self,
        records: &[UpdateRecord],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format a single named value (file path, URL, details text)
    fn format_value(&self, label: &str, value: &str, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format a cache lookup
    fn format_check(&self, check: &UpdateCheck<'_>, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format the pending-changes log
    fn format_changes(
        &self,
        changes: &AddonUpdateChanges,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter for the given format
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
