//! JSON output formatter for machine processing

use crate::changes::{AddonUpdateChanges, ChangeKind};
use crate::domain::{Addon, UpdateRecord};
use crate::output::{OutputFormatter, UpdateCheck};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize + ?Sized>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, value).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_addons(&self, addons: &[Addon], writer: &mut dyn Write) -> std::io::Result<()> {
        Self::write(addons, writer)
    }

    fn format_addon(&self, addon: &Addon, writer: &mut dyn Write) -> std::io::Result<()> {
        Self::write(addon, writer)
    }

    fn format_status(
        &self,
        version: &str,
        status: i32,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write(&json!({ "version": version, "status": status }), writer)
    }

    fn format_updates(
        &self,
        records: &[UpdateRecord],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write(records, writer)
    }

    fn format_value(
        &self,
        label: &str,
        value: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mut map = serde_json::Map::new();
        map.insert(label.to_string(), json!(value));
        Self::write(&map, writer)
    }

    fn format_check(
        &self,
        check: &UpdateCheck<'_>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        Self::write(
            &json!({
                "module_id": check.module_id,
                "current_version": check.current_version,
                "latest_version": check.latest_version,
                "update_available": check.update_available,
            }),
            writer,
        )
    }

    fn format_changes(
        &self,
        changes: &AddonUpdateChanges,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mut map = serde_json::Map::new();
        for kind in ChangeKind::ALL {
            map.insert(kind.prefix().to_string(), json!(changes.entries(kind)));
        }
        Self::write(&map, writer)
    }
}
