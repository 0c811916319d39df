//! Text output formatter for human-readable display

use crate::catalog::UNKNOWN_STATUS;
use crate::changes::{AddonUpdateChanges, ChangeKind};
use crate::domain::{Addon, UpdateRecord};
use crate::output::{OutputFormatter, UpdateCheck};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn change_heading(kind: ChangeKind) -> &'static str {
        match kind {
            ChangeKind::InstallAddon => "Install addons",
            ChangeKind::RemoveAddon => "Remove addons",
            ChangeKind::UpdateFile => "Update files",
            ChangeKind::RemoveFile => "Remove files",
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_addons(&self, addons: &[Addon], writer: &mut dyn Write) -> std::io::Result<()> {
        if addons.is_empty() {
            return writeln!(writer, "{}", "No addons available".dimmed());
        }

        for addon in addons {
            let version = if addon.version().is_empty() {
                "-".dimmed().to_string()
            } else {
                addon.version().green().to_string()
            };
            writeln!(
                writer,
                "  {} {} {}",
                addon.id().bold(),
                version,
                addon.name()
            )?;
            if let Some(description) = &addon.item.description {
                writeln!(writer, "      {}", description.dimmed())?;
            }
        }

        writeln!(writer)?;
        writeln!(writer, "{} addons", addons.len())
    }

    fn format_addon(&self, addon: &Addon, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", addon.id().bold())?;

        let license = &addon.license;
        if !license.is_empty() {
            let name = license
                .spdx
                .as_deref()
                .or(license.text.as_deref())
                .unwrap_or("-");
            write!(writer, "  License: {}", name)?;
            if let Some(file) = &license.file {
                write!(writer, " ({})", file.dimmed())?;
            }
            writeln!(writer)?;
        }

        if addon.dependencies.is_empty() {
            return writeln!(writer, "  {}", "No dependencies".dimmed());
        }

        writeln!(
            writer,
            "  Dependencies ({} required):",
            addon.required_dependencies().count()
        )?;
        for dependency in &addon.dependencies {
            writeln!(writer, "    - {}", dependency)?;
        }
        Ok(())
    }

    fn format_status(
        &self,
        version: &str,
        status: i32,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if status == UNKNOWN_STATUS {
            writeln!(writer, "Status for {}: {}", version, "unknown".dimmed())
        } else {
            writeln!(writer, "Status for {}: {}", version, status.to_string().bold())
        }
    }

    fn format_updates(
        &self,
        records: &[UpdateRecord],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if records.is_empty() {
            return writeln!(writer, "{}", "All modules are up to date".green());
        }

        for record in records {
            writeln!(
                writer,
                "  {} {} {}",
                record.module_id,
                "→".dimmed(),
                record.version.green()
            )?;
        }
        Ok(())
    }

    fn format_value(
        &self,
        label: &str,
        value: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if value.contains('\n') {
            writeln!(writer, "{}:", label.bold())?;
            writeln!(writer, "{}", value)
        } else {
            writeln!(writer, "{}: {}", label.bold(), value)
        }
    }

    fn format_check(
        &self,
        check: &UpdateCheck<'_>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match (check.latest_version, check.update_available) {
            (Some(latest), true) => writeln!(
                writer,
                "{} {} {} {}",
                check.module_id.bold(),
                check.current_version,
                "→".dimmed(),
                latest.green()
            ),
            (Some(latest), false) => writeln!(
                writer,
                "{} {} is up to date (latest known: {})",
                check.module_id.bold(),
                check.current_version,
                latest
            ),
            (None, _) => writeln!(
                writer,
                "{} {}",
                check.module_id.bold(),
                "has no known update".dimmed()
            ),
        }
    }

    fn format_changes(
        &self,
        changes: &AddonUpdateChanges,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if changes.is_empty() {
            return writeln!(writer, "{}", "No pending changes".dimmed());
        }

        for kind in ChangeKind::ALL {
            let entries = changes.entries(kind);
            if entries.is_empty() {
                continue;
            }
            writeln!(writer, "{}:", Self::change_heading(kind).bold())?;
            for entry in entries {
                writeln!(writer, "  - {}", entry)?;
            }
        }
        Ok(())
    }
}
