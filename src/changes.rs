//! Pending addon changes awaiting the external updater
//!
//! Four ordered collections: addons to install, addons to remove, files to
//! update, files to remove. Adding never deduplicates; callers check with
//! the matching `has_*` first.
//!
//! On disk (`addons_update/changes.cfg`) each entry is one `PREFIX:value`
//! line. Reading replaces the whole in-memory state and writing overwrites
//! the whole file.

use crate::persist::{self, LoadOutcome, SaveOutcome};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// The four kinds of pending change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    InstallAddon,
    RemoveAddon,
    UpdateFile,
    RemoveFile,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 4] = [
        ChangeKind::InstallAddon,
        ChangeKind::RemoveAddon,
        ChangeKind::UpdateFile,
        ChangeKind::RemoveFile,
    ];

    /// Line prefix used in the changes file
    pub fn prefix(&self) -> &'static str {
        match self {
            ChangeKind::InstallAddon => "INSTALL_ADDON",
            ChangeKind::RemoveAddon => "REMOVE_ADDON",
            ChangeKind::UpdateFile => "UPDATE_FILE",
            ChangeKind::RemoveFile => "REMOVE_FILE",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.prefix() == prefix)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddonUpdateChanges {
    install_addons: Vec<String>,
    remove_addons: Vec<String>,
    update_files: Vec<String>,
    remove_files: Vec<String>,
}

impl AddonUpdateChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of one kind, in insertion order
    pub fn entries(&self, kind: ChangeKind) -> &[String] {
        match kind {
            ChangeKind::InstallAddon => &self.install_addons,
            ChangeKind::RemoveAddon => &self.remove_addons,
            ChangeKind::UpdateFile => &self.update_files,
            ChangeKind::RemoveFile => &self.remove_files,
        }
    }

    fn entries_mut(&mut self, kind: ChangeKind) -> &mut Vec<String> {
        match kind {
            ChangeKind::InstallAddon => &mut self.install_addons,
            ChangeKind::RemoveAddon => &mut self.remove_addons,
            ChangeKind::UpdateFile => &mut self.update_files,
            ChangeKind::RemoveFile => &mut self.remove_files,
        }
    }

    /// Appends an entry without checking for duplicates
    pub fn add(&mut self, kind: ChangeKind, value: impl Into<String>) {
        self.entries_mut(kind).push(value.into());
    }

    /// Removes every entry equal to `value`; returns whether any was present
    pub fn remove(&mut self, kind: ChangeKind, value: &str) -> bool {
        let entries = self.entries_mut(kind);
        let before = entries.len();
        entries.retain(|v| v != value);
        entries.len() != before
    }

    pub fn has(&self, kind: ChangeKind, value: &str) -> bool {
        self.entries(kind).iter().any(|v| v == value)
    }

    pub fn add_install_addon(&mut self, addon_id: impl Into<String>) {
        self.add(ChangeKind::InstallAddon, addon_id);
    }

    pub fn remove_install_addon(&mut self, addon_id: &str) -> bool {
        self.remove(ChangeKind::InstallAddon, addon_id)
    }

    pub fn has_install_addon(&self, addon_id: &str) -> bool {
        self.has(ChangeKind::InstallAddon, addon_id)
    }

    pub fn add_remove_addon(&mut self, addon_id: impl Into<String>) {
        self.add(ChangeKind::RemoveAddon, addon_id);
    }

    pub fn remove_remove_addon(&mut self, addon_id: &str) -> bool {
        self.remove(ChangeKind::RemoveAddon, addon_id)
    }

    pub fn has_remove_addon(&self, addon_id: &str) -> bool {
        self.has(ChangeKind::RemoveAddon, addon_id)
    }

    pub fn add_update_file(&mut self, path: impl Into<String>) {
        self.add(ChangeKind::UpdateFile, path);
    }

    pub fn remove_update_file(&mut self, path: &str) -> bool {
        self.remove(ChangeKind::UpdateFile, path)
    }

    pub fn has_update_file(&self, path: &str) -> bool {
        self.has(ChangeKind::UpdateFile, path)
    }

    pub fn add_remove_file(&mut self, path: impl Into<String>) {
        self.add(ChangeKind::RemoveFile, path);
    }

    pub fn remove_remove_file(&mut self, path: &str) -> bool {
        self.remove(ChangeKind::RemoveFile, path)
    }

    pub fn has_remove_file(&self, path: &str) -> bool {
        self.has(ChangeKind::RemoveFile, path)
    }

    pub fn is_empty(&self) -> bool {
        ChangeKind::ALL.iter().all(|k| self.entries(*k).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Replaces the in-memory state with the content of the changes file.
    ///
    /// A missing or unreadable file leaves every collection empty. Lines
    /// with an unknown prefix are skipped.
    pub fn read_config_file(&mut self, path: &Path) -> LoadOutcome {
        self.clear();

        let lines = match persist::read_lines(path) {
            Ok(Some(lines)) => lines,
            Ok(None) => {
                debug!("{} does not exist", path.display());
                return LoadOutcome::Defaulted;
            }
            Err(e) => return persist::load_failed(e),
        };

        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed = line
                .split_once(':')
                .and_then(|(prefix, value)| ChangeKind::from_prefix(prefix).map(|k| (k, value)));
            match parsed {
                Some((kind, value)) => self.add(kind, value),
                None => warn!(
                    "{} line {}: unrecognized entry '{}'",
                    path.display(),
                    index + 1,
                    line
                ),
            }
        }

        LoadOutcome::Loaded
    }

    /// Overwrites the changes file with the in-memory state
    pub fn write_config_file(&self, path: &Path) -> SaveOutcome {
        let lines = ChangeKind::ALL.into_iter().flat_map(|kind| {
            self.entries(kind)
                .iter()
                .map(move |value| format!("{}:{}", kind.prefix(), value))
        });
        persist::save_result(persist::write_lines(path, lines))
    }
}
