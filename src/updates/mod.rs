//! Cache of module updates known to be available
//!
//! The cache holds a status code and a `module id -> latest version` map.
//! Both are always replaced together. Registered listeners run on the
//! calling thread, in registration order, after every replacement.
//!
//! On disk (`available-updates.cfg`) the first line is the status and
//! every following line is `moduleId:version`.

mod version;

pub use version::{compare_versions, is_greater_than};

use crate::catalog::{CatalogService, UNKNOWN_STATUS};
use crate::domain::{Item, UpdateRecord};
use crate::error::{CatalogError, PersistError};
use crate::persist::{self, LoadOutcome, SaveOutcome};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Callback fired after the cache content was replaced
pub type UpdateListener = Box<dyn Fn(&AvailableUpdates) + Send + Sync>;

pub struct AvailableUpdates {
    status: i32,
    latest: BTreeMap<String, String>,
    listeners: Vec<UpdateListener>,
}

impl AvailableUpdates {
    /// Creates an empty cache with unknown status
    pub fn new() -> Self {
        Self {
            status: UNKNOWN_STATUS,
            latest: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    /// Latest known version of a module
    pub fn latest_version(&self, module_id: &str) -> Option<&str> {
        self.latest.get(module_id).map(String::as_str)
    }

    /// All cached `(module id, version)` pairs, sorted by module id
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.latest.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }

    /// Registers a listener; listeners are never removed
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&AvailableUpdates) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// True iff the cache knows a version of `module_id` newer than `current_version`.
    /// Unknown modules never have an update.
    pub fn is_update_available(&self, module_id: &str, current_version: &str) -> bool {
        self.latest_version(module_id)
            .is_some_and(|latest| is_greater_than(latest, current_version))
    }

    /// Sets `item.update_available` from the cache
    pub fn apply_to(&self, item: &mut Item) {
        item.update_available = self.is_update_available(&item.id, &item.version);
    }

    /// Replaces status and versions, then notifies listeners
    pub fn set_latest_version(&mut self, status: i32, latest: BTreeMap<String, String>) {
        self.replace(status, latest);
        self.notify();
    }

    /// Convenience over `set_latest_version` taking catalog records.
    /// A later record for the same module wins.
    pub fn set_from_records(&mut self, status: i32, records: Vec<UpdateRecord>) {
        let latest = records
            .into_iter()
            .map(|r| (r.module_id, r.version))
            .collect();
        self.set_latest_version(status, latest);
    }

    /// Fetches status and update records from the catalog and replaces the cache.
    /// Nothing is replaced if either request fails.
    ///
    /// Returns the records in catalog order, duplicates included.
    pub async fn refresh<S>(
        &mut self,
        service: &S,
        app_version: &str,
    ) -> Result<Vec<UpdateRecord>, CatalogError>
    where
        S: CatalogService + ?Sized,
    {
        let status = service.check_status(app_version).await?;
        let records = service.get_update_records().await?;
        debug!(
            "refreshed available updates: status {}, {} records",
            status,
            records.len()
        );
        let latest = records
            .iter()
            .map(|r| (r.module_id.clone(), r.version.clone()))
            .collect();
        self.set_latest_version(status, latest);
        Ok(records)
    }

    /// Loads the cache file, replacing the current content.
    ///
    /// On any failure the cache is reset to unknown/empty. Listeners are
    /// notified in every case, since the content was replaced.
    pub fn load(&mut self, path: &Path) -> LoadOutcome {
        let outcome = match persist::read_lines(path) {
            Ok(Some(lines)) => match parse_cache_lines(path, &lines) {
                Ok((status, latest)) => {
                    self.replace(status, latest);
                    LoadOutcome::Loaded
                }
                Err(e) => {
                    self.replace(UNKNOWN_STATUS, BTreeMap::new());
                    persist::load_failed(e)
                }
            },
            Ok(None) => {
                debug!("{} does not exist", path.display());
                self.replace(UNKNOWN_STATUS, BTreeMap::new());
                LoadOutcome::Defaulted
            }
            Err(e) => {
                self.replace(UNKNOWN_STATUS, BTreeMap::new());
                persist::load_failed(e)
            }
        };
        self.notify();
        outcome
    }

    /// Writes the cache file, overwriting it
    pub fn save(&self, path: &Path) -> SaveOutcome {
        let lines = std::iter::once(self.status.to_string()).chain(
            self.latest
                .iter()
                .map(|(module_id, version)| format!("{}:{}", module_id, version)),
        );
        persist::save_result(persist::write_lines(path, lines))
    }

    fn replace(&mut self, status: i32, latest: BTreeMap<String, String>) {
        self.status = status;
        self.latest = latest;
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self);
        }
    }
}

impl Default for AvailableUpdates {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AvailableUpdates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailableUpdates")
            .field("status", &self.status)
            .field("latest", &self.latest)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn parse_cache_lines(
    path: &Path,
    lines: &[String],
) -> Result<(i32, BTreeMap<String, String>), PersistError> {
    let mut iter = lines.iter().enumerate();

    let status = match iter.next() {
        Some((_, first)) if !first.trim().is_empty() => first
            .trim()
            .parse::<i32>()
            .map_err(|e| PersistError::parse(path, 1, format!("status: {}", e)))?,
        _ => UNKNOWN_STATUS,
    };

    let mut latest = BTreeMap::new();
    for (index, line) in iter {
        if line.trim().is_empty() {
            continue;
        }
        let record = UpdateRecord::parse_line(line)
            .ok_or_else(|| PersistError::parse(path, index + 1, "missing ':' separator"))?;
        latest.insert(record.module_id, record.version);
    }

    Ok((status, latest))
}
