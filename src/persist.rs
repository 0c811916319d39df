//! Flat line-oriented files kept in the config directory
//!
//! Local files are advisory state. A failed read leaves the caller's
//! in-memory state at its default and a failed write leaves the old file in
//! place; both are logged and reported through an outcome value rather than
//! an `Err`, so callers decide whether the failure matters.

use crate::error::PersistError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Line terminator used when writing
pub const LINE_ENDING: &str = "\r\n";

/// Result of loading local state
#[derive(Debug)]
pub enum LoadOutcome {
    /// File was read and applied
    Loaded,
    /// File does not exist; state was reset to its default
    Defaulted,
    /// File exists but could not be read or parsed; state was reset to its default
    Failed(PersistError),
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }

    pub fn error(&self) -> Option<&PersistError> {
        match self {
            LoadOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Result of saving local state
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    Failed(PersistError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }

    pub fn error(&self) -> Option<&PersistError> {
        match self {
            SaveOutcome::Failed(e) => Some(e),
            SaveOutcome::Saved => None,
        }
    }
}

/// Reads a file into lines, or `None` if it does not exist
pub fn read_lines(path: &Path) -> Result<Option<Vec<String>>, PersistError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!("Read {}", path.display());
            Ok(Some(content.lines().map(str::to_string).collect()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PersistError::read(path, e)),
    }
}

/// Overwrites a file with the given lines, each terminated by CRLF.
/// Missing parent directories are created.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), PersistError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| PersistError::write(parent, e))?;
        }
    }

    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push_str(LINE_ENDING);
    }

    fs::write(path, content).map_err(|e| PersistError::write(path, e))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Logs a load failure and wraps it
pub(crate) fn load_failed(error: PersistError) -> LoadOutcome {
    warn!("{}; using defaults", error);
    LoadOutcome::Failed(error)
}

/// Logs a save failure and wraps it
pub(crate) fn save_result(result: Result<(), PersistError>) -> SaveOutcome {
    match result {
        Ok(()) => SaveOutcome::Saved,
        Err(error) => {
            warn!("{}", error);
            SaveOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let lines = read_lines(&dir.path().join("missing.cfg")).unwrap();
        assert!(lines.is_none());
    }

    #[test]
    fn test_write_uses_crlf_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.cfg");
        write_lines(&path, ["one", "two"]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "one\r\ntwo\r\n");

        let lines = read_lines(&path).unwrap().unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_read_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_lines(dir.path());
        assert!(matches!(result, Err(PersistError::Read { .. })));
    }

    #[test]
    fn test_save_result_wraps_error() {
        let outcome = save_result(Err(PersistError::parse("/f", 1, "x")));
        assert!(!outcome.is_saved());
        assert!(outcome.error().is_some());
        assert!(save_result(Ok(())).is_saved());
    }
}
