//! Parsers for the line-oriented catalog responses

use crate::domain::UpdateRecord;
use crate::error::CatalogError;

/// Status reported when the catalog gave no answer
pub const UNKNOWN_STATUS: i32 = -1;

/// Parses the single-line status response.
///
/// An empty body or an empty first line means "unknown"; anything else
/// must be an integer.
pub fn parse_status(body: &str, operation: &str) -> Result<i32, CatalogError> {
    let line = match body.lines().next() {
        Some(line) => line.trim(),
        None => return Ok(UNKNOWN_STATUS),
    };

    if line.is_empty() {
        return Ok(UNKNOWN_STATUS);
    }

    line.parse::<i32>().map_err(|e| {
        CatalogError::malformed(
            operation,
            None,
            format!("status line '{}' is not an integer: {}", line, e),
        )
    })
}

/// Parses the single-line remote file path response. Empty is an error.
pub fn parse_addon_file(body: &str, operation: &str, addon_id: &str) -> Result<String, CatalogError> {
    let line = body.lines().next().map(str::trim).unwrap_or("");
    if line.is_empty() {
        return Err(CatalogError::malformed(
            operation,
            Some(addon_id),
            "empty file path",
        ));
    }
    Ok(line.to_string())
}

/// Parses `moduleId:version` lines, skipping blank ones
pub fn parse_update_records(body: &str, operation: &str) -> Result<Vec<UpdateRecord>, CatalogError> {
    let mut records = Vec::new();

    for (index, line) in body.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let record = UpdateRecord::parse_line(line).ok_or_else(|| {
            CatalogError::malformed(
                operation,
                None,
                format!("line {} has no ':' separator: '{}'", index + 1, line),
            )
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Returns the body with line terminators normalized to `\n` and no trailing newline
pub fn join_lines(body: &str) -> String {
    body.lines().collect::<Vec<_>>().join("\n")
}
