//! Reading events files.
//!
//! An events file is either a JSON array of records or JSON Lines with one
//! record per line. Records that fail validation are skipped with a warning.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use hearth_core::{Event, EventRecord, events_from_records};

/// Loads every valid event from `path`.
///
/// A missing file is an empty calendar, not an error.
pub fn load_events(path: &Path) -> Result<Arc<[Event]>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                path = %path.display(),
                "events file not found, showing an empty calendar"
            );
            return Ok(Arc::from(Vec::new()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    let records = parse_records(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let events = events_from_records(records);
    tracing::debug!(path = %path.display(), count = events.len(), "loaded events");
    Ok(Arc::from(events))
}

/// Parses a JSON array, or JSON Lines when the content is not an array.
pub fn parse_records(content: &str) -> Result<Vec<EventRecord>> {
    if content.trim_start().starts_with('[') {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(content).context("invalid JSON array of events")?;
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                serde_json::from_value::<EventRecord>(value)
                    .inspect_err(|e| {
                        tracing::warn!(index, error = %e, "skipping malformed record");
                    })
                    .ok()
            })
            .collect();
        return Ok(records);
    }

    let mut records = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<EventRecord>(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line = line_no + 1, error = %e, "skipping malformed line");
            }
        }
    }
    Ok(records)
}
