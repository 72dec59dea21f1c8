//! Procfile parsing.
//!
//! One process type per line, `name: command`. Blank lines and lines starting
//! with `#` are skipped. Names are `[A-Za-z0-9_-]+` and must be unique.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::ProcessTypeEntry;

/// Parse Procfile text into entries, keeping declared order.
pub fn parse_procfile(text: &str) -> Result<Vec<ProcessTypeEntry>, CoreError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let invalid = || CoreError::InvalidProcfileLine {
            line: line_no,
            content: raw.to_string(),
        };
        let (name, command) = line.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        let command = command.trim();
        if !is_valid_name(name) || command.is_empty() {
            return Err(invalid());
        }
        if !seen.insert(name.to_string()) {
            return Err(CoreError::DuplicateProcessType {
                name: name.to_string(),
                line: line_no,
            });
        }
        entries.push(ProcessTypeEntry::new(name, command)?);
    }

    Ok(entries)
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
