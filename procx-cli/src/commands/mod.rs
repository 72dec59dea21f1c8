pub mod check;
pub mod export;
pub mod list;

use std::path::Path;

use anyhow::{Context, Result};
use procx_core::{parse_procfile, ProcessTypeEntry};

/// Read and parse the Procfile at `path`.
pub(crate) fn read_procfile(path: &Path) -> Result<Vec<ProcessTypeEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read Procfile {}", path.display()))?;
    parse_procfile(&text).with_context(|| format!("invalid Procfile {}", path.display()))
}
