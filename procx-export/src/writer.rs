//! Artifact writer.
//!
//! ## `render`: write protocol
//!
//! 1. Create (or truncate) the output file.
//! 2. Render the template against the context.
//! 3. Write the rendered bytes.
//! 4. `fsync` the file.
//! 5. Set mode `0755`.
//!
//! The mode is applied to every rendered artifact, unit files included.
//! A failing step returns at once; bytes already written stay on disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use procx_core::Target;
use procx_renderer::{RenderContext, TemplateEngine};

use crate::error::ExportError;

/// Mode applied to every rendered artifact.
pub const ARTIFACT_MODE: u32 = 0o755;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Everything one export run touched, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub target: Target,
    /// Directories that did not exist and were created.
    pub directories: Vec<PathBuf>,
    /// Files written (rendered artifacts and side files).
    pub files: Vec<PathBuf>,
    /// Follow-up commands for the operator.
    pub hints: Vec<&'static str>,
}

impl ExportReport {
    pub fn new(target: Target) -> Self {
        ExportReport {
            target,
            directories: Vec::new(),
            files: Vec::new(),
            hints: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactWriter
// ---------------------------------------------------------------------------

/// Renders templates to disk and records what it wrote.
pub struct ArtifactWriter<'a> {
    engine: &'a TemplateEngine,
    report: ExportReport,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(engine: &'a TemplateEngine, target: Target) -> Self {
        ArtifactWriter {
            engine,
            report: ExportReport::new(target),
        }
    }

    /// Create `path` and any missing parents.
    pub fn ensure_dir(&mut self, path: &Path) -> Result<(), ExportError> {
        if path.is_dir() {
            return Ok(());
        }
        tracing::info!("creating: {}", path.display());
        fs::create_dir_all(path).map_err(|source| ExportError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
        self.report.directories.push(path.to_path_buf());
        Ok(())
    }

    /// Render `template` into an executable file at `path`.
    pub fn render(
        &mut self,
        template: &str,
        path: &Path,
        ctx: &dyn RenderContext,
    ) -> Result<(), ExportError> {
        tracing::info!("writing: {}", path.display());

        let mut file = File::create(path).map_err(|source| create_err(path, source))?;
        let content = self.engine.render(template, ctx).map_err(|e| {
            tracing::error!("error rendering {}: {e}", path.display());
            ExportError::from(e)
        })?;
        write_synced(&mut file, path, content.as_bytes())?;
        drop(file);
        set_executable(path)?;

        self.report.files.push(path.to_path_buf());
        Ok(())
    }

    /// Write a plain side file (no template, mode left alone).
    pub fn write_plain(&mut self, path: &Path, contents: &str) -> Result<(), ExportError> {
        tracing::info!("writing: {}", path.display());
        let mut file = File::create(path).map_err(|source| create_err(path, source))?;
        write_synced(&mut file, path, contents.as_bytes())?;
        self.report.files.push(path.to_path_buf());
        Ok(())
    }

    pub fn report(&self) -> &ExportReport {
        &self.report
    }

    pub fn into_report(self) -> ExportReport {
        self.report
    }
}

fn create_err(path: &Path, source: std::io::Error) -> ExportError {
    tracing::error!("error creating file {}: {source}", path.display());
    ExportError::Create {
        path: path.to_path_buf(),
        source,
    }
}

fn write_synced(file: &mut File, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|source| {
            tracing::error!("error writing output {}: {source}", path.display());
            ExportError::Write {
                path: path.to_path_buf(),
                source,
            }
        })
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), ExportError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(ARTIFACT_MODE)).map_err(|source| {
        tracing::error!("error setting mode on {}: {source}", path.display());
        ExportError::Permissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), ExportError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
