//! One generation run: parse, rewrite regions, render, write.

use super::context::GenerationContext;
use super::document::Document;
use super::error::{CodeGenError, CodeGenResult};
use super::pipes::Pipeline;
use super::report::AssetReport;
use super::template::load_asset;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Regenerates GUIslice source files.
pub struct CodeGenerator {
    pipeline: Pipeline,
    template_dir: Option<PathBuf>,
}

impl CodeGenerator {
    /// Creates a generator using the standard pipeline and built-in skeletons.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::standard(),
            template_dir: None,
        }
    }

    /// Looks for skeleton overrides in `dir` first.
    #[must_use]
    pub fn with_template_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.template_dir = dir;
        self
    }

    /// Produces the new text for `existing`, or for a fresh skeleton when
    /// there is no previous output.
    ///
    /// Nothing is written; the caller decides what to do with the text.
    ///
    /// # Errors
    ///
    /// Returns the first structural error, or
    /// [`CodeGenError::AssetErrors`] when fonts or other assets were
    /// missing. In both cases no output should be written.
    pub fn generate(&self, ctx: &GenerationContext<'_>, existing: Option<&str>) -> CodeGenResult<String> {
        let (skeleton, _) = ctx.target.skeleton();
        let text = match existing {
            Some(text) => text.to_string(),
            None => {
                info!("Starting from the {} skeleton", skeleton);
                load_asset(self.template_dir.as_deref(), skeleton)?
            }
        };

        let mut doc = Document::parse(&text)?.with_names(skeleton, ctx.output_name.clone());
        let mut report = AssetReport::new();
        self.pipeline.run(ctx, &mut doc, &mut report)?;
        report.finish(&ctx.log_file)?;
        Ok(doc.render())
    }

    /// Regenerates the file at `path` in place.
    ///
    /// The previous content is read if the file exists. On success the old
    /// file is optionally kept as `<name>.bak` and the new text is written
    /// through a temp file and rename.
    ///
    /// # Errors
    ///
    /// Propagates [`generate`](Self::generate) errors and I/O failures.
    pub fn generate_file(
        &self,
        ctx: &GenerationContext<'_>,
        path: &Path,
        backup: bool,
    ) -> CodeGenResult<String> {
        let existing = if path.exists() {
            Some(
                fs::read_to_string(path)
                    .map_err(|e| CodeGenError::io(format!("Failed to read {}", path.display()), e))?,
            )
        } else {
            None
        };

        let text = self.generate(ctx, existing.as_deref())?;
        if existing.as_deref() == Some(text.as_str()) {
            debug!("{} is unchanged", path.display());
            return Ok(text);
        }
        write_output(path, &text, backup && existing.is_some())?;
        Ok(text)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes generated text, keeping the old file as `.bak` when asked.
///
/// # Errors
///
/// Returns [`CodeGenError::Io`] if any step fails.
pub fn write_output(path: &Path, text: &str, backup: bool) -> CodeGenResult<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| CodeGenError::io(format!("Failed to create directory: {}", dir.display()), e))?;
    }

    if backup && path.exists() {
        let bak = backup_path(path);
        fs::copy(path, &bak)
            .map_err(|e| CodeGenError::io(format!("Failed to write backup: {}", bak.display()), e))?;
        debug!("Saved backup to {}", bak.display());
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, text).map_err(|e| {
        CodeGenError::io(format!("Failed to write temporary file: {}", temp_path.display()), e)
    })?;
    fs::rename(&temp_path, path).map_err(|e| {
        CodeGenError::io(format!("Failed to rename temporary file to: {}", path.display()), e)
    })?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// `demo.ino` becomes `demo.ino.bak`.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}
