//! Error types for a generation run.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the generator.
pub type CodeGenResult<T> = Result<T, CodeGenError>;

/// Failures that abort a generation run.
///
/// Every variant is fatal: the caller must not write any output when a run
/// ends with one of these.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// A required region marker is absent from the file being regenerated.
    #[error("corrupted template: tag '{tag}' not found in template '{template}' for output '{output}'")]
    MissingTag {
        /// The marker line that was searched for.
        tag: String,
        /// Name of the template asset in use.
        template: String,
        /// Name of the output file being produced.
        output: String,
    },

    /// A start marker has no matching end marker.
    #[error("corrupted template: region '{tag}' is never closed")]
    UnterminatedRegion {
        /// Name of the unclosed region.
        tag: String,
    },

    /// A fragment name is absent from the template asset.
    #[error("corrupted template: fragment '{name}' not found")]
    MissingTemplate {
        /// The bracketed fragment name, e.g. `<BOX>`.
        name: String,
    },

    /// A whole template asset file could not be located.
    #[error("template asset '{name}' not found")]
    MissingAsset {
        /// Asset file name, e.g. `guislice.t`.
        name: String,
    },

    /// Missing fonts, include files and similar problems, reported as one batch.
    #[error("{count} asset error(s) found during generation, see {}", log_file.display())]
    AssetErrors {
        /// Number of problems recorded.
        count: usize,
        /// Log file holding the details.
        log_file: PathBuf,
    },

    /// Underlying file system failure.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// The I/O error itself.
        #[source]
        source: std::io::Error,
    },
}

impl CodeGenError {
    /// Wraps an I/O error with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns true for errors caused by a damaged template or output file.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::MissingTag { .. } | Self::UnterminatedRegion { .. } | Self::MissingTemplate { .. }
        )
    }
}
