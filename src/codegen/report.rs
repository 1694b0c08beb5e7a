//! Batched asset problems.
//!
//! Pipes record missing fonts and similar non-structural problems here
//! instead of failing on the first one. After the whole pipeline has run
//! the report is turned into a single [`CodeGenError::AssetErrors`].

use super::error::{CodeGenError, CodeGenResult};
use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::error;

/// Category of an asset problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetIssueKind {
    /// A widget names a font that is not in the catalog.
    UnknownFont,
    /// A font's include file is missing from the font directory.
    MissingFontFile,
}

impl fmt::Display for AssetIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFont => write!(f, "unknown font"),
            Self::MissingFontFile => write!(f, "missing font file"),
        }
    }
}

/// One recorded problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetIssue {
    /// Category.
    pub kind: AssetIssueKind,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for AssetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Issues collected during one run.
#[derive(Debug, Default)]
pub struct AssetReport {
    issues: Vec<AssetIssue>,
}

impl AssetReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records and logs an issue.
    pub fn push(&mut self, kind: AssetIssueKind, message: impl Into<String>) {
        let issue = AssetIssue {
            kind,
            message: message.into(),
        };
        error!("{issue}");
        self.issues.push(issue);
    }

    /// Recorded issues in order.
    #[must_use]
    pub fn issues(&self) -> &[AssetIssue] {
        &self.issues
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Appends every issue to `log_file` and converts a non-empty report
    /// into [`CodeGenError::AssetErrors`].
    ///
    /// # Errors
    ///
    /// Returns `AssetErrors` when issues were recorded, or `Io` if the log
    /// file cannot be written.
    pub fn finish(self, log_file: &Path) -> CodeGenResult<()> {
        if self.issues.is_empty() {
            return Ok(());
        }

        if let Some(dir) = log_file.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CodeGenError::io(format!("Failed to create log directory: {}", dir.display()), e)
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .map_err(|e| {
                CodeGenError::io(format!("Failed to open log file: {}", log_file.display()), e)
            })?;

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        for issue in &self.issues {
            writeln!(file, "[{stamp}] {issue}").map_err(|e| {
                CodeGenError::io(format!("Failed to write log file: {}", log_file.display()), e)
            })?;
        }

        Err(CodeGenError::AssetErrors {
            count: self.issues.len(),
            log_file: log_file.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_report_is_ok() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("gen.log");
        assert!(AssetReport::new().finish(&log).is_ok());
        assert!(!log.exists());
    }

    #[test]
    fn test_issues_become_one_error() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("logs").join("gen.log");

        let mut report = AssetReport::new();
        report.push(AssetIssueKind::UnknownFont, "Text$1 uses 'Foo'");
        report.push(AssetIssueKind::MissingFontFile, "Fonts/Bar.h");
        assert_eq!(report.issues().len(), 2);

        match report.finish(&log) {
            Err(CodeGenError::AssetErrors { count, log_file }) => {
                assert_eq!(count, 2);
                assert_eq!(log_file, log);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let content = fs::read_to_string(&log).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("unknown font: Text$1 uses 'Foo'"));
    }
}
