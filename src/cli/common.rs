//! Shared CLI plumbing: errors, exit codes and context loading.

use crate::codegen::{CodeGenError, GenerationContext, TargetPlatform, TemplateStore};
use crate::config::Config;
use crate::models::Project;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command succeeded.
    Success = 0,
    /// Bad input: project, config or arguments.
    Validation = 1,
    /// File system failure.
    Io = 2,
    /// The file being regenerated or a template asset is corrupted.
    Corrupted = 3,
    /// Fonts or other assets are missing; details are in the log file.
    Assets = 4,
}

/// Error returned by command handlers.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    code: ExitCode,
    message: String,
}

impl CliError {
    /// Invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// File system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::Io,
            message: message.into(),
        }
    }

    /// Exit code for the process.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl From<CodeGenError> for CliError {
    fn from(err: CodeGenError) -> Self {
        let code = match &err {
            _ if err.is_corruption() => ExitCode::Corrupted,
            CodeGenError::MissingAsset { .. } => ExitCode::Corrupted,
            CodeGenError::AssetErrors { .. } => ExitCode::Assets,
            _ => ExitCode::Io,
        };
        Self {
            code,
            message: err.to_string(),
        }
    }
}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the configuration from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.map_err(|e| CliError::validation(format!("Failed to load config: {e:#}")))
}

/// Loads and validates a project file.
pub fn load_project(path: &Path) -> CliResult<Project> {
    Project::load(path).map_err(|e| CliError::validation(format!("{e:#}")))
}

/// Loads the template fragments, honoring a configured override directory.
pub fn load_templates(config: &Config) -> CliResult<TemplateStore> {
    TemplateStore::load(config.paths.template_dir.as_deref()).map_err(CliError::from)
}

/// Parses a `--target` value.
pub fn parse_target(name: &str) -> CliResult<TargetPlatform> {
    TargetPlatform::from_name(name).ok_or_else(|| {
        CliError::validation(format!(
            "Unknown target '{name}'. Use 'arduino', 'tft_espi' or 'linux'"
        ))
    })
}

/// Output path for a project: `<dir>/<project name>.<ext>`.
#[must_use]
pub fn default_output(project: &Project, target: TargetPlatform, dir: &Path) -> PathBuf {
    let (_, ext) = target.skeleton();
    dir.join(format!("{}.{ext}", project.name))
}

/// Builds the context for a run.
pub fn context<'a>(
    project: &'a Project,
    templates: &'a TemplateStore,
    config: &Config,
    target: TargetPlatform,
    output: &Path,
) -> GenerationContext<'a> {
    let name = output
        .file_name()
        .map_or_else(|| project.name.clone(), |n| n.to_string_lossy().into_owned());
    GenerationContext::from_config(project, templates, config)
        .with_target(target)
        .with_output_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_from_generation_errors() {
        let corrupted = CliError::from(CodeGenError::MissingTag {
            tag: "//<Enum !Start!>".to_string(),
            template: "ino.t".to_string(),
            output: "demo.ino".to_string(),
        });
        assert_eq!(corrupted.exit_code(), 3);
        assert!(corrupted.to_string().contains("//<Enum !Start!>"));

        let assets = CliError::from(CodeGenError::AssetErrors {
            count: 2,
            log_file: PathBuf::from("gen.log"),
        });
        assert_eq!(assets.exit_code(), 4);
    }

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("linux").unwrap(), TargetPlatform::Linux);
        assert_eq!(parse_target("bogus").unwrap_err().exit_code(), 1);
    }

    #[test]
    fn test_default_output() {
        let project = Project::new("panel");
        assert_eq!(
            default_output(&project, TargetPlatform::Linux, Path::new("out")),
            PathBuf::from("out/panel.c")
        );
    }
}
