//! Configuration management for the generator.
//!
//! Settings live in a TOML file under the platform config directory. A
//! missing file means defaults; saving goes through a temp file and rename.

use crate::codegen::TargetPlatform;
use crate::constants::{APP_DATA_DIR, LOG_FILE_NAME};
use crate::models::{KeypadConfig, KeypadKind, RgbColor};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Directory whose `guislice.t`, `ino.t` and `c.t` replace the built-in assets
    pub template_dir: Option<PathBuf>,
    /// Directory that font include files are checked against
    pub font_dir: Option<PathBuf>,
    /// Asset error log; defaults to `<config dir>/logs/slicegen.log`
    pub log_file: Option<PathBuf>,
}

/// Code generation preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Target runtime
    pub target: TargetPlatform,
    /// Keep hand-edited callback code across runs
    pub round_trip: bool,
    /// Screen rotation 0-3; unset leaves the driver default
    pub screen_rotation: Option<i32>,
    /// Image transparency color
    pub transparency_color: RgbColor,
    /// Keep a `.bak` copy of the previous output
    pub backup: bool,
    /// Create eligible elements in flash (Arduino `_P` constructors)
    pub use_flash: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            target: TargetPlatform::Arduino,
            round_trip: true,
            screen_rotation: None,
            transparency_color: RgbColor::MAGENTA,
            backup: true,
            use_flash: false,
        }
    }
}

fn default_alpha_keypad() -> KeypadConfig {
    KeypadConfig::for_kind(KeypadKind::Alpha)
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Generation preferences
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Numeric keypad
    #[serde(default)]
    pub num_keypad: KeypadConfig,
    /// Alphanumeric keypad
    #[serde(default = "default_alpha_keypad")]
    pub alpha_keypad: KeypadConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: PathConfig::default(),
            generation: GenerationConfig::default(),
            num_keypad: KeypadConfig::for_kind(KeypadKind::Numeric),
            alpha_keypad: default_alpha_keypad(),
        }
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/SliceGen/`
    /// - macOS: `~/Library/Application Support/SliceGen/`
    /// - Windows: `%APPDATA%\SliceGen\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path, defaulting when absent.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration using atomic write (temp file + rename).
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `template_dir` and `font_dir` exist when set
    /// - `screen_rotation` is 0-3 when set
    pub fn validate(&self) -> Result<()> {
        for (label, dir) in [
            ("Template directory", &self.paths.template_dir),
            ("Font directory", &self.paths.font_dir),
        ] {
            if let Some(dir) = dir {
                if !dir.is_dir() {
                    anyhow::bail!("{label} does not exist: {}", dir.display());
                }
            }
        }

        if let Some(rotation) = self.generation.screen_rotation {
            if !(0..=3).contains(&rotation) {
                anyhow::bail!("Screen rotation must be 0-3, got {rotation}");
            }
        }

        Ok(())
    }

    /// Resolved asset error log path.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        if let Some(path) = &self.paths.log_file {
            return path.clone();
        }
        Self::config_dir()
            .map(|dir| dir.join("logs"))
            .unwrap_or_else(|_| std::env::temp_dir())
            .join(LOG_FILE_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.generation.target, TargetPlatform::Arduino);
        assert!(config.generation.round_trip);
        assert!(config.generation.backup);
        assert!(!config.generation.use_flash);
        assert!(!config.alpha_keypad.float_enabled);
        assert!(config.num_keypad.float_enabled);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.generation.target = TargetPlatform::Linux;
        config.generation.screen_rotation = Some(1);
        config.alpha_keypad.rounded = true;
        config.save_to(&config_file).unwrap();

        assert!(!config_file.with_extension("toml.tmp").exists());
        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[generation]\ntarget = \"arduino TFT_eSPI\"\nround_trip = false\nuse_flash = true\n",
        )
        .unwrap();

        let config = Config::load_from(&config_file).unwrap();
        assert_eq!(config.generation.target, TargetPlatform::ArduinoTftEspi);
        assert!(!config.generation.round_trip);
        assert!(config.generation.use_flash);
        assert_eq!(config.generation.transparency_color, RgbColor::MAGENTA);
        assert_eq!(config.alpha_keypad, KeypadConfig::for_kind(KeypadKind::Alpha));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.generation.screen_rotation = Some(7);
        assert!(config.validate().is_err());

        config.generation.screen_rotation = None;
        config.paths.template_dir = Some(PathBuf::from("/definitely/not/here"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Template directory"));
    }

    #[test]
    fn test_log_file_override() {
        let mut config = Config::new();
        config.paths.log_file = Some(PathBuf::from("/tmp/custom.log"));
        assert_eq!(config.log_file_path(), PathBuf::from("/tmp/custom.log"));
    }
}
