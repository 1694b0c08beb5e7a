//! Read-only settings for one generation run.
//!
//! Every pipe and emitter receives the same [`GenerationContext`]; nothing
//! in the generator reads global state.

use super::error::CodeGenResult;
use super::template::{MacroMap, TemplateStore};
use crate::config::Config;
use crate::constants::{APP_VERSION, LOG_FILE_NAME};
use crate::models::{FontItem, KeypadConfig, KeypadKind, Project, RgbColor, WidgetType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Target runtime the generated code is built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPlatform {
    /// Arduino with Adafruit-GFX style drivers.
    #[default]
    #[serde(rename = "arduino")]
    Arduino,
    /// Arduino using the TFT_eSPI driver.
    #[serde(rename = "arduino TFT_eSPI")]
    ArduinoTftEspi,
    /// Linux framebuffer.
    #[serde(rename = "linux")]
    Linux,
}

impl TargetPlatform {
    /// Parses the names used in config files and on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "arduino" => Some(Self::Arduino),
            "arduino tft_espi" | "tft_espi" | "arduino-tft-espi" => Some(Self::ArduinoTftEspi),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// True for either Arduino flavor.
    #[must_use]
    pub const fn is_arduino(self) -> bool {
        matches!(self, Self::Arduino | Self::ArduinoTftEspi)
    }

    /// Skeleton asset and output extension for this platform.
    #[must_use]
    pub const fn skeleton(self) -> (&'static str, &'static str) {
        match self {
            Self::Arduino | Self::ArduinoTftEspi => ("ino.t", "ino"),
            Self::Linux => ("c.t", "c"),
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arduino => "arduino",
            Self::ArduinoTftEspi => "arduino TFT_eSPI",
            Self::Linux => "linux",
        };
        f.write_str(name)
    }
}

/// Settings and collaborators for a single run.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    /// The design being generated.
    pub project: &'a Project,
    /// Template fragments.
    pub templates: &'a TemplateStore,
    /// Target runtime.
    pub target: TargetPlatform,
    /// Keep hand-edited callback cases across runs.
    pub round_trip: bool,
    /// Create eligible elements in flash with the `_P` constructors.
    pub use_flash: bool,
    /// Numeric keypad settings.
    pub num_keypad: KeypadConfig,
    /// Alphanumeric keypad settings.
    pub alpha_keypad: KeypadConfig,
    /// Color treated as transparent in images.
    pub transparency_color: RgbColor,
    /// Screen rotation, if overridden.
    pub rotation: Option<i32>,
    /// Directory to check font include files against.
    pub font_dir: Option<PathBuf>,
    /// Where batched asset errors are written.
    pub log_file: PathBuf,
    /// Output file name used in headers and error messages.
    pub output_name: String,
    /// Tool version stamped into the file header.
    pub version: String,
}

impl<'a> GenerationContext<'a> {
    /// Creates a context with default settings.
    #[must_use]
    pub fn new(project: &'a Project, templates: &'a TemplateStore) -> Self {
        Self {
            project,
            templates,
            target: TargetPlatform::Arduino,
            round_trip: true,
            use_flash: false,
            num_keypad: KeypadConfig::for_kind(KeypadKind::Numeric),
            alpha_keypad: KeypadConfig::for_kind(KeypadKind::Alpha),
            transparency_color: RgbColor::MAGENTA,
            rotation: None,
            font_dir: None,
            log_file: std::env::temp_dir().join(LOG_FILE_NAME),
            output_name: format!("{}.ino", project.name),
            version: APP_VERSION.to_string(),
        }
    }

    /// Creates a context from the user configuration.
    #[must_use]
    pub fn from_config(project: &'a Project, templates: &'a TemplateStore, config: &Config) -> Self {
        let gen = &config.generation;
        let (_, ext) = gen.target.skeleton();
        Self {
            target: gen.target,
            round_trip: gen.round_trip,
            use_flash: gen.use_flash,
            num_keypad: config.num_keypad.clone(),
            alpha_keypad: config.alpha_keypad.clone(),
            transparency_color: gen.transparency_color,
            rotation: gen.screen_rotation,
            font_dir: config.paths.font_dir.clone(),
            log_file: config.log_file_path(),
            output_name: format!("{}.{ext}", project.name),
            ..Self::new(project, templates)
        }
    }

    /// Sets the target platform.
    pub fn with_target(mut self, target: TargetPlatform) -> Self {
        self.target = target;
        self
    }

    /// Enables or disables callback preservation.
    pub fn with_round_trip(mut self, enabled: bool) -> Self {
        self.round_trip = enabled;
        self
    }

    /// Enables or disables flash element storage.
    pub fn with_flash(mut self, enabled: bool) -> Self {
        self.use_flash = enabled;
        self
    }

    /// Sets the output file name.
    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = name.into();
        self
    }

    /// Sets the asset error log file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Loads and expands a template fragment.
    pub fn expand(&self, name: &str, map: &MacroMap) -> CodeGenResult<Vec<String>> {
        self.templates.expand(name, map)
    }

    /// Loads a fragment without expansion.
    pub fn template(&self, name: &str) -> CodeGenResult<Vec<String>> {
        self.templates.load_template(name)
    }

    /// Settings for a keypad kind.
    #[must_use]
    pub const fn keypad(&self, kind: KeypadKind) -> &KeypadConfig {
        match kind {
            KeypadKind::Numeric => &self.num_keypad,
            KeypadKind::Alpha => &self.alpha_keypad,
        }
    }

    /// Element reference of a keypad.
    #[must_use]
    pub fn keypad_ref(&self, kind: KeypadKind) -> &str {
        self.keypad(kind).element_ref(kind)
    }

    /// True if any input needs this keypad.
    #[must_use]
    pub fn uses_keypad(&self, kind: KeypadKind) -> bool {
        let ty = match kind {
            KeypadKind::Numeric => WidgetType::NumberInput,
            KeypadKind::Alpha => WidgetType::TextInput,
        };
        self.project.has_widget_type(ty)
    }

    /// Keypads in use, numeric first.
    #[must_use]
    pub fn keypads_in_use(&self) -> Vec<KeypadKind> {
        [KeypadKind::Numeric, KeypadKind::Alpha]
            .into_iter()
            .filter(|k| self.uses_keypad(*k))
            .collect()
    }

    /// Resolves a font display name against the catalog.
    ///
    /// `None` selects the built-in font.
    #[must_use]
    pub fn resolve_font(&self, name: Option<&str>) -> Option<FontItem> {
        let builtin = FontItem::builtin();
        match name.filter(|n| !n.is_empty()) {
            None => Some(self.project.font(&builtin.name).cloned().unwrap_or(builtin)),
            Some(n) if n == builtin.name => {
                Some(self.project.font(n).cloned().unwrap_or(builtin))
            }
            Some(n) => self.project.font(n).cloned(),
        }
    }

    /// Font enum for a widget or keypad font; unknown fonts fall back to
    /// the built-in font and are reported by the fonts pass.
    #[must_use]
    pub fn font_enum(&self, name: Option<&str>) -> String {
        self.resolve_font(name)
            .unwrap_or_else(FontItem::builtin)
            .enum_id
    }

    /// Font names referenced by font-bearing widgets and used keypads.
    #[must_use]
    pub fn referenced_fonts(&self) -> Vec<Option<String>> {
        let mut names: Vec<Option<String>> = self
            .project
            .widgets()
            .filter(|(_, w)| uses_font(w.widget_type()))
            .map(|(_, w)| w.font.clone())
            .collect();
        for kind in self.keypads_in_use() {
            names.push(self.keypad(kind).font.clone());
        }
        names
    }

    /// Fonts the generated code loads, sorted by enum with duplicates
    /// removed. Unknown names count as the built-in font.
    #[must_use]
    pub fn fonts_in_use(&self) -> Vec<FontItem> {
        let mut fonts: Vec<FontItem> = self
            .referenced_fonts()
            .iter()
            .map(|name| {
                self.resolve_font(name.as_deref())
                    .unwrap_or_else(FontItem::builtin)
            })
            .collect();
        fonts.sort_by(|a, b| a.enum_id.cmp(&b.enum_id));
        fonts.dedup_by(|a, b| a.enum_id == b.enum_id);
        fonts
    }
}

/// True for widget types that draw text.
#[must_use]
pub const fn uses_font(ty: WidgetType) -> bool {
    matches!(
        ty,
        WidgetType::ListBox
            | WidgetType::NumberInput
            | WidgetType::RingGauge
            | WidgetType::Spinner
            | WidgetType::Text
            | WidgetType::TextBox
            | WidgetType::TextInput
            | WidgetType::TextButton
    )
}
