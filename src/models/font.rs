//! Font catalog entries referenced by widgets.

use serde::{Deserialize, Serialize};

/// A font the project may use.
///
/// Widgets refer to fonts by [`name`](Self::name); generated code uses the
/// enum and loads the font through `gslc_FontSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontItem {
    /// Display name widgets refer to, e.g. `FreeSans9pt7b`.
    pub name: String,
    /// Font enum, e.g. `E_FREESANS9`.
    #[serde(rename = "enum")]
    pub enum_id: String,
    /// Reference expression passed to `gslc_FontSet`, e.g. `&FreeSans9pt7b`.
    #[serde(default = "default_font_ref")]
    pub font_ref: String,
    /// GUIslice reference type.
    #[serde(default = "default_ref_type")]
    pub ref_type: String,
    /// Scale factor or point size.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Header to include on embedded targets; `None` for built-in fonts.
    #[serde(default)]
    pub include_file: Option<String>,
    /// Font file path on Linux targets.
    #[serde(default)]
    pub define_file: Option<String>,
}

fn default_font_ref() -> String {
    "NULL".to_string()
}

fn default_ref_type() -> String {
    "GSLC_FONTREF_PTR".to_string()
}

const fn default_size() -> u32 {
    1
}

impl FontItem {
    /// The GUIslice built-in 5x8 font.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            name: "BuiltIn(1x)->5x8pt7b".to_string(),
            enum_id: "E_BUILTIN5X8".to_string(),
            font_ref: default_font_ref(),
            ref_type: default_ref_type(),
            size: 1,
            include_file: None,
            define_file: None,
        }
    }

    /// Include file when one is required.
    #[must_use]
    pub fn include(&self) -> Option<&str> {
        self.include_file
            .as_deref()
            .filter(|f| !f.is_empty() && *f != "NULL")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_defaults() {
        let font: FontItem = toml::from_str("name = \"F\"\nenum = \"E_F\"").unwrap();
        assert_eq!(font.font_ref, "NULL");
        assert_eq!(font.ref_type, "GSLC_FONTREF_PTR");
        assert_eq!(font.size, 1);
        assert!(font.include().is_none());
    }

    #[test]
    fn test_null_include_is_none() {
        let mut font = FontItem::builtin();
        font.include_file = Some("NULL".to_string());
        assert!(font.include().is_none());
        font.include_file = Some("Fonts/FreeSans9pt7b.h".to_string());
        assert_eq!(font.include(), Some("Fonts/FreeSans9pt7b.h"));
    }
}
