//! RGB color handling with hex parsing and GUIslice color names.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// GUIslice named colors, checked before falling back to a color literal.
const GSLC_COLORS: &[(&str, RgbColor)] = &[
    ("GSLC_COL_BLACK", RgbColor::new(0, 0, 0)),
    ("GSLC_COL_WHITE", RgbColor::new(255, 255, 255)),
    ("GSLC_COL_RED", RgbColor::new(255, 0, 0)),
    ("GSLC_COL_RED_DK2", RgbColor::new(192, 0, 0)),
    ("GSLC_COL_RED_DK4", RgbColor::new(128, 0, 0)),
    ("GSLC_COL_GREEN", RgbColor::new(0, 255, 0)),
    ("GSLC_COL_GREEN_DK2", RgbColor::new(0, 192, 0)),
    ("GSLC_COL_GREEN_DK4", RgbColor::new(0, 128, 0)),
    ("GSLC_COL_BLUE", RgbColor::new(0, 0, 255)),
    ("GSLC_COL_BLUE_DK1", RgbColor::new(0, 0, 224)),
    ("GSLC_COL_BLUE_DK2", RgbColor::new(0, 0, 192)),
    ("GSLC_COL_BLUE_DK4", RgbColor::new(0, 0, 128)),
    ("GSLC_COL_BLUE_LT4", RgbColor::new(128, 128, 255)),
    ("GSLC_COL_YELLOW", RgbColor::new(255, 255, 0)),
    ("GSLC_COL_ORANGE", RgbColor::new(255, 165, 0)),
    ("GSLC_COL_CYAN", RgbColor::new(0, 255, 255)),
    ("GSLC_COL_MAGENTA", RgbColor::new(255, 0, 255)),
    ("GSLC_COL_GRAY", RgbColor::new(128, 128, 128)),
    ("GSLC_COL_GRAY_DK2", RgbColor::new(64, 64, 64)),
    ("GSLC_COL_GRAY_LT2", RgbColor::new(192, 192, 192)),
    ("GSLC_COL_GRAY_LT3", RgbColor::new(224, 224, 224)),
];

/// RGB color value.
///
/// Serialized as a `#RRGGBB` string in project and config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Magenta, the default transparency key.
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    /// Mid gray.
    pub const GRAY: Self = Self::new(128, 128, 128);

    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use slicegen::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, RgbColor::new(255, 0, 0));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Renders the color the way GUIslice code expects it.
    ///
    /// Known colors use their `GSLC_COL_*` name; anything else becomes a
    /// compound literal.
    ///
    /// ```
    /// use slicegen::models::RgbColor;
    ///
    /// assert_eq!(RgbColor::new(128, 128, 128).to_gslc(), "GSLC_COL_GRAY");
    /// assert_eq!(RgbColor::new(1, 2, 3).to_gslc(), "((gslc_tsColor){1,2,3})");
    /// ```
    #[must_use]
    pub fn to_gslc(&self) -> String {
        GSLC_COLORS
            .iter()
            .find(|(_, color)| color == self)
            .map_or_else(
                || format!("((gslc_tsColor){{{},{},{}}})", self.r, self.g, self.b),
                |(name, _)| (*name).to_string(),
            )
    }
}

impl Default for RgbColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}
