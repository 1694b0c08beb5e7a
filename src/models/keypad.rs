//! Virtual keypad settings.
//!
//! Number and text inputs pop up a GUIslice keypad. Each keypad lives on
//! its own hidden popup page with fixed enum and storage names.

use serde::{Deserialize, Serialize};

/// Which keypad an input uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadKind {
    /// Numeric keypad for number inputs.
    Numeric,
    /// Alphanumeric keypad for text inputs.
    Alpha,
}

impl KeypadKind {
    /// Popup page enum.
    #[must_use]
    pub const fn page_enum(self) -> &'static str {
        match self {
            Self::Numeric => "E_POP_KEYPAD_NUM",
            Self::Alpha => "E_POP_KEYPAD_ALPHA",
        }
    }

    /// Keypad element enum.
    #[must_use]
    pub const fn elem_enum(self) -> &'static str {
        match self {
            Self::Numeric => "E_ELEM_KEYPAD_NUM",
            Self::Alpha => "E_ELEM_KEYPAD_ALPHA",
        }
    }

    /// Default element reference.
    #[must_use]
    pub const fn default_ref(self) -> &'static str {
        match self {
            Self::Numeric => "m_pElemKeyPadNum",
            Self::Alpha => "m_pElemKeyPadAlpha",
        }
    }

    /// Page element array name.
    #[must_use]
    pub const fn page_storage(self) -> &'static str {
        match self {
            Self::Numeric => "m_asKeypadNumElem",
            Self::Alpha => "m_asKeypadAlphaElem",
        }
    }

    /// Keypad extended element storage.
    #[must_use]
    pub const fn elem_storage(self) -> &'static str {
        match self {
            Self::Numeric => "m_sKeyPadNum",
            Self::Alpha => "m_sKeyPadAlpha",
        }
    }

    /// Suffix used in template fragment names.
    #[must_use]
    pub const fn template_suffix(self) -> &'static str {
        match self {
            Self::Numeric => "NUM",
            Self::Alpha => "TXT",
        }
    }
}

/// Configuration for one keypad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypadConfig {
    /// Element reference for the keypad; the kind's default when unset.
    pub element_ref: Option<String>,
    /// Font display name.
    pub font: Option<String>,
    /// Button width; 0 keeps the GUIslice default.
    pub button_width: u32,
    /// Button height; 0 keeps the GUIslice default.
    pub button_height: u32,
    /// Horizontal gap between buttons.
    pub gap_x: u32,
    /// Vertical gap between buttons.
    pub gap_y: u32,
    /// Rounded button corners.
    pub rounded: bool,
    /// Allow a decimal point (numeric only).
    pub float_enabled: bool,
    /// Allow a sign key (numeric only).
    pub sign_enabled: bool,
    /// Popup x position.
    pub x: i32,
    /// Popup y position.
    pub y: i32,
}

impl KeypadConfig {
    /// Default configuration for a keypad kind.
    #[must_use]
    pub fn for_kind(kind: KeypadKind) -> Self {
        Self {
            element_ref: None,
            font: None,
            button_width: 0,
            button_height: 0,
            gap_x: 0,
            gap_y: 0,
            rounded: false,
            float_enabled: matches!(kind, KeypadKind::Numeric),
            sign_enabled: matches!(kind, KeypadKind::Numeric),
            x: 65,
            y: 80,
        }
    }

    /// Element reference, falling back to the kind's default name.
    #[must_use]
    pub fn element_ref(&self, kind: KeypadKind) -> &str {
        self.element_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(kind.default_ref())
    }

    /// True if a custom button size is configured.
    #[must_use]
    pub const fn has_button_size(&self) -> bool {
        self.button_width > 0 && self.button_height > 0
    }

    /// True if custom button gaps are configured.
    #[must_use]
    pub const fn has_button_gap(&self) -> bool {
        self.gap_x > 0 || self.gap_y > 0
    }
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self::for_kind(KeypadKind::Numeric)
    }
}
