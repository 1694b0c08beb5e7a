//! Widget models: one per control placed on a page.
//!
//! A [`WidgetModel`] carries the identity and geometry every control shares
//! plus a [`WidgetKind`] holding the type-specific properties. In project
//! files the kind is selected by a `type` field and its properties sit
//! alongside the common ones:
//!
//! ```toml
//! [[pages.widgets]]
//! type = "TextButton"
//! key = "TextButton$1"
//! enum = "E_ELEM_BTN1"
//! x = 10
//! y = 10
//! width = 80
//! height = 40
//! text = "Next"
//! jump_page = "E_PG_SECOND"
//! ```

// Property fields mirror project-file keys one to one
#![allow(missing_docs)]

use super::rgb::RgbColor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Group id used when a widget belongs to no group.
pub const GROUP_NONE: &str = "GSLC_GROUP_ID_NONE";
/// Enum value for widgets that let GUIslice assign their id.
pub const ID_AUTO: &str = "GSLC_ID_AUTO";
/// Default text alignment for plain text and inputs.
pub const ALIGN_LEFT: &str = "GSLC_ALIGN_MID_LEFT";
/// Default text alignment for buttons.
pub const ALIGN_MID: &str = "GSLC_ALIGN_MID_MID";

const GRAY_LT2: RgbColor = RgbColor::new(192, 192, 192);
const GRAY_LT3: RgbColor = RgbColor::new(224, 224, 224);
const GRAY_DK2: RgbColor = RgbColor::new(64, 64, 64);
const BLUE_DK1: RgbColor = RgbColor::new(0, 0, 224);
const BLUE_DK2: RgbColor = RgbColor::new(0, 0, 192);
const BLUE_DK4: RgbColor = RgbColor::new(0, 0, 128);
const BLUE_LT4: RgbColor = RgbColor::new(128, 128, 255);
const ORANGE: RgbColor = RgbColor::new(255, 165, 0);

/// Widget type, used for key and enum generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetType {
    /// Filled rectangle
    Box,
    /// Checkbox
    CheckBox,
    /// Static image
    Image,
    /// Image button
    ImageButton,
    /// Straight line
    Line,
    /// List box
    ListBox,
    /// Numeric input field
    NumberInput,
    /// Ring gauge
    RingGauge,
    /// Slider
    Slider,
    /// Spinner
    Spinner,
    /// Static or updatable text
    Text,
    /// Multi-line text box
    TextBox,
    /// Alphanumeric input field
    TextInput,
    /// Text button
    TextButton,
    /// Toggle switch
    ToggleButton,
}

impl WidgetType {
    /// Type name used in widget keys, e.g. `Box` in `Box$3`.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Box => "Box",
            Self::CheckBox => "CheckBox",
            Self::Image => "Image",
            Self::ImageButton => "ImageButton",
            Self::Line => "Line",
            Self::ListBox => "ListBox",
            Self::NumberInput => "NumberInput",
            Self::RingGauge => "RingGauge",
            Self::Slider => "Slider",
            Self::Spinner => "Spinner",
            Self::Text => "Text",
            Self::TextBox => "TextBox",
            Self::TextInput => "TextInput",
            Self::TextButton => "TextButton",
            Self::ToggleButton => "ToggleButton",
        }
    }

    /// Enum prefix the ordinal is appended to.
    #[must_use]
    pub const fn enum_prefix(self) -> &'static str {
        match self {
            Self::Box => "E_ELEM_BOX",
            Self::CheckBox => "E_ELEM_CHECK",
            Self::Image => "E_ELEM_IMAGE",
            Self::ImageButton => "E_ELEM_IMAGEBTN",
            Self::Line => "E_DRAW_LINE",
            Self::ListBox => "E_ELEM_LISTBOX",
            Self::NumberInput => "E_ELEM_NUMINPUT",
            Self::RingGauge => "E_ELEM_RINGGAUGE",
            Self::Slider => "E_ELEM_SLIDER",
            Self::Spinner => "E_ELEM_SPINNER",
            Self::Text => "E_ELEM_TEXT",
            Self::TextBox => "E_ELEM_TEXTBOX",
            Self::TextInput => "E_ELEM_TEXTINPUT",
            Self::TextButton => "E_ELEM_BTN",
            Self::ToggleButton => "E_ELEM_TOGGLE",
        }
    }
}

/// What pressing a button does besides running user code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Nothing generated beyond the empty case.
    None,
    /// Switch to another page.
    ChangePage(String),
    /// Show a popup page.
    ShowPopup(String),
    /// Hide the current popup.
    HidePopup,
}

/// Navigation settings shared by text and image buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonNav {
    /// Page enum to switch to.
    pub jump_page: Option<String>,
    /// Popup page enum to show.
    pub popup_page: Option<String>,
    /// Hide the active popup.
    pub hide_popup: bool,
}

impl ButtonNav {
    /// Resolves the action; a page jump wins over a popup.
    #[must_use]
    pub fn action(&self) -> ButtonAction {
        if let Some(page) = non_empty(self.jump_page.as_deref()) {
            ButtonAction::ChangePage(page.to_string())
        } else if let Some(page) = non_empty(self.popup_page.as_deref()) {
            ButtonAction::ShowPopup(page.to_string())
        } else if self.hide_popup {
            ButtonAction::HidePopup
        } else {
            ButtonAction::None
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Frame, fill and selected-state colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElemColors {
    /// Frame color
    pub frame: RgbColor,
    /// Fill color
    pub fill: RgbColor,
    /// Fill color while touched
    pub selected: RgbColor,
}

impl ElemColors {
    const fn new(frame: RgbColor, fill: RgbColor, selected: RgbColor) -> Self {
        Self {
            frame,
            fill,
            selected,
        }
    }

    /// Default colors for most element types.
    pub const STANDARD: Self = Self::new(RgbColor::GRAY, RgbColor::BLACK, RgbColor::BLACK);
    /// Default colors for text buttons.
    pub const BUTTON: Self = Self::new(BLUE_DK2, BLUE_DK4, BLUE_DK1);
}

impl Default for ElemColors {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Box properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxProps {
    pub rounded: bool,
    pub touch: bool,
    pub draw_func: bool,
    pub tick_func: bool,
    pub frame_enabled: bool,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for BoxProps {
    fn default() -> Self {
        Self {
            rounded: false,
            touch: false,
            draw_func: false,
            tick_func: false,
            frame_enabled: true,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Checkbox properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckBoxProps {
    pub checked: bool,
    pub style: String,
    pub mark_color: RgbColor,
    pub callback: bool,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for CheckBoxProps {
    fn default() -> Self {
        Self {
            checked: false,
            style: "GSLCX_CHECKBOX_STYLE_X".to_string(),
            mark_color: ORANGE,
            callback: false,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Where an image's pixels come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSource {
    /// `#define` name for the image file path.
    pub define: String,
    /// Image file path written into the define.
    pub file: String,
    /// Symbol of a compiled-in bitmap; when set the image is external.
    pub extern_name: Option<String>,
    /// Load from SD card instead of the file system.
    pub from_sd: bool,
}

impl ImageSource {
    /// True if the bitmap is compiled into flash.
    #[must_use]
    pub fn is_extern(&self) -> bool {
        non_empty(self.extern_name.as_deref()).is_some()
    }

    /// True if the image is read from the file system at runtime.
    #[must_use]
    pub fn is_file(&self) -> bool {
        !self.is_extern() && !self.from_sd
    }

    /// GUIslice loader function for the image.
    #[must_use]
    pub fn loader(&self) -> &'static str {
        if self.is_extern() {
            "gslc_GetImageFromProg"
        } else if self.from_sd {
            "gslc_GetImageFromSD"
        } else {
            "gslc_GetImageFromFile"
        }
    }
}

/// Image properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageProps {
    #[serde(flatten)]
    pub source: ImageSource,
    pub format: String,
    pub transparent: bool,
    pub touch: bool,
    pub frame_enabled: bool,
    pub frame_color: RgbColor,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            source: ImageSource::default(),
            format: "GSLC_IMGREF_FMT_BMP24".to_string(),
            transparent: false,
            touch: false,
            frame_enabled: false,
            frame_color: RgbColor::GRAY,
        }
    }
}

/// Image button properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgButtonProps {
    #[serde(flatten)]
    pub source: ImageSource,
    pub selected_define: String,
    pub selected_file: String,
    pub selected_extern: Option<String>,
    pub format: String,
    pub toggle: bool,
    pub transparent: bool,
    pub frame_enabled: bool,
    pub frame_color: RgbColor,
    #[serde(flatten)]
    pub nav: ButtonNav,
}

impl Default for ImgButtonProps {
    fn default() -> Self {
        Self {
            source: ImageSource::default(),
            selected_define: String::new(),
            selected_file: String::new(),
            selected_extern: None,
            format: "GSLC_IMGREF_FMT_BMP24".to_string(),
            toggle: false,
            transparent: false,
            frame_enabled: false,
            frame_color: RgbColor::GRAY,
            nav: ButtonNav::default(),
        }
    }
}

/// Line properties. The widget width is the line length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineProps {
    pub vertical: bool,
    pub color: RgbColor,
}

impl Default for LineProps {
    fn default() -> Self {
        Self {
            vertical: false,
            color: GRAY_LT2,
        }
    }
}

/// List box properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListBoxProps {
    pub items: Vec<String>,
    pub storage: usize,
    pub gap: i32,
    pub selected: i32,
    pub scrollbar: bool,
    pub align: String,
    pub frame_enabled: bool,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for ListBoxProps {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            storage: 100,
            gap: 0,
            selected: -1,
            scrollbar: false,
            align: ALIGN_LEFT.to_string(),
            frame_enabled: false,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Text entry properties shared by numeric and text inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputProps {
    pub value: String,
    pub storage: usize,
    pub align: String,
    pub margin: i32,
    pub fill_enabled: bool,
    pub utf8: bool,
    pub text_color: RgbColor,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for InputProps {
    fn default() -> Self {
        Self {
            value: String::new(),
            storage: 10,
            align: ALIGN_LEFT.to_string(),
            margin: 5,
            fill_enabled: true,
            utf8: false,
            text_color: RgbColor::YELLOW,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Ring gauge properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingGaugeProps {
    pub value: i32,
    pub min: i32,
    pub max: i32,
    pub thickness: i32,
    pub segments: i32,
    pub clockwise: bool,
    pub start_angle: i32,
    pub angle_range: i32,
    pub gradient: bool,
    pub active_color: RgbColor,
    pub gradient_start: RgbColor,
    pub gradient_end: RgbColor,
    pub inactive_color: RgbColor,
    pub text_color: RgbColor,
    pub fill_color: RgbColor,
    pub storage: usize,
}

impl RingGaugeProps {
    /// Default line thickness.
    pub const DEF_THICKNESS: i32 = 10;
    /// Default segment count.
    pub const DEF_SEGMENTS: i32 = 72;
    /// Default angular range.
    pub const DEF_RANGE: i32 = 360;
    /// Default active color.
    pub const DEF_ACTIVE: RgbColor = BLUE_LT4;
    /// Default inactive color.
    pub const DEF_INACTIVE: RgbColor = GRAY_DK2;
}

impl Default for RingGaugeProps {
    fn default() -> Self {
        Self {
            value: 0,
            min: 0,
            max: 100,
            thickness: Self::DEF_THICKNESS,
            segments: Self::DEF_SEGMENTS,
            clockwise: true,
            start_angle: 0,
            angle_range: Self::DEF_RANGE,
            gradient: false,
            active_color: Self::DEF_ACTIVE,
            gradient_start: BLUE_LT4,
            gradient_end: RgbColor::new(255, 0, 0),
            inactive_color: Self::DEF_INACTIVE,
            text_color: RgbColor::YELLOW,
            fill_color: RgbColor::BLACK,
            storage: 10,
        }
    }
}

/// Slider properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderProps {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub thumb_size: i32,
    pub vertical: bool,
    pub tick_divisions: i32,
    pub tick_size: i32,
    pub tick_color: RgbColor,
    pub trim: bool,
    pub trim_color: RgbColor,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for SliderProps {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
            value: 0,
            thumb_size: 5,
            vertical: false,
            tick_divisions: 10,
            tick_size: 5,
            tick_color: RgbColor::GRAY,
            trim: false,
            trim_color: BLUE_LT4,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Spinner properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinnerProps {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub increment: i32,
    pub increment_char: String,
    pub decrement_char: String,
}

impl SpinnerProps {
    /// Default increment arrow.
    pub const DEF_INCR: &'static str = "+";
    /// Default decrement arrow.
    pub const DEF_DECR: &'static str = "-";
}

impl Default for SpinnerProps {
    fn default() -> Self {
        Self {
            min: 0,
            max: 99,
            value: 0,
            increment: 1,
            increment_char: Self::DEF_INCR.to_string(),
            decrement_char: Self::DEF_DECR.to_string(),
        }
    }
}

/// Static text properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextProps {
    pub text: String,
    /// Runtime buffer size; 0 keeps the text constant.
    pub storage: usize,
    pub align: String,
    pub margin: i32,
    pub fill_enabled: bool,
    pub frame_enabled: bool,
    pub utf8: bool,
    pub text_color: RgbColor,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            storage: 0,
            align: ALIGN_LEFT.to_string(),
            margin: 0,
            fill_enabled: true,
            frame_enabled: false,
            utf8: false,
            text_color: RgbColor::YELLOW,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Text box properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxProps {
    pub rows: usize,
    pub cols: usize,
    pub wrap: bool,
    pub scrollbar: bool,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
}

impl Default for TextBoxProps {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 20,
            wrap: true,
            scrollbar: false,
            frame_color: ElemColors::STANDARD.frame,
            fill_color: ElemColors::STANDARD.fill,
            selected_color: ElemColors::STANDARD.selected,
        }
    }
}

/// Text button properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxtButtonProps {
    pub text: String,
    pub storage: usize,
    pub align: String,
    pub margin: i32,
    pub rounded: bool,
    pub fill_enabled: bool,
    pub frame_enabled: bool,
    pub utf8: bool,
    pub text_color: RgbColor,
    pub frame_color: RgbColor,
    pub fill_color: RgbColor,
    pub selected_color: RgbColor,
    #[serde(flatten)]
    pub nav: ButtonNav,
}

impl Default for TxtButtonProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            storage: 0,
            align: ALIGN_MID.to_string(),
            margin: 0,
            rounded: false,
            fill_enabled: true,
            frame_enabled: true,
            utf8: false,
            text_color: RgbColor::WHITE,
            frame_color: ElemColors::BUTTON.frame,
            fill_color: ElemColors::BUTTON.fill,
            selected_color: ElemColors::BUTTON.selected,
            nav: ButtonNav::default(),
        }
    }
}

/// Toggle button properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleButtonProps {
    pub on: bool,
    pub circular: bool,
    pub on_color: RgbColor,
    pub off_color: RgbColor,
    pub thumb_color: RgbColor,
    pub frame_color: RgbColor,
}

impl Default for ToggleButtonProps {
    fn default() -> Self {
        Self {
            on: false,
            circular: false,
            on_color: BLUE_DK1,
            off_color: GRAY_LT3,
            thumb_color: RgbColor::GRAY,
            frame_color: RgbColor::GRAY,
        }
    }
}

macro_rules! impl_colors {
    ($($props:ty),* $(,)?) => {
        $(impl $props {
            /// Frame, fill and selected colors as one value.
            #[must_use]
            pub const fn colors(&self) -> ElemColors {
                ElemColors::new(self.frame_color, self.fill_color, self.selected_color)
            }
        })*
    };
}

impl_colors!(
    BoxProps,
    CheckBoxProps,
    ListBoxProps,
    InputProps,
    SliderProps,
    TextProps,
    TextBoxProps,
    TxtButtonProps,
);

/// Type-specific widget properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WidgetKind {
    Box(BoxProps),
    CheckBox(CheckBoxProps),
    Image(ImageProps),
    #[serde(rename = "ImageButton")]
    ImgButton(ImgButtonProps),
    Line(LineProps),
    ListBox(ListBoxProps),
    #[serde(rename = "NumberInput")]
    NumInput(InputProps),
    RingGauge(RingGaugeProps),
    Slider(SliderProps),
    Spinner(SpinnerProps),
    Text(TextProps),
    TextBox(TextBoxProps),
    TextInput(InputProps),
    #[serde(rename = "TextButton")]
    TxtButton(TxtButtonProps),
    ToggleButton(ToggleButtonProps),
}

impl WidgetKind {
    /// The widget type of these properties.
    #[must_use]
    pub const fn widget_type(&self) -> WidgetType {
        match self {
            Self::Box(_) => WidgetType::Box,
            Self::CheckBox(_) => WidgetType::CheckBox,
            Self::Image(_) => WidgetType::Image,
            Self::ImgButton(_) => WidgetType::ImageButton,
            Self::Line(_) => WidgetType::Line,
            Self::ListBox(_) => WidgetType::ListBox,
            Self::NumInput(_) => WidgetType::NumberInput,
            Self::RingGauge(_) => WidgetType::RingGauge,
            Self::Slider(_) => WidgetType::Slider,
            Self::Spinner(_) => WidgetType::Spinner,
            Self::Text(_) => WidgetType::Text,
            Self::TextBox(_) => WidgetType::TextBox,
            Self::TextInput(_) => WidgetType::TextInput,
            Self::TxtButton(_) => WidgetType::TextButton,
            Self::ToggleButton(_) => WidgetType::ToggleButton,
        }
    }
}

/// One placed control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetModel {
    /// Unique key, type name plus ordinal: `Box$3`.
    pub key: String,
    /// C identifier for the element: `E_ELEM_BOX3`.
    #[serde(rename = "enum")]
    pub enum_id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// C variable holding a handle to the element, if any.
    #[serde(default)]
    pub element_ref: Option<String>,
    /// Font display name.
    #[serde(default)]
    pub font: Option<String>,
    /// Group enum for radio-style grouping.
    #[serde(default)]
    pub group: Option<String>,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

impl WidgetModel {
    /// Creates a widget at the given geometry.
    pub fn new(
        key: impl Into<String>,
        enum_id: impl Into<String>,
        geometry: (i32, i32, i32, i32),
        kind: WidgetKind,
    ) -> Self {
        let (x, y, width, height) = geometry;
        Self {
            key: key.into(),
            enum_id: enum_id.into(),
            x,
            y,
            width,
            height,
            element_ref: None,
            font: None,
            group: None,
            kind,
        }
    }

    /// Sets the element reference.
    pub fn with_element_ref(mut self, element_ref: impl Into<String>) -> Self {
        self.element_ref = Some(element_ref.into());
        self
    }

    /// Sets the font display name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Sets the group enum.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The widget's type.
    #[must_use]
    pub const fn widget_type(&self) -> WidgetType {
        self.kind.widget_type()
    }

    /// Element reference, or an empty string when none is set.
    #[must_use]
    pub fn element_ref(&self) -> &str {
        self.element_ref.as_deref().unwrap_or("")
    }

    /// True if a non-empty element reference is set.
    #[must_use]
    pub fn has_element_ref(&self) -> bool {
        !self.element_ref().is_empty()
    }

    /// Group enum, or [`GROUP_NONE`].
    #[must_use]
    pub fn group(&self) -> &str {
        non_empty(self.group.as_deref()).unwrap_or(GROUP_NONE)
    }

    /// True if the widget belongs to a group.
    #[must_use]
    pub fn has_group(&self) -> bool {
        self.group() != GROUP_NONE
    }

    /// Ordinal part of the key: `3` for `Box$3`.
    #[must_use]
    pub fn key_count(&self) -> &str {
        self.key.rsplit_once('$').map_or("", |(_, n)| n)
    }

    /// Enum and element reference of an embedded scrollbar, if present.
    #[must_use]
    pub fn scrollbar(&self) -> Option<(String, String)> {
        let count = self.key_count();
        match &self.kind {
            WidgetKind::ListBox(p) if p.scrollbar => Some((
                format!("E_LISTSCROLL{count}"),
                format!("m_pListSlider{count}"),
            )),
            WidgetKind::TextBox(p) if p.scrollbar => Some((
                format!("E_TXTSCROLL{count}"),
                format!("m_pTextSlider{count}"),
            )),
            _ => None,
        }
    }

    /// Builds the macro map for this widget's template fragments.
    ///
    /// The font enum is resolved by the caller and inserted as `FONT_ID`.
    #[must_use]
    pub fn macro_map(&self, page_enum: &str) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let mut put = |k: &str, v: String| {
            map.insert(k.to_string(), v);
        };

        put("KEY", self.key.replace('$', ""));
        put("ENUM", self.enum_id.clone());
        put("PAGE_ENUM", page_enum.to_string());
        put("COUNT", self.key_count().to_string());
        put("ELEMREF", self.element_ref().to_string());
        put("X", self.x.to_string());
        put("Y", self.y.to_string());
        put("W", self.width.to_string());
        put("H", self.height.to_string());
        put("GROUP", self.group().to_string());

        match &self.kind {
            WidgetKind::Box(p) => put_colors(&mut put, &p.colors()),
            WidgetKind::CheckBox(p) => {
                put("CHECKED", p.checked.to_string());
                put("STYLE", p.style.clone());
                put("MARK_COLOR", p.mark_color.to_gslc());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::Image(p) => {
                put_image(&mut put, &p.source, &p.format);
                put("FRAME_COLOR", p.frame_color.to_gslc());
            }
            WidgetKind::ImgButton(p) => {
                put_image(&mut put, &p.source, &p.format);
                put("IMAGE_SEL_DEFINE", p.selected_define.clone());
                put(
                    "IMAGE_SEL_EXTERN",
                    p.selected_extern.clone().unwrap_or_default(),
                );
                put("FRAME_COLOR", p.frame_color.to_gslc());
            }
            WidgetKind::Line(p) => {
                let (x1, y1) = if p.vertical {
                    (self.x, self.y + self.width)
                } else {
                    (self.x + self.width, self.y)
                };
                put("X1", x1.to_string());
                put("Y1", y1.to_string());
                put("LINE_COLOR", p.color.to_gslc());
            }
            WidgetKind::ListBox(p) => {
                put("STORAGE", p.storage.to_string());
                put("GAP", p.gap.to_string());
                put("SELECTED", p.selected.to_string());
                put("ALIGN", p.align.clone());
                put("ITEM_COUNT", p.items.len().to_string());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::NumInput(p) | WidgetKind::TextInput(p) => {
                put("TEXT", c_string(&p.value));
                put("STORAGE", (p.storage + 1).to_string());
                put("ALIGN", p.align.clone());
                put("MARGIN", p.margin.to_string());
                put("TEXT_COLOR", p.text_color.to_gslc());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::RingGauge(p) => {
                put("VALUE", p.value.to_string());
                put("MIN", p.min.to_string());
                put("MAX", p.max.to_string());
                put("THICKNESS", p.thickness.to_string());
                put("SEGMENTS", p.segments.to_string());
                put("START_ANGLE", p.start_angle.to_string());
                put("ANGLE_RANGE", p.angle_range.to_string());
                put("CLOCKWISE", p.clockwise.to_string());
                put("ACTIVE_COLOR", p.active_color.to_gslc());
                put("GRADIENT_START", p.gradient_start.to_gslc());
                put("GRADIENT_END", p.gradient_end.to_gslc());
                put("INACTIVE_COLOR", p.inactive_color.to_gslc());
                put("TEXT_COLOR", p.text_color.to_gslc());
                put("FILL_COLOR", p.fill_color.to_gslc());
                put("STORAGE", (p.storage + 1).to_string());
            }
            WidgetKind::Slider(p) => {
                put("MIN", p.min.to_string());
                put("MAX", p.max.to_string());
                put("VALUE", p.value.to_string());
                put("THUMB_SZ", p.thumb_size.to_string());
                put("VERTICAL", p.vertical.to_string());
                put("TICK_DIV", p.tick_divisions.to_string());
                put("TICK_SZ", p.tick_size.to_string());
                put("TICK_COLOR", p.tick_color.to_gslc());
                put("TRIM", p.trim.to_string());
                put("TRIM_COLOR", p.trim_color.to_gslc());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::Spinner(p) => {
                put("MIN", p.min.to_string());
                put("MAX", p.max.to_string());
                put("VALUE", p.value.to_string());
                put("INCREMENT", p.increment.to_string());
                put("INCR_CHAR", c_char(&p.increment_char));
                put("DECR_CHAR", c_char(&p.decrement_char));
            }
            WidgetKind::Text(p) => {
                put("TEXT", c_string(&p.text));
                put("STORAGE", (p.storage + 1).to_string());
                put("ALIGN", p.align.clone());
                put("MARGIN", p.margin.to_string());
                put("TEXT_COLOR", p.text_color.to_gslc());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::TextBox(p) => {
                put("ROWS", p.rows.to_string());
                put("COLS", p.cols.to_string());
                put("WRAP", p.wrap.to_string());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::TxtButton(p) => {
                put("TEXT", c_string(&p.text));
                put("STORAGE", (p.storage + 1).to_string());
                put("ALIGN", p.align.clone());
                put("MARGIN", p.margin.to_string());
                put("TEXT_COLOR", p.text_color.to_gslc());
                put_colors(&mut put, &p.colors());
            }
            WidgetKind::ToggleButton(p) => {
                put("CHECKED", p.on.to_string());
                put("CIRCULAR", p.circular.to_string());
                put("ON_COLOR", p.on_color.to_gslc());
                put("OFF_COLOR", p.off_color.to_gslc());
                put("THUMB_COLOR", p.thumb_color.to_gslc());
                put("FRAME_COLOR", p.frame_color.to_gslc());
            }
        }

        if let Some((sb_enum, sb_ref)) = self.scrollbar() {
            put("SB_ENUM", sb_enum);
            put("SB_ELEMREF", sb_ref);
        }

        map
    }
}

fn put_colors(put: &mut impl FnMut(&str, String), colors: &ElemColors) {
    put("FRAME_COLOR", colors.frame.to_gslc());
    put("FILL_COLOR", colors.fill.to_gslc());
    put("SELECTED_COLOR", colors.selected.to_gslc());
}

fn put_image(put: &mut impl FnMut(&str, String), source: &ImageSource, format: &str) {
    put("IMAGE_DEFINE", source.define.clone());
    put(
        "IMAGE_EXTERN",
        source.extern_name.clone().unwrap_or_default(),
    );
    put("IMAGE_LOADER", source.loader().to_string());
    put("IMAGE_FORMAT", format.to_string());
}

/// Escapes text for use inside a C string literal.
#[must_use]
pub fn c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

fn c_char(text: &str) -> String {
    match text.chars().next() {
        Some('\'') => "'\\''".to_string(),
        Some('\\') => "'\\\\'".to_string(),
        Some(ch) => format!("'{ch}'"),
        None => "' '".to_string(),
    }
}
