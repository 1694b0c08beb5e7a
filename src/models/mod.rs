//! Data models for projects, pages, widgets and fonts.
//!
//! Models are independent of code generation; the generator only reads them.

pub mod enum_factory;
pub mod font;
pub mod keypad;
pub mod page;
pub mod project;
pub mod rgb;
pub mod widget;

// Re-export all model types
pub use enum_factory::{EnumCounter, WidgetIdentity};
pub use font::FontItem;
pub use keypad::{KeypadConfig, KeypadKind};
pub use page::{Page, PageKind, PAGE_MAIN};
pub use project::Project;
pub use rgb::RgbColor;
pub use widget::{
    BoxProps, ButtonAction, ButtonNav, CheckBoxProps, ElemColors, ImageProps, ImageSource,
    ImgButtonProps, InputProps, LineProps, ListBoxProps, RingGaugeProps, SliderProps,
    SpinnerProps, TextBoxProps, TextProps, ToggleButtonProps, TxtButtonProps, WidgetKind,
    WidgetModel, WidgetType,
};
