//! Pages and their widgets.

use super::widget::WidgetModel;
use serde::{Deserialize, Serialize};

/// Enum of the page shown at startup.
pub const PAGE_MAIN: &str = "E_PG_MAIN";

/// How a page is shown at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    /// A full-screen page.
    #[default]
    Page,
    /// A popup drawn over the current page.
    Popup,
    /// Elements drawn under every page.
    BasePage,
}

impl PageKind {
    /// Type name used in page keys.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Popup => "Popup",
            Self::BasePage => "BasePage",
        }
    }

    /// Enum prefix for generated page enums.
    #[must_use]
    pub const fn enum_prefix(self) -> &'static str {
        match self {
            Self::Page => "E_PG",
            Self::Popup => "E_PG_POPUP",
            Self::BasePage => "E_PG_BASE",
        }
    }
}

/// An ordered set of widgets shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique key such as `Page$1`.
    pub key: String,
    /// Page enum such as `E_PG_MAIN`.
    #[serde(rename = "enum")]
    pub enum_id: String,
    /// Page kind.
    #[serde(default)]
    pub kind: PageKind,
    /// Widgets in z-order.
    #[serde(default)]
    pub widgets: Vec<WidgetModel>,
}

impl Page {
    /// Creates an empty page.
    pub fn new(key: impl Into<String>, enum_id: impl Into<String>, kind: PageKind) -> Self {
        Self {
            key: key.into(),
            enum_id: enum_id.into(),
            kind,
            widgets: Vec::new(),
        }
    }

    /// Appends a widget.
    pub fn with_widget(mut self, widget: WidgetModel) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Number of GUIslice elements the page needs.
    ///
    /// Scrolling list and text boxes carry a wrapper box and a scrollbar.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.widgets
            .iter()
            .map(|w| if w.scrollbar().is_some() { 3 } else { 1 })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::widget::{TextBoxProps, WidgetKind};

    #[test]
    fn test_element_count_includes_scrollbars() {
        let plain = WidgetModel::new(
            "TextBox$1",
            "E_ELEM_TEXTBOX1",
            (0, 0, 10, 10),
            WidgetKind::TextBox(TextBoxProps::default()),
        );
        let scrolling = WidgetModel::new(
            "TextBox$2",
            "E_ELEM_TEXTBOX2",
            (0, 0, 10, 10),
            WidgetKind::TextBox(TextBoxProps {
                scrollbar: true,
                ..TextBoxProps::default()
            }),
        );
        let page = Page::new("Page$1", PAGE_MAIN, PageKind::Page)
            .with_widget(plain)
            .with_widget(scrolling);
        assert_eq!(page.element_count(), 4);
    }
}
