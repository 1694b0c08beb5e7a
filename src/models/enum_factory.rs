//! Key and enum generation for new pages and widgets.
//!
//! Each [`EnumCounter`] is an independent session: two documents or two
//! tests never share ordinals.

use super::page::{Page, PageKind, PAGE_MAIN};
use super::project::Project;
use super::widget::WidgetType;
use std::collections::HashMap;

/// Identity assigned to a freshly placed widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetIdentity {
    /// Key such as `Box$3`.
    pub key: String,
    /// Enum such as `E_ELEM_BOX3`.
    pub enum_id: String,
    /// Element reference such as `m_pElemBox3`.
    pub element_ref: String,
}

/// Per-session map from type name to the last ordinal handed out.
#[derive(Debug, Clone, Default)]
pub struct EnumCounter {
    counts: HashMap<&'static str, u32>,
}

impl EnumCounter {
    /// Creates a counter with every type at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a counter that continues after the ordinals used in `project`.
    #[must_use]
    pub fn seeded_from(project: &Project) -> Self {
        let mut counter = Self::new();
        for page in &project.pages {
            counter.observe(page.kind.type_name(), &page.key);
            for widget in &page.widgets {
                counter.observe(widget.widget_type().type_name(), &widget.key);
            }
        }
        counter
    }

    fn observe(&mut self, type_name: &'static str, key: &str) {
        let ordinal = key
            .strip_prefix(type_name)
            .and_then(|rest| rest.strip_prefix('$'))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(n) = ordinal {
            let entry = self.counts.entry(type_name).or_insert(0);
            *entry = (*entry).max(n);
        }
    }

    fn bump(&mut self, type_name: &'static str) -> u32 {
        let entry = self.counts.entry(type_name).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current ordinal for a type name.
    #[must_use]
    pub fn current(&self, type_name: &str) -> u32 {
        self.counts.get(type_name).copied().unwrap_or(0)
    }

    /// Hands out the next key, enum and element reference for a widget type.
    pub fn next_widget(&mut self, ty: WidgetType) -> WidgetIdentity {
        let name = ty.type_name();
        let n = self.bump(name);
        WidgetIdentity {
            key: format!("{name}${n}"),
            enum_id: format!("{}{n}", ty.enum_prefix()),
            element_ref: format!("m_pElem{name}{n}"),
        }
    }

    /// Creates the next page of a kind.
    ///
    /// The first standard page is always `E_PG_MAIN` and the base page has
    /// no ordinal in its enum.
    pub fn next_page(&mut self, kind: PageKind) -> Page {
        let name = kind.type_name();
        let n = self.bump(name);
        let enum_id = match kind {
            PageKind::Page if n == 1 => PAGE_MAIN.to_string(),
            PageKind::BasePage => kind.enum_prefix().to_string(),
            _ => format!("{}{n}", kind.enum_prefix()),
        };
        Page::new(format!("{name}${n}"), enum_id, kind)
    }
}
