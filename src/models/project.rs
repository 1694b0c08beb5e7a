//! Project description: pages, fonts and global display settings.
//!
//! Projects are read from TOML, or JSON when the file ends in `.json`.

use super::font::FontItem;
use super::page::{Page, PageKind, PAGE_MAIN};
use super::rgb::RgbColor;
use super::widget::{WidgetModel, WidgetType};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Everything the generator needs to know about a design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name; also the default output file stem.
    pub name: String,
    /// Screen background color.
    #[serde(default)]
    pub background: RgbColor,
    /// Largest runtime string, emitted as `MAX_STR`.
    #[serde(default = "default_max_str")]
    pub max_str: usize,
    /// Font catalog entries available to widgets.
    #[serde(default)]
    pub fonts: Vec<FontItem>,
    /// Pages in display order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

const fn default_max_str() -> usize {
    100
}

impl Project {
    /// Creates an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: RgbColor::BLACK,
            max_str: default_max_str(),
            fonts: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Appends a page.
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Appends a font catalog entry.
    pub fn with_font(mut self, font: FontItem) -> Self {
        self.fonts.push(font);
        self
    }

    /// Loads and validates a project file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read project file: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let project: Self = if is_json {
            serde_json::from_str(&content)
                .context(format!("Failed to parse project file: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .context(format!("Failed to parse project file: {}", path.display()))?
        };

        project.validate()?;
        Ok(project)
    }

    /// Checks structural rules the generator relies on.
    ///
    /// - at least one standard page exists
    /// - page enums are unique
    /// - widget keys are unique
    pub fn validate(&self) -> Result<()> {
        if self.main_page().is_none() {
            anyhow::bail!("Project '{}' has no standard page", self.name);
        }

        let mut page_enums = HashSet::new();
        for page in &self.pages {
            if !page_enums.insert(page.enum_id.as_str()) {
                anyhow::bail!("Duplicate page enum '{}'", page.enum_id);
            }
        }

        let mut keys = HashSet::new();
        for (_, widget) in self.widgets() {
            if !keys.insert(widget.key.as_str()) {
                anyhow::bail!("Duplicate widget key '{}'", widget.key);
            }
        }

        Ok(())
    }

    /// The startup page: `Page$1` if present, else the first standard page.
    #[must_use]
    pub fn main_page(&self) -> Option<&Page> {
        let standard = || self.pages.iter().filter(|p| p.kind == PageKind::Page);
        standard()
            .find(|p| p.key == "Page$1" || p.enum_id == PAGE_MAIN)
            .or_else(|| standard().next())
    }

    /// The base page, if the project has one.
    #[must_use]
    pub fn base_page(&self) -> Option<&Page> {
        self.pages.iter().find(|p| p.kind == PageKind::BasePage)
    }

    /// Every widget with the enum of its page, in page then z-order.
    pub fn widgets(&self) -> impl Iterator<Item = (&str, &WidgetModel)> {
        self.pages
            .iter()
            .flat_map(|p| p.widgets.iter().map(move |w| (p.enum_id.as_str(), w)))
    }

    /// True if any widget has the given type.
    #[must_use]
    pub fn has_widget_type(&self, ty: WidgetType) -> bool {
        self.widgets().any(|(_, w)| w.widget_type() == ty)
    }

    /// Looks up a font by display name.
    #[must_use]
    pub fn font(&self, name: &str) -> Option<&FontItem> {
        self.fonts.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PROJECT_TOML: &str = r##"
name = "demo"
background = "#000000"

[[fonts]]
name = "BuiltIn(1x)->5x8pt7b"
enum = "E_BUILTIN5X8"

[[pages]]
key = "Page$1"
enum = "E_PG_MAIN"

[[pages.widgets]]
type = "Box"
key = "Box$1"
enum = "E_ELEM_BOX1"
x = 10
y = 10
width = 100
height = 50
touch = true

[[pages]]
key = "Page$2"
enum = "E_PG_SECOND"
"##;

    #[test]
    fn test_load_toml_project() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(PROJECT_TOML.as_bytes()).unwrap();
        let project = Project::load(file.path()).unwrap();
        assert_eq!(project.name, "demo");
        assert_eq!(project.pages.len(), 2);
        assert_eq!(project.main_page().unwrap().enum_id, "E_PG_MAIN");
        assert!(project.has_widget_type(WidgetType::Box));
        assert!(project.font("BuiltIn(1x)->5x8pt7b").is_some());
    }

    #[test]
    fn test_load_json_project() {
        let project: Project = toml::from_str(PROJECT_TOML).unwrap();
        let json = serde_json::to_string(&project).unwrap();
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        file.write_all(json.as_bytes()).unwrap();
        assert_eq!(Project::load(file.path()).unwrap(), project);
    }

    #[test]
    fn test_validate_rejects_duplicate_keys() {
        let mut project: Project = toml::from_str(PROJECT_TOML).unwrap();
        let dup = project.pages[0].widgets[0].clone();
        project.pages[1].widgets.push(dup);
        let err = project.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate widget key"));
    }

    #[test]
    fn test_validate_requires_standard_page() {
        let project = Project::new("empty")
            .with_page(Page::new("Popup$1", "E_PG_POPUP1", PageKind::Popup));
        assert!(project.validate().is_err());
    }
}
