//! Shared test fixtures for generator and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use slicegen::config::{Config, PathConfig};
use slicegen::models::{
    ButtonNav, FontItem, ImageProps, ImageSource, InputProps, Page, PageKind, Project,
    SliderProps, TextProps, TxtButtonProps, WidgetKind, WidgetModel, PAGE_MAIN,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A text button that jumps to `target` when pressed.
pub fn nav_button(n: u32, target: &str) -> WidgetModel {
    WidgetModel::new(
        format!("TextButton${n}"),
        format!("E_ELEM_TEXTBUTTON{n}"),
        (20, 20 + 40 * i32::try_from(n).unwrap_or(0), 80, 30),
        WidgetKind::TxtButton(TxtButtonProps {
            text: format!("Go {n}"),
            nav: ButtonNav {
                jump_page: Some(target.to_string()),
                ..ButtonNav::default()
            },
            ..TxtButtonProps::default()
        }),
    )
}

/// A text button with no navigation action.
pub fn plain_button(n: u32) -> WidgetModel {
    WidgetModel::new(
        format!("TextButton${n}"),
        format!("E_ELEM_TEXTBUTTON{n}"),
        (20, 20 + 40 * i32::try_from(n).unwrap_or(0), 80, 30),
        WidgetKind::TxtButton(TxtButtonProps {
            text: format!("Button {n}"),
            ..TxtButtonProps::default()
        }),
    )
}

/// A horizontal slider with an element reference.
pub fn slider(n: u32) -> WidgetModel {
    WidgetModel::new(
        format!("Slider${n}"),
        format!("E_ELEM_SLIDER{n}"),
        (120, 40, 100, 20),
        WidgetKind::Slider(SliderProps::default()),
    )
    .with_element_ref(format!("m_pSlider{n}"))
}

/// Two pages: a main page with a button and a slider, and a settings page.
pub fn test_project_basic() -> Project {
    Project::new("demo")
        .with_page(
            Page::new("Page$1", PAGE_MAIN, PageKind::Page)
                .with_widget(nav_button(1, "E_PG_SETTINGS"))
                .with_widget(slider(1)),
        )
        .with_page(Page::new("Page$2", "E_PG_SETTINGS", PageKind::Page))
}

/// The basic project with the slider removed.
pub fn test_project_without_slider() -> Project {
    let mut project = test_project_basic();
    project.pages[0].widgets.retain(|w| w.key != "Slider$1");
    project
}

/// The basic project with the button now jumping to `target`.
pub fn test_project_with_jump(target: &str) -> Project {
    let mut project = test_project_basic();
    project.pages[0].widgets[0] = nav_button(1, target);
    project.pages.push(Page::new("Page$3", target, PageKind::Page));
    project
}

/// The basic project plus a plain button and a numeric input.
pub fn test_project_with_inputs() -> Project {
    let mut project = test_project_basic();
    project.pages[0].widgets.push(plain_button(2));
    project.pages[0].widgets.push(
        WidgetModel::new(
            "NumberInput$1",
            "E_ELEM_NUMINPUT1",
            (20, 160, 60, 20),
            WidgetKind::NumInput(InputProps::default()),
        )
        .with_element_ref("m_pElemVal1"),
    );
    project
}

/// A project showing one image loaded from a file.
pub fn test_project_with_image() -> Project {
    let image = WidgetModel::new(
        "Image$1",
        "E_ELEM_IMAGE1",
        (0, 0, 64, 64),
        WidgetKind::Image(ImageProps {
            source: ImageSource {
                define: "IMG_LOGO".to_string(),
                file: "logo.bmp".to_string(),
                ..ImageSource::default()
            },
            ..ImageProps::default()
        }),
    );
    Project::new("demo").with_page(Page::new("Page$1", PAGE_MAIN, PageKind::Page).with_widget(image))
}

/// A project whose text widget uses a font with a missing include file.
pub fn test_project_with_missing_font() -> Project {
    let text = WidgetModel::new(
        "Text$1",
        "E_ELEM_TEXT1",
        (10, 10, 100, 20),
        WidgetKind::Text(TextProps::default()),
    )
    .with_font("FreeSans9pt7b");
    Project::new("demo")
        .with_font(FontItem {
            name: "FreeSans9pt7b".to_string(),
            enum_id: "E_FREESANS9".to_string(),
            font_ref: "&FreeSans9pt7b".to_string(),
            ref_type: "GSLC_FONTREF_PTR".to_string(),
            size: 1,
            include_file: Some("Fonts/FreeSans9pt7b.h".to_string()),
            define_file: None,
        })
        .with_page(Page::new("Page$1", PAGE_MAIN, PageKind::Page).with_widget(text))
}

/// Creates a config whose log file and font directory live in a temp dir.
pub fn temp_config() -> (Config, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let font_dir = temp_dir.path().join("fonts");
    fs::create_dir_all(&font_dir).expect("Failed to create font dir");

    let config = Config {
        paths: PathConfig {
            template_dir: None,
            font_dir: Some(font_dir),
            log_file: Some(temp_dir.path().join("logs").join("slicegen.log")),
        },
        ..Config::default()
    };

    (config, temp_dir)
}

/// Writes `config` as TOML into `dir` and returns its path.
pub fn write_config_file(config: &Config, dir: &Path) -> PathBuf {
    let path = dir.join("config.toml");
    config.save_to(&path).expect("Failed to write config");
    path
}

/// Writes a project as JSON.
pub fn write_project_file(project: &Project, path: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(project).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Creates a project file in a temp directory and returns the path.
pub fn create_temp_project_file(project: &Project) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_path = temp_dir.path().join("demo.json");
    write_project_file(project, &project_path).expect("Failed to write project file");
    (project_path, temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_basic_project() {
        let project = test_project_basic();
        assert_eq!(project.pages.len(), 2);
        assert_eq!(project.pages[0].widgets.len(), 2);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_fixture_project_file_loads() {
        let project = test_project_basic();
        let (path, _temp) = create_temp_project_file(&project);
        assert_eq!(Project::load(&path).unwrap(), project);
    }
}
