//! Font includes and font loading.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::{uses_font, GenerationContext, TargetPlatform};
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::{AssetIssueKind, AssetReport};
use crate::codegen::tags;
use tracing::debug;

/// Includes or defines the font files the project uses.
///
/// Unknown font names and include files absent from the font directory are
/// recorded in the report; generation carries on with the built-in font.
pub struct FontsPipe;

impl FontsPipe {
    fn check_names(ctx: &GenerationContext<'_>, report: &mut AssetReport) {
        for (_, widget) in ctx.project.widgets() {
            if !uses_font(widget.widget_type()) {
                continue;
            }
            if let Some(name) = widget.font.as_deref() {
                if ctx.resolve_font(Some(name)).is_none() {
                    report.push(
                        AssetIssueKind::UnknownFont,
                        format!("{} uses unknown font '{name}'", widget.key),
                    );
                }
            }
        }
        for kind in ctx.keypads_in_use() {
            if let Some(name) = ctx.keypad(kind).font.as_deref() {
                if ctx.resolve_font(Some(name)).is_none() {
                    report.push(
                        AssetIssueKind::UnknownFont,
                        format!("{} keypad uses unknown font '{name}'", kind.template_suffix()),
                    );
                }
            }
        }
    }
}

impl Pipe for FontsPipe {
    fn name(&self) -> &'static str {
        tags::FONTS
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        Self::check_names(ctx, report);

        let fonts = ctx.fonts_in_use();
        let mut body = Vec::new();
        if fonts.iter().any(|f| f.include().is_some()) {
            match ctx.target {
                TargetPlatform::Arduino => body.extend(ctx.template("<FONT_ADAFRUIT>")?),
                TargetPlatform::ArduinoTftEspi => body.extend(ctx.template("<FONT_TFT_ESPI>")?),
                TargetPlatform::Linux => {}
            }
        }

        for font in &fonts {
            if ctx.target.is_arduino() {
                let Some(include) = font.include() else { continue };
                if let Some(dir) = &ctx.font_dir {
                    let path = dir.join(include);
                    if !path.exists() {
                        report.push(
                            AssetIssueKind::MissingFontFile,
                            format!("{} needs {}", font.name, path.display()),
                        );
                    }
                }
                let map = macros([("INCLUDE_FILE", include.to_string())]);
                body.extend(ctx.expand("<FONT_INCLUDE>", &map)?);
            } else if let Some(file) = font.define_file.as_deref().filter(|f| !f.is_empty()) {
                let map = macros([
                    ("FONT_REF", font.font_ref.clone()),
                    ("DEFINE_FILE", file.to_string()),
                ]);
                body.extend(ctx.expand("<FONT_DEFINE>", &map)?);
            }
        }
        debug!("{} font(s) in use", fonts.len());
        fill_region(doc, tags::FONTS, body)
    }
}

/// Loads every font in use with `gslc_FontSet`.
pub struct FontLoadPipe;

impl Pipe for FontLoadPipe {
    fn name(&self) -> &'static str {
        tags::LOAD_FONTS
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut body = Vec::new();
        for font in ctx.fonts_in_use() {
            let map = macros([
                ("FONT_ID", font.enum_id.clone()),
                ("FONT_REFTYPE", font.ref_type.clone()),
                ("FONT_REF", font.font_ref.clone()),
                ("FONT_SZ", font.size.to_string()),
            ]);
            body.extend(ctx.expand("<FONT_LOAD>", &map)?);
        }
        fill_region(doc, tags::LOAD_FONTS, body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{FontItem, Project, TextProps, WidgetKind, WidgetModel};
    use tempfile::TempDir;

    fn sans() -> FontItem {
        FontItem {
            name: "FreeSans9pt7b".to_string(),
            enum_id: "E_FREESANS9".to_string(),
            font_ref: "&FreeSans9pt7b".to_string(),
            ref_type: "GSLC_FONTREF_PTR".to_string(),
            size: 1,
            include_file: Some("Fonts/FreeSans9pt7b.h".to_string()),
            define_file: Some("/usr/share/fonts/FreeSans.ttf".to_string()),
        }
    }

    fn text(key: &str, font: &str) -> WidgetModel {
        WidgetModel::new(key, format!("E_ELEM_{}", key.replace('$', "")), (0, 0, 10, 10), WidgetKind::Text(TextProps::default()))
            .with_font(font)
    }

    fn project() -> Project {
        project_of(vec![text("Text$1", "FreeSans9pt7b"), text("Text$2", "FreeSans9pt7b")]).with_font(sans())
    }

    #[test]
    fn test_arduino_includes() {
        let project = project();
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        let body = run_pipe(&FontsPipe, &ctx);
        assert_eq!(body[0], "#include <Adafruit_GFX.h>");
        assert_eq!(body.last().unwrap(), "#include \"Fonts/FreeSans9pt7b.h\"");
        assert_eq!(body.iter().filter(|l| l.contains("FreeSans9pt7b.h")).count(), 1);
    }

    #[test]
    fn test_linux_defines() {
        let font = FontItem {
            font_ref: "FONT_FREESANS9".to_string(),
            ..sans()
        };
        let project = project_of(vec![text("Text$1", "FreeSans9pt7b")]).with_font(font);
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store).with_target(TargetPlatform::Linux);
        assert_eq!(
            run_pipe(&FontsPipe, &ctx),
            vec!["#define FONT_FREESANS9 \"/usr/share/fonts/FreeSans.ttf\"".to_string()]
        );
    }

    #[test]
    fn test_unknown_font_and_missing_file_are_reported() {
        let dir = TempDir::new().unwrap();
        let project = project_of(vec![text("Text$1", "FreeSans9pt7b"), text("Text$2", "Nope")])
            .with_font(sans());
        let store = builtin();
        let mut ctx = GenerationContext::new(&project, &store);
        ctx.font_dir = Some(dir.path().to_path_buf());

        let mut doc = doc_with(tags::FONTS);
        let mut report = AssetReport::new();
        FontsPipe.process(&ctx, &mut doc, &mut report).unwrap();

        let kinds: Vec<_> = report.issues().iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![AssetIssueKind::UnknownFont, AssetIssueKind::MissingFontFile]
        );
        assert!(report.issues()[0].message.contains("Text$2"));
    }

    #[test]
    fn test_font_load_sorted_and_unique() {
        let project = project_of(vec![
            text("Text$1", "FreeSans9pt7b"),
            WidgetModel::new("Text$2", "E_ELEM_TEXT2", (0, 0, 1, 1), WidgetKind::Text(TextProps::default())),
            text("Text$3", "FreeSans9pt7b"),
        ])
        .with_font(sans());
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        assert_eq!(
            run_pipe(&FontLoadPipe, &ctx),
            vec![
                "    if (!gslc_FontSet(&m_gui,E_BUILTIN5X8,GSLC_FONTREF_PTR,NULL,1)) { return; }".to_string(),
                "    if (!gslc_FontSet(&m_gui,E_FREESANS9,GSLC_FONTREF_PTR,&FreeSans9pt7b,1)) { return; }".to_string(),
            ]
        );
    }
}
