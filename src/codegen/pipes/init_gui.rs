//! The `InitGUI` region: pages, widgets and keypads.

use super::{fill_region, macros, Pipe};
use crate::codegen::blocks;
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::{KeypadKind, Page, PageKind};
use tracing::debug;

/// Registers every page and creates every element.
pub struct InitGuiPipe;

impl InitGuiPipe {
    fn page_add(ctx: &GenerationContext<'_>, page: &Page, out: &mut Vec<String>) -> CodeGenResult<()> {
        let map = macros([
            ("PAGE_ENUM", page.enum_id.clone()),
            ("STRIP_KEY", page.key.replace('$', "")),
            ("STRIP_ENUM", page.enum_id.strip_prefix("E_").unwrap_or(&page.enum_id).to_string()),
        ]);
        out.extend(ctx.expand("<PAGEADD>", &map)?);
        Ok(())
    }

    fn keypad(ctx: &GenerationContext<'_>, kind: KeypadKind, out: &mut Vec<String>) -> CodeGenResult<()> {
        let cfg = ctx.keypad(kind);
        let config = match kind {
            KeypadKind::Numeric => "&sCfg",
            KeypadKind::Alpha => "&sCfgTx",
        };
        let map = macros([
            ("CONFIG", config.to_string()),
            ("ELEMREF", ctx.keypad_ref(kind).to_string()),
            ("PAGE_ENUM", kind.page_enum().to_string()),
            ("WIDGET_ENUM", kind.elem_enum().to_string()),
            ("STORAGE", kind.elem_storage().to_string()),
            ("BUTTONSZ_W", cfg.button_width.to_string()),
            ("BUTTONSZ_H", cfg.button_height.to_string()),
            ("GAPX", cfg.gap_x.to_string()),
            ("GAPY", cfg.gap_y.to_string()),
            ("ROUND_EN", cfg.rounded.to_string()),
            ("FLOAT_EN", cfg.float_enabled.to_string()),
            ("SIGN_EN", cfg.sign_enabled.to_string()),
            ("X", cfg.x.to_string()),
            ("Y", cfg.y.to_string()),
            ("FONT_ID", ctx.font_enum(cfg.font.as_deref())),
        ]);
        let suffix = kind.template_suffix();

        out.extend(ctx.expand("<PAGECOMMENT>", &map)?);
        out.extend(ctx.expand(&format!("<KEYPAD_CONFIG_{suffix}>"), &map)?);
        if cfg.has_button_size() {
            out.extend(ctx.expand("<KEYPAD_BUTTONSZ>", &map)?);
        }
        if cfg.has_button_gap() {
            out.extend(ctx.expand("<KEYPAD_BUTTONGAP>", &map)?);
        }
        if cfg.rounded {
            out.extend(ctx.expand("<KEYPAD_ROUNDBUTTONS>", &map)?);
        }
        out.extend(ctx.expand(&format!("<KEYPAD_CREATE_{suffix}>"), &map)?);
        Ok(())
    }
}

impl Pipe for InitGuiPipe {
    fn name(&self) -> &'static str {
        tags::INIT_GUI
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let project = ctx.project;
        let keypads = ctx.keypads_in_use();
        let mut body = Vec::new();

        // the base page is registered first so it draws underneath
        let base = project.base_page();
        if let Some(page) = base {
            Self::page_add(ctx, page, &mut body)?;
        }
        for page in project.pages.iter().filter(|p| p.kind != PageKind::BasePage) {
            Self::page_add(ctx, page, &mut body)?;
        }
        for kind in &keypads {
            let map = macros([
                ("PAGE_ENUM", kind.page_enum().to_string()),
                ("STORAGE", kind.page_storage().to_string()),
            ]);
            body.extend(ctx.expand("<PAGEADDKEYPAD>", &map)?);
        }

        if let Some(page) = base {
            body.extend(ctx.expand("<PAGEBASE>", &macros([("PAGE_ENUM", page.enum_id.clone())]))?);
        }
        if let Some(page) = project.main_page() {
            body.extend(ctx.expand("<PAGECUR>", &macros([("PAGE_ENUM", page.enum_id.clone())]))?);
        }
        body.extend(ctx.expand(
            "<BACKGROUND>",
            &macros([("BACKGROUND_COLOR", project.background.to_gslc())]),
        )?);

        for page in &project.pages {
            body.extend(ctx.expand("<PAGECOMMENT>", &macros([("PAGE_ENUM", page.enum_id.clone())]))?);
            for widget in &page.widgets {
                blocks::emit(ctx, &mut body, &page.enum_id, widget)?;
            }
        }
        for kind in keypads {
            Self::keypad(ctx, kind, &mut body)?;
        }

        debug!("InitGUI: {} line(s)", body.len());
        fill_region(doc, tags::INIT_GUI, body)
    }
}
