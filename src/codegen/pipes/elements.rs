//! Element storage: page sizes, extended element state and saved handles.

use super::{fill_region, macros, Pipe};
use crate::codegen::blocks::in_flash;
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::{KeypadKind, WidgetKind, WidgetModel};

/// `MAX_PAGE` and the per-page element counts.
pub struct ElementDefinesPipe;

/// Strips the `E_` prefix page enums carry.
fn strip_enum(enum_id: &str) -> String {
    enum_id.strip_prefix("E_").unwrap_or(enum_id).to_string()
}

impl Pipe for ElementDefinesPipe {
    fn name(&self) -> &'static str {
        tags::ELEMENT_DEFINES
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let page_count = ctx.project.pages.len() + ctx.keypads_in_use().len();
        let mut body = ctx.expand(
            "<MAX_PAGE>",
            &macros([("NAME", "MAX_PAGE".to_string()), ("COUNT", page_count.to_string())]),
        )?;
        for page in &ctx.project.pages {
            let total = page.element_count();
            let map = macros([
                ("STRIP_ENUM", strip_enum(&page.enum_id)),
                ("COUNT", total.to_string()),
            ]);
            body.extend(ctx.expand("<DEFINE_ELEM_PAGE>", &map)?);

            // flash elements only take a reference slot
            let flash = page.widgets.iter().filter(|w| in_flash(ctx, w)).count();
            if flash == 0 {
                body.extend(ctx.expand("<DEFINE_ELEM_RAM>", &map)?);
            } else {
                let map = macros([
                    ("STRIP_ENUM", strip_enum(&page.enum_id)),
                    ("COUNT", (total - flash).to_string()),
                ]);
                body.extend(ctx.expand("<DEFINE_ELEM_RAM_P>", &map)?);
            }
        }
        fill_region(doc, tags::ELEMENT_DEFINES, body)
    }
}

/// Page element arrays, keypad storage and extended element state.
pub struct ExtraElementsPipe;

fn storage(ty: &str, name: impl AsRef<str>) -> String {
    format!("{ty:<32}{};", name.as_ref())
}

/// State variables an extended element needs.
fn widget_storage(widget: &WidgetModel) -> Vec<String> {
    let n = widget.key_count();
    let mut out = Vec::new();
    match &widget.kind {
        WidgetKind::CheckBox(_) => out.push(storage("gslc_tsXCheckbox", format!("m_asXCheck{n}"))),
        WidgetKind::ListBox(p) => {
            out.push(storage("gslc_tsXListbox", format!("m_sListbox{n}")));
            out.push("// - Note that XLISTBOX_BUF_OH_R is extra required per item".to_string());
            out.push(storage(
                "char",
                format!("m_acListboxBuf{n}[{} + XLISTBOX_BUF_OH_R]", p.storage),
            ));
            if p.scrollbar {
                out.push(storage("gslc_tsXSlider", format!("m_sListScroll{n}")));
            }
        }
        WidgetKind::RingGauge(_) => {
            out.push(storage("gslc_tsXRingGauge", format!("m_sXRingGauge{n}")));
        }
        WidgetKind::Slider(_) => out.push(storage("gslc_tsXSlider", format!("m_sXSlider{n}"))),
        WidgetKind::Spinner(_) => out.push(storage("gslc_tsXSpinner", format!("m_sXSpinner{n}"))),
        WidgetKind::TextBox(p) => {
            out.push(storage("gslc_tsXTextbox", format!("m_sTextbox{n}")));
            out.push(format!(
                "{:<32}m_acTextboxBuf{n}[{}]; // NRows={} NCols={}",
                "char",
                p.rows * p.cols,
                p.rows,
                p.cols
            ));
            if p.scrollbar {
                out.push(storage("gslc_tsXSlider", format!("m_sTextScroll{n}")));
            }
        }
        WidgetKind::ToggleButton(_) => {
            out.push(storage("gslc_tsXTogglebtn", format!("m_asXToggle{n}")));
        }
        WidgetKind::ImgButton(p) if p.toggle => {
            out.push(storage("gslc_tsXToggleImgbtn", format!("m_sToggleImg{n}")));
        }
        _ => {}
    }
    out
}

impl Pipe for ExtraElementsPipe {
    fn name(&self) -> &'static str {
        tags::GUI_EXTRA_ELEMENTS
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut body = Vec::new();
        for page in &ctx.project.pages {
            let map = macros([
                ("STRIP_KEY", page.key.replace('$', "")),
                ("STRIP_ENUM", strip_enum(&page.enum_id)),
            ]);
            body.extend(ctx.expand("<GUI_ELEMENT>", &map)?);
        }

        let keypads = ctx.keypads_in_use();
        for kind in &keypads {
            let map = macros([("STORAGE", kind.page_storage().to_string())]);
            body.extend(ctx.expand("<KEYPAD_PAGE>", &map)?);
        }
        for kind in &keypads {
            let map = macros([("STORAGE", kind.elem_storage().to_string())]);
            let fragment = match kind {
                KeypadKind::Numeric => "<KEYPAD_ELEM_NUM>",
                KeypadKind::Alpha => "<KEYPAD_ELEM_TEXT>",
            };
            body.extend(ctx.expand(fragment, &map)?);
        }

        for (_, widget) in ctx.project.widgets() {
            if !in_flash(ctx, widget) {
                body.extend(widget_storage(widget));
            }
        }

        let map = macros([
            ("NAME", "MAX_STR".to_string()),
            ("COUNT", ctx.project.max_str.to_string()),
        ]);
        body.extend(ctx.expand("<MAX_STR>", &map)?);
        fill_region(doc, tags::GUI_EXTRA_ELEMENTS, body)
    }
}

/// Global element handles the application code can use.
pub struct SaveRefsPipe;

impl Pipe for SaveRefsPipe {
    fn name(&self) -> &'static str {
        tags::SAVE_REFERENCES
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut refs: Vec<String> = Vec::new();
        for (_, widget) in ctx.project.widgets() {
            if widget.has_element_ref() {
                refs.push(widget.element_ref().to_string());
            }
            if let Some((_, sb_ref)) = widget.scrollbar() {
                refs.push(sb_ref);
            }
        }
        refs.sort();
        refs.dedup();
        refs.extend(
            ctx.keypads_in_use()
                .into_iter()
                .map(|k| ctx.keypad_ref(k).to_string()),
        );

        let mut body = Vec::new();
        for elem_ref in refs {
            body.extend(ctx.expand("<ELEMENT_REF_SAVE>", &macros([("ELEMREF", elem_ref)]))?);
        }
        fill_region(doc, tags::SAVE_REFERENCES, body)
    }
}
