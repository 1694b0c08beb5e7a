//! Extended element headers and config warnings.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::{WidgetKind, WidgetModel};
use std::collections::BTreeSet;

/// Includes the `elem/X*.h` header of every extended element in use.
pub struct IncludesPipe;

/// Header and config requirements of one widget.
#[derive(Debug, Default, PartialEq, Eq)]
struct Needs {
    headers: Vec<&'static str>,
    compound: bool,
    sd: bool,
}

fn needs(widget: &WidgetModel) -> Needs {
    let mut n = Needs::default();
    match &widget.kind {
        WidgetKind::CheckBox(_) => n.headers.push("XCheckbox"),
        WidgetKind::ListBox(_) => n.headers.push("XListbox"),
        WidgetKind::NumInput(_) => {
            n.headers.push("XKeyPad_Num");
            n.compound = true;
        }
        WidgetKind::TextInput(_) => {
            n.headers.push("XKeyPad_Alpha");
            n.compound = true;
        }
        WidgetKind::RingGauge(_) => n.headers.push("XRingGauge"),
        WidgetKind::Slider(_) => n.headers.push("XSlider"),
        WidgetKind::Spinner(_) => {
            n.headers.push("XSpinner");
            n.compound = true;
        }
        WidgetKind::TextBox(_) => n.headers.push("XTextbox"),
        WidgetKind::ToggleButton(_) => n.headers.push("XTogglebtn"),
        WidgetKind::ImgButton(p) => {
            if p.toggle {
                n.headers.push("XToggleImgbtn");
            }
            n.sd = p.source.from_sd;
        }
        WidgetKind::Image(p) => n.sd = p.source.from_sd,
        WidgetKind::Box(_) | WidgetKind::Line(_) | WidgetKind::Text(_) | WidgetKind::TxtButton(_) => {}
    }
    if widget.scrollbar().is_some() {
        n.headers.push("XSlider");
    }
    n
}

impl Pipe for IncludesPipe {
    fn name(&self) -> &'static str {
        tags::INCLUDES
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut headers = BTreeSet::new();
        let mut compound = false;
        let mut sd = false;
        for (_, widget) in ctx.project.widgets() {
            let n = needs(widget);
            headers.extend(n.headers);
            compound |= n.compound;
            sd |= n.sd;
        }

        let mut body = Vec::new();
        for header in headers {
            body.extend(ctx.template("<ELEM_COMMENT>")?);
            body.extend(ctx.expand("<ELEM_INCLUDE>", &macros([("WIDGET", header.to_string())]))?);
        }
        if compound || sd {
            body.extend(ctx.template("<WARNING_CONFIG>")?);
            if compound {
                body.extend(ctx.template("<WARNING_COMPOUND>")?);
            }
            if sd {
                body.extend(ctx.template("<WARNING_SD>")?);
            }
        }
        fill_region(doc, tags::INCLUDES, body)
    }
}
