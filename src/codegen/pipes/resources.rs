//! Image resource defines and extern declarations.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::{ImageSource, WidgetKind};
use std::collections::BTreeSet;

/// Declares every image file and compiled-in bitmap the project uses.
pub struct ResourcesPipe;

#[derive(Default)]
struct Resources {
    defines: BTreeSet<(String, String)>,
    externs: BTreeSet<String>,
}

impl Resources {
    fn add(&mut self, define: &str, file: &str, extern_name: Option<&str>) {
        match extern_name.filter(|e| !e.is_empty()) {
            Some(name) => {
                self.externs.insert(name.to_string());
            }
            None if !define.is_empty() => {
                self.defines.insert((define.to_string(), file.to_string()));
            }
            None => {}
        }
    }

    fn add_source(&mut self, source: &ImageSource) {
        self.add(&source.define, &source.file, source.extern_name.as_deref());
    }
}

impl Pipe for ResourcesPipe {
    fn name(&self) -> &'static str {
        tags::RESOURCES
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut res = Resources::default();
        for (_, widget) in ctx.project.widgets() {
            match &widget.kind {
                WidgetKind::Image(p) => res.add_source(&p.source),
                WidgetKind::ImgButton(p) => {
                    res.add_source(&p.source);
                    res.add(&p.selected_define, &p.selected_file, p.selected_extern.as_deref());
                }
                _ => {}
            }
        }

        let mut body = Vec::new();
        for (define, file) in &res.defines {
            let map = macros([("DEFINE", define.clone()), ("IMAGE_NAME", file.clone())]);
            body.extend(ctx.expand("<RESOURCE_DEFINE>", &map)?);
        }
        let extern_fragment = if ctx.target.is_arduino() {
            "<RESOURCE_PROGMEM>"
        } else {
            "<RESOURCE_EXTERN>"
        };
        for name in &res.externs {
            let map = macros([("EXTERN_NAME", name.clone())]);
            body.extend(ctx.expand(extern_fragment, &map)?);
        }
        fill_region(doc, tags::RESOURCES, body)
    }
}
