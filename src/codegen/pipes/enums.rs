//! Page, element, group and font enumerations.

use super::{fill_region, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::codegen::template::write_enums;
use crate::models::widget::ID_AUTO;
use std::collections::BTreeSet;

/// Writes the `enum` declarations every other region refers to.
pub struct EnumPipe;

impl Pipe for EnumPipe {
    fn name(&self) -> &'static str {
        tags::ENUM
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let keypads = ctx.keypads_in_use();

        let mut pages: Vec<&str> = ctx.project.pages.iter().map(|p| p.enum_id.as_str()).collect();
        pages.extend(keypads.iter().map(|k| k.page_enum()));

        let mut elements: Vec<String> = Vec::new();
        for (_, widget) in ctx.project.widgets() {
            if widget.enum_id != ID_AUTO {
                elements.push(widget.enum_id.clone());
            }
            if let Some((sb_enum, _)) = widget.scrollbar() {
                elements.push(sb_enum);
            }
        }
        elements.sort();
        elements.extend(keypads.iter().map(|k| k.elem_enum().to_string()));

        let groups: BTreeSet<&str> = ctx
            .project
            .widgets()
            .filter(|(_, w)| w.has_group())
            .map(|(_, w)| w.group())
            .collect();

        let mut fonts: Vec<String> = ctx.fonts_in_use().into_iter().map(|f| f.enum_id).collect();
        fonts.push("MAX_FONT".to_string());

        let mut body = write_enums(&pages);
        if !elements.is_empty() {
            body.extend(write_enums(&elements));
        }
        if !groups.is_empty() {
            body.extend(write_enums(&groups.into_iter().collect::<Vec<_>>()));
        }
        body.extend(ctx.template("<FONT_ENUM_COMMENT>")?);
        body.extend(write_enums(&fonts));
        fill_region(doc, tags::ENUM, body)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::{
        InputProps, ListBoxProps, Page, PageKind, ToggleButtonProps, WidgetKind, WidgetModel,
    };

    #[test]
    fn test_enums() {
        let project = project_of(vec![
            WidgetModel::new("Text$1", ID_AUTO, (0, 0, 1, 1), WidgetKind::Text(Default::default())),
            WidgetModel::new(
                "ListBox$2",
                "E_ELEM_LISTBOX2",
                (0, 0, 1, 1),
                WidgetKind::ListBox(ListBoxProps {
                    scrollbar: true,
                    ..ListBoxProps::default()
                }),
            ),
            WidgetModel::new("NumberInput$1", "E_ELEM_NUMINPUT1", (0, 0, 1, 1), WidgetKind::NumInput(InputProps::default())),
            WidgetModel::new("ToggleButton$1", "E_ELEM_TOGGLE1", (0, 0, 1, 1), WidgetKind::ToggleButton(ToggleButtonProps::default()))
                .with_group("GSLC_GROUP_SWITCHES"),
        ])
        .with_page(Page::new("Popup$1", "E_PG_POPUP1", PageKind::Popup));
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        assert_eq!(
            run_pipe(&EnumPipe, &ctx),
            vec![
                "enum {E_PG_MAIN,E_PG_POPUP1,E_POP_KEYPAD_NUM};".to_string(),
                "enum {E_ELEM_LISTBOX2,E_ELEM_NUMINPUT1,E_ELEM_TOGGLE1,E_LISTSCROLL2".to_string(),
                "      ,E_ELEM_KEYPAD_NUM};".to_string(),
                "enum {GSLC_GROUP_SWITCHES};".to_string(),
                "// Must use separate enum for fonts with MAX_FONT at end to use gslc_FontSet.".to_string(),
                "enum {E_BUILTIN5X8,MAX_FONT};".to_string(),
            ]
        );
    }
}
