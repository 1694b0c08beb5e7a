//! List box emitter, with the optional wrapper box and scrollbar.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::widget::{c_string, ALIGN_LEFT};
use crate::models::ListBoxProps;

pub(super) fn emit(block: &mut Block<'_, '_, '_>, p: &ListBoxProps) -> CodeGenResult<()> {
    block.set("FRAME_EN", p.frame_enabled.to_string());

    if p.scrollbar {
        block.push("LISTBOXSLIDER_1")?;
    } else {
        block.push("LISTBOX")?;
    }
    block.push_if(p.gap > 0, "LISTBOX_GAP")?;
    for item in &p.items {
        block.set("ITEM", c_string(item));
        block.push("LISTBOX_ITEM")?;
    }
    block.push_if(p.align != ALIGN_LEFT, "TEXTALIGN")?;
    block.push_if(p.frame_enabled, "FRAME_EN")?;
    block.element_ref()?;
    block.push_if(p.scrollbar, "LISTBOXSLIDER_2")
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::codegen::context::GenerationContext;
    use crate::models::widget::ALIGN_MID;
    use crate::models::{ListBoxProps, WidgetKind, WidgetModel};

    fn listbox(props: ListBoxProps) -> WidgetModel {
        WidgetModel::new("ListBox$1", "E_ELEM_LISTBOX1", (0, 0, 120, 90), WidgetKind::ListBox(props))
            .with_element_ref("m_pElemListbox1")
    }

    #[test]
    fn test_scrolling_listbox_sequence() {
        let w = listbox(ListBoxProps {
            items: vec!["Red".to_string(), "Green".to_string()],
            gap: 2,
            scrollbar: true,
            align: ALIGN_MID.to_string(),
            frame_enabled: true,
            ..ListBoxProps::default()
        });
        assert_eq!(
            sequence(&project_with(w.clone()), &w),
            vec![
                "LISTBOXSLIDER_1",
                "LISTBOX_GAP",
                "LISTBOX_ITEM",
                "LISTBOX_ITEM",
                "TEXTALIGN",
                "FRAME_EN",
                "ELEMENT_REF",
                "LISTBOXSLIDER_2"
            ]
        );
    }

    #[test]
    fn test_items_and_scrollbar_expand() {
        let w = listbox(ListBoxProps {
            items: vec!["Say \"hi\"".to_string()],
            scrollbar: true,
            ..ListBoxProps::default()
        });
        let project = project_with(w.clone());
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        let text = emit_lines(&ctx, &w).join("\n");
        assert!(text.contains(r#"gslc_ElemXListboxAddItem(&m_gui, pElemRef, "Say \"hi\"");"#));
        assert!(text.contains("gslc_ElemXSliderCreate(&m_gui,E_LISTSCROLL1,E_PG_MAIN,&m_sListScroll1,"));
        assert!(text.contains("m_pListSlider1 = pElemRef;"));
    }
}
