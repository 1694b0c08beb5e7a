//! Checkbox emitter.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::CheckBoxProps;

pub(super) fn emit(block: &mut Block<'_, '_, '_>, p: &CheckBoxProps) -> CodeGenResult<()> {
    let grouped = block.widget().has_group();

    block.push("CHECKBOX")?;
    block.push_if(p.colors() != CheckBoxProps::default().colors(), "COLOR")?;
    block.push_if(grouped, "GROUP")?;
    block.push_if(p.callback, "CHECKBOXSETSTATE")?;
    block.element_ref()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::models::{CheckBoxProps, WidgetKind, WidgetModel};

    #[test]
    fn test_checkbox_sequence() {
        let w = WidgetModel::new(
            "CheckBox$2",
            "E_ELEM_CHECK2",
            (0, 0, 20, 20),
            WidgetKind::CheckBox(CheckBoxProps {
                callback: true,
                ..CheckBoxProps::default()
            }),
        )
        .with_group("GSLC_GROUP_RADIO")
        .with_element_ref("m_pElemCheck2");
        assert_eq!(
            sequence(&project_with(w.clone()), &w),
            vec!["CHECKBOX", "GROUP", "CHECKBOXSETSTATE", "ELEMENT_REF"]
        );
    }

    #[test]
    fn test_ungrouped_checkbox_without_callback() {
        let w = WidgetModel::new(
            "CheckBox$1",
            "E_ELEM_CHECK1",
            (0, 0, 20, 20),
            WidgetKind::CheckBox(CheckBoxProps::default()),
        );
        assert_eq!(sequence(&project_with(w.clone()), &w), vec!["CHECKBOX"]);
    }
}
