//! Numeric and text input fields. Both open a keypad when touched.

use super::Block;
use crate::codegen::context::TargetPlatform;
use crate::codegen::error::CodeGenResult;
use crate::models::widget::ALIGN_LEFT;
use crate::models::InputProps;

pub(super) fn emit_numeric(block: &mut Block<'_, '_, '_>, p: &InputProps) -> CodeGenResult<()> {
    let defaults = InputProps::default();

    block.push("NUM_INPUT")?;
    block.push_if(p.text_color != defaults.text_color, "TEXT_COLOR")?;
    block.push_if(p.colors() != defaults.colors(), "COLOR")?;
    block.push("INPUTFRAME_EN")?;
    block.push("TOUCH_EN")?;
    block.element_ref()
}

pub(super) fn emit_text(block: &mut Block<'_, '_, '_>, p: &InputProps) -> CodeGenResult<()> {
    let defaults = InputProps::default();
    block.set("FILL_EN", p.fill_enabled.to_string());
    let linux = block.ctx().target == TargetPlatform::Linux;

    block.push("TEXT_INPUT")?;
    block.push_if(p.align != ALIGN_LEFT, "TEXTALIGN")?;
    block.push_if(p.margin != defaults.margin, "TEXT_MARGIN")?;
    block.push_if(p.text_color != defaults.text_color, "TEXT_COLOR")?;
    block.push_if(p.colors() != defaults.colors(), "COLOR")?;
    block.push_if(!p.fill_enabled, "FILL_EN")?;
    block.push("INPUTFRAME_EN")?;
    block.push("TOUCH_EN")?;
    block.push_if(p.utf8 && linux, "TEXT_UTF8")?;
    block.element_ref()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::codegen::context::{GenerationContext, TargetPlatform};
    use crate::codegen::template::TemplateStore;
    use crate::models::{InputProps, RgbColor, WidgetKind, WidgetModel};

    #[test]
    fn test_numeric_input_sequence() {
        let w = WidgetModel::new(
            "NumberInput$1",
            "E_ELEM_NUMINPUT1",
            (0, 0, 60, 20),
            WidgetKind::NumInput(InputProps {
                text_color: RgbColor::WHITE,
                ..InputProps::default()
            }),
        )
        .with_element_ref("m_pElemVal1");
        assert_eq!(
            sequence(&project_with(w.clone()), &w),
            vec!["NUM_INPUT", "TEXT_COLOR", "INPUTFRAME_EN", "TOUCH_EN", "ELEMENT_REF"]
        );
    }

    #[test]
    fn test_text_input_utf8_only_on_linux() {
        let w = WidgetModel::new(
            "TextInput$1",
            "E_ELEM_TEXTINPUT1",
            (0, 0, 60, 20),
            WidgetKind::TextInput(InputProps {
                utf8: true,
                fill_enabled: false,
                margin: 2,
                ..InputProps::default()
            }),
        );
        let project = project_with(w.clone());
        let text: String = super::super::FRAGMENTS
            .iter()
            .map(|name| format!("<{name}>\n{name}\n"))
            .collect();
        let store = TemplateStore::parse("markers.t", &text);

        let arduino = GenerationContext::new(&project, &store);
        assert_eq!(
            emit_lines(&arduino, &w),
            vec!["TEXT_INPUT", "TEXT_MARGIN", "FILL_EN", "INPUTFRAME_EN", "TOUCH_EN"]
        );

        let linux = GenerationContext::new(&project, &store).with_target(TargetPlatform::Linux);
        assert_eq!(emit_lines(&linux, &w).last().map(String::as_str), Some("TEXT_UTF8"));
    }
}
