//! Slider and spinner emitters.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::SpinnerProps;

pub(super) fn emit_slider(block: &mut Block<'_, '_, '_>) -> CodeGenResult<()> {
    block.push("SLIDER")?;
    block.element_ref()
}

pub(super) fn emit_spinner(block: &mut Block<'_, '_, '_>, p: &SpinnerProps) -> CodeGenResult<()> {
    let custom_arrows =
        p.increment_char != SpinnerProps::DEF_INCR || p.decrement_char != SpinnerProps::DEF_DECR;

    block.push("SPINNER")?;
    block.push_if(custom_arrows, "SPINNER_ARROWS")?;
    block.element_ref()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::codegen::context::GenerationContext;
    use crate::models::{SliderProps, SpinnerProps, WidgetKind, WidgetModel};

    #[test]
    fn test_slider_expands_style_and_callback() {
        let w = WidgetModel::new(
            "Slider$1",
            "E_ELEM_SLIDER1",
            (0, 0, 100, 20),
            WidgetKind::Slider(SliderProps::default()),
        )
        .with_element_ref("m_pSlider1");
        let project = project_with(w.clone());
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        let lines = emit_lines(&ctx, &w);
        let text = lines.join("\n");
        assert!(text.contains("&m_sXSlider1,"));
        assert!(text.contains("{0,0,100,20},0,100,0,5,false);"));
        assert!(text.contains("gslc_ElemXSliderSetPosFunc(&m_gui,pElemRef,&CbSlidePos);"));
        assert_eq!(lines.last().map(String::as_str), Some("  m_pSlider1 = pElemRef;"));
    }

    #[test]
    fn test_spinner_arrows_only_when_custom() {
        let mut w = WidgetModel::new(
            "Spinner$1",
            "E_ELEM_SPINNER1",
            (0, 0, 80, 20),
            WidgetKind::Spinner(SpinnerProps::default()),
        );
        assert_eq!(sequence(&project_with(w.clone()), &w), vec!["SPINNER"]);

        w.kind = WidgetKind::Spinner(SpinnerProps {
            increment_char: "^".to_string(),
            ..SpinnerProps::default()
        });
        assert_eq!(sequence(&project_with(w.clone()), &w), vec!["SPINNER", "SPINNER_ARROWS"]);
    }
}
