//! Text button and toggle button emitters.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::widget::ALIGN_MID;
use crate::models::TxtButtonProps;

pub(super) fn emit_text_button(
    block: &mut Block<'_, '_, '_>,
    p: &TxtButtonProps,
) -> CodeGenResult<()> {
    let defaults = TxtButtonProps::default();
    block.set("FILL_EN", p.fill_enabled.to_string());
    block.set("FRAME_EN", p.frame_enabled.to_string());

    if p.storage > 0 {
        block.push("TXTBUTTON_UPDATE")?;
    } else {
        block.push("TXTBUTTON")?;
    }
    block.push_if(p.align != ALIGN_MID, "TEXTALIGN")?;
    block.push_if(p.margin != defaults.margin, "TEXT_MARGIN")?;
    block.push_if(p.text_color != defaults.text_color, "TEXT_COLOR")?;
    block.push_if(p.colors() != defaults.colors(), "COLOR")?;
    block.push_if(p.utf8, "TEXT_UTF8")?;
    block.push_if(p.rounded, "CORNERS_ROUNDED")?;
    block.push_if(!p.fill_enabled, "FILL_EN")?;
    block.push_if(!p.frame_enabled, "FRAME_EN")?;
    block.element_ref()
}

pub(super) fn emit_toggle(block: &mut Block<'_, '_, '_>) -> CodeGenResult<()> {
    let grouped = block.widget().has_group();
    block.push("TOGGLEBUTTON")?;
    block.push_if(grouped, "GROUP")?;
    block.element_ref()
}
