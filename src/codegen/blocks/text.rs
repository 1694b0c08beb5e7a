//! Text label and text box emitters.

use super::Block;
use crate::codegen::context::TargetPlatform;
use crate::codegen::error::CodeGenResult;
use crate::models::widget::ALIGN_LEFT;
use crate::models::{TextBoxProps, TextProps};

pub(super) fn emit_text(block: &mut Block<'_, '_, '_>, p: &TextProps) -> CodeGenResult<()> {
    let defaults = TextProps::default();
    block.set("FILL_EN", p.fill_enabled.to_string());
    block.set("FRAME_EN", p.frame_enabled.to_string());
    // UTF-8 encoding is only available in the Linux driver
    let linux = block.ctx().target == TargetPlatform::Linux;

    if p.storage > 0 {
        block.push("TEXT_UPDATE")?;
    } else {
        block.push("TEXT")?;
    }
    block.push_if(p.align != ALIGN_LEFT, "TEXTALIGN")?;
    block.push_if(p.margin != 0, "TEXT_MARGIN")?;
    block.push_if(!p.fill_enabled, "FILL_EN")?;
    block.push_if(p.frame_enabled, "FRAME_EN")?;
    block.push_if(p.text_color != defaults.text_color, "TEXT_COLOR")?;
    block.push_if(p.colors() != defaults.colors(), "COLOR")?;
    block.push_if(p.utf8 && linux, "TEXT_UTF8")?;
    block.element_ref()
}

pub(super) fn emit_textbox(block: &mut Block<'_, '_, '_>, p: &TextBoxProps) -> CodeGenResult<()> {
    if p.scrollbar {
        block.push("TEXTBOXSLIDER_1")?;
    } else {
        block.push("TEXTBOX")?;
    }
    block.element_ref()?;
    block.push_if(p.scrollbar, "TEXTBOXSLIDER_2")
}
