//! Box emitter.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::BoxProps;

pub(super) fn emit(block: &mut Block<'_, '_, '_>, p: &BoxProps) -> CodeGenResult<()> {
    let defaults = BoxProps::default();
    block.set("FRAME_EN", p.frame_enabled.to_string());

    block.push("BOX")?;
    block.push_if(p.rounded, "CORNERS_ROUNDED")?;
    block.push_if(p.touch, "TOUCH_EN")?;
    block.push_if(p.draw_func, "DRAWFUNC")?;
    block.push_if(p.tick_func, "TICKFUNC")?;
    block.push_if(p.colors() != defaults.colors(), "COLOR")?;
    block.push_if(!p.frame_enabled, "FRAME_EN")?;
    block.element_ref()
}
