//! Ring gauge emitter.
//!
//! Optional calls are emitted only for properties that differ from the
//! GUIslice defaults, so an untouched gauge is a single create call.

use super::Block;
use crate::codegen::error::CodeGenResult;
use crate::models::RingGaugeProps;

pub(super) fn emit(block: &mut Block<'_, '_, '_>, p: &RingGaugeProps) -> CodeGenResult<()> {
    let defaults = RingGaugeProps::default();

    block.push("RINGGAUGE")?;
    block.push_if(p.thickness != RingGaugeProps::DEF_THICKNESS, "RINGGAUGE_LINE")?;
    block.push_if(p.segments != RingGaugeProps::DEF_SEGMENTS, "RINGGAUGE_SEGMENTS")?;
    block.push_if(
        !p.clockwise || p.start_angle != defaults.start_angle || p.angle_range != RingGaugeProps::DEF_RANGE,
        "RINGGAUGE_RANGE",
    )?;
    if p.gradient {
        block.push("RINGGAUGE_GRADIENTCOL")?;
    } else {
        block.push_if(p.active_color != RingGaugeProps::DEF_ACTIVE, "RINGGAUGE_FLATCOL")?;
    }
    block.push_if(p.inactive_color != RingGaugeProps::DEF_INACTIVE, "RINGGAUGE_INACTIVECOL")?;
    block.push_if(p.text_color != defaults.text_color, "TEXT_COLOR")?;
    block.push_if(p.fill_color != defaults.fill_color, "COLOR_FILL")?;
    block.push("ELEMENT_REF")
}
