//! Emitters for elements created in flash.
//!
//! The `_P` constructors keep the element description in program memory and
//! return no handle. Anything applied after creation first looks the element
//! up again by id.

use super::Block;
use crate::codegen::context::GenerationContext;
use crate::codegen::error::CodeGenResult;
use crate::models::{BoxProps, CheckBoxProps, TextProps, TxtButtonProps, WidgetKind, WidgetModel};

/// True if the widget is created with a `_P` constructor in this run.
#[must_use]
pub fn in_flash(ctx: &GenerationContext<'_>, widget: &WidgetModel) -> bool {
    if !ctx.use_flash || !ctx.target.is_arduino() {
        return false;
    }
    match &widget.kind {
        WidgetKind::Box(_)
        | WidgetKind::CheckBox(_)
        | WidgetKind::Slider(_)
        | WidgetKind::Text(_)
        | WidgetKind::ToggleButton(_) => true,
        // the flash button has no runtime text buffer
        WidgetKind::TxtButton(p) => p.storage == 0,
        _ => false,
    }
}

/// Emits the flash block, or returns `false` if the widget stays in RAM.
pub(super) fn emit(block: &mut Block<'_, '_, '_>, widget: &WidgetModel) -> CodeGenResult<bool> {
    if !in_flash(block.ctx(), widget) {
        return Ok(false);
    }
    match &widget.kind {
        WidgetKind::Box(p) => emit_box(block, p)?,
        WidgetKind::CheckBox(p) => emit_checkbox(block, p)?,
        WidgetKind::Slider(_) => {
            block.push("SLIDER_P")?;
            modifiers(block, &[(true, "SLIDER_STYLE_P")])?;
        }
        WidgetKind::Text(p) => emit_text(block, p)?,
        WidgetKind::ToggleButton(_) => {
            let grouped = widget.has_group();
            block.push("TOGGLEBUTTON_P")?;
            modifiers(block, &[(grouped, "GROUP")])?;
        }
        WidgetKind::TxtButton(p) => emit_text_button(block, p)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Looks the element up when any modifier or saved reference needs it.
fn modifiers(block: &mut Block<'_, '_, '_>, steps: &[(bool, &str)]) -> CodeGenResult<()> {
    let has_ref = block.widget().has_element_ref();
    if has_ref || steps.iter().any(|(cond, _)| *cond) {
        block.push("ELEMENT_REF_FIND_P")?;
    }
    for (cond, fragment) in steps {
        block.push_if(*cond, fragment)?;
    }
    block.element_ref()
}

fn func_ptr(enabled: bool, name: &str) -> String {
    if enabled {
        format!("&{name}")
    } else {
        "NULL".to_string()
    }
}

fn emit_box(block: &mut Block<'_, '_, '_>, p: &BoxProps) -> CodeGenResult<()> {
    block.set("FRAME_EN", p.frame_enabled.to_string());
    block.set("DRAW_FUNC", func_ptr(p.draw_func, "CbDrawScanner"));
    block.set("TICK_FUNC", func_ptr(p.tick_func, "CbTickScanner"));
    block.push("BOX_P")?;
    modifiers(block, &[(p.rounded, "CORNERS_ROUNDED"), (p.touch, "TOUCH_EN")])
}

fn emit_checkbox(block: &mut Block<'_, '_, '_>, p: &CheckBoxProps) -> CodeGenResult<()> {
    block.push("CHECKBOX_P")?;
    modifiers(
        block,
        &[
            (p.colors() != CheckBoxProps::default().colors(), "COLOR"),
            (p.callback, "CHECKBOXSETSTATE"),
        ],
    )
}

fn emit_text(block: &mut Block<'_, '_, '_>, p: &TextProps) -> CodeGenResult<()> {
    block.set("FILL_EN", p.fill_enabled.to_string());
    block.set("FRAME_EN", p.frame_enabled.to_string());
    if p.storage > 0 {
        block.push("TEXT_UPDATE_P")?;
    } else {
        block.push("TEXT_P")?;
    }
    modifiers(block, &[(p.margin != 0, "TEXT_MARGIN")])
}

fn emit_text_button(block: &mut Block<'_, '_, '_>, p: &TxtButtonProps) -> CodeGenResult<()> {
    let defaults = TxtButtonProps::default();
    block.set("FILL_EN", p.fill_enabled.to_string());
    block.set("FRAME_EN", p.frame_enabled.to_string());
    block.push("TXTBUTTON_P")?;
    modifiers(
        block,
        &[
            (p.margin != defaults.margin, "TEXT_MARGIN"),
            (p.utf8, "TEXT_UTF8"),
            (p.rounded, "CORNERS_ROUNDED"),
        ],
    )
}
