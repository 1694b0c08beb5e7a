//! Image and image button emitters.

use super::Block;
use crate::codegen::context::TargetPlatform;
use crate::codegen::error::CodeGenResult;
use crate::models::{ImageProps, ImageSource, ImgButtonProps};

/// On Linux, points the image defines at the path buffers and fills them
/// relative to the executable before the image is loaded.
fn resolve_paths(block: &mut Block<'_, '_, '_>, source: &ImageSource, button: bool) -> CodeGenResult<()> {
    if block.ctx().target != TargetPlatform::Linux || !source.is_file() {
        return Ok(());
    }
    let n = block.widget().key_count().to_string();
    if button {
        block.push("IMGBUTTON_PATH_SET")?;
        block.set("IMAGE_DEFINE", format!("m_strImgBtnPath{n}"));
        block.set("IMAGE_SEL_DEFINE", format!("m_strImgBtnSelPath{n}"));
    } else {
        block.push("IMAGE_PATH_SET")?;
        block.set("IMAGE_DEFINE", format!("m_strImgPath{n}"));
    }
    Ok(())
}

pub(super) fn emit_image(block: &mut Block<'_, '_, '_>, p: &ImageProps) -> CodeGenResult<()> {
    block.set("FILL_EN", (!p.transparent).to_string());
    block.set("FRAME_EN", p.frame_enabled.to_string());

    if p.source.is_extern() {
        block.push("IMAGE_EXTERN")?;
    } else {
        resolve_paths(block, &p.source, false)?;
        block.push("IMAGE_DEFINE")?;
    }
    block.push("IMAGETRANSPARENT")?;
    block.push_if(p.touch, "TOUCH_EN")?;
    if p.frame_enabled {
        block.push("FRAME_EN")?;
        block.push("COLOR_IMAGE")?;
    }
    block.element_ref()
}

pub(super) fn emit_button(block: &mut Block<'_, '_, '_>, p: &ImgButtonProps) -> CodeGenResult<()> {
    block.set("FRAME_EN", p.frame_enabled.to_string());
    let grouped = block.widget().has_group();

    let create = match (p.toggle, p.source.is_extern()) {
        (false, false) => "IMGBUTTON_DEFINE",
        (false, true) => "IMGBUTTON_EXTERN",
        (true, false) => "IMGTOGGLE_DEFINE",
        (true, true) => "IMGTOGGLE_EXTERN",
    };
    resolve_paths(block, &p.source, true)?;
    block.push(create)?;
    block.push_if(p.transparent, "IMGBTNTRANSPARENT")?;
    if p.frame_enabled {
        block.push("FRAME_EN")?;
        block.push("COLOR_IMAGE")?;
    }
    block.push_if(p.toggle && grouped, "GROUP")?;
    block.element_ref()
}
