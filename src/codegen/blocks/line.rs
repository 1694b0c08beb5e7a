//! Line emitter. End points come from the widget's macro map.

use super::Block;
use crate::codegen::error::CodeGenResult;

pub(super) fn emit(block: &mut Block<'_, '_, '_>) -> CodeGenResult<()> {
    block.push("LINE")
}
