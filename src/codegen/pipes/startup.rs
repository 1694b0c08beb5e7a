//! Startup region: driver settings applied right after `gslc_Init`.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::models::RgbColor;

/// Emits the transparency color and rotation overrides.
pub struct StartupPipe;

impl Pipe for StartupPipe {
    fn name(&self) -> &'static str {
        tags::STARTUP
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let mut body = Vec::new();
        // GUIslice already treats magenta as transparent
        if ctx.transparency_color != RgbColor::MAGENTA {
            let map = macros([("COLOR", ctx.transparency_color.to_gslc())]);
            body.extend(ctx.expand("<TRANSPARENCY_COLOR>", &map)?);
        }
        if let Some(rotation) = ctx.rotation {
            let map = macros([("ROTATION", rotation.to_string())]);
            body.extend(ctx.expand("<ROTATE>", &map)?);
        }
        fill_region(doc, tags::STARTUP, body)
    }
}
