//! File header region.

use super::{fill_region, macros, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::report::AssetReport;
use crate::codegen::tags;

/// Writes the banner naming the output file and tool version.
pub struct FilePipe;

impl Pipe for FilePipe {
    fn name(&self) -> &'static str {
        tags::FILE
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let map = macros([
            ("FILENAME", ctx.output_name.clone()),
            ("VERSION", ctx.version.clone()),
        ]);
        let body = ctx.expand("<FILE_HDR>", &map)?;
        fill_region(doc, tags::FILE, body)
    }
}
