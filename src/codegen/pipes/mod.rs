//! Region rewriters.
//!
//! A [`Pipeline`] runs one [`Pipe`] per tagged region, in a fixed order,
//! over the parsed [`Document`]. Each pipe regenerates the body of its
//! region from the project model; callback pipes merge instead so hand
//! edits survive.

mod callback;
mod elements;
mod enums;
mod file;
mod fonts;
mod includes;
mod init_gui;
mod paths;
mod resources;
mod startup;

use super::context::GenerationContext;
use super::document::Document;
use super::error::CodeGenResult;
use super::report::AssetReport;
use super::template::MacroMap;
use tracing::debug;

pub use callback::{CallbackPipe, UserCallbackPipe};
pub use elements::{ElementDefinesPipe, ExtraElementsPipe, SaveRefsPipe};
pub use enums::EnumPipe;
pub use file::FilePipe;
pub use fonts::{FontLoadPipe, FontsPipe};
pub use includes::IncludesPipe;
pub use init_gui::InitGuiPipe;
pub use paths::PathStoragePipe;
pub use resources::ResourcesPipe;
pub use startup::StartupPipe;

/// Rewrites one region of a document.
pub trait Pipe {
    /// Region name this pipe owns.
    fn name(&self) -> &'static str;

    /// Regenerates the region in place.
    ///
    /// # Errors
    ///
    /// Fails with [`CodeGenError::MissingTag`](super::CodeGenError) when a
    /// required region is absent, or with `MissingTemplate` when a fragment
    /// is missing. Non-fatal asset problems go into `report`.
    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        report: &mut AssetReport,
    ) -> CodeGenResult<()>;
}

/// The ordered list of pipes for a run.
pub struct Pipeline {
    pipes: Vec<Box<dyn Pipe>>,
}

impl Pipeline {
    /// Builds a pipeline from an explicit pipe list.
    #[must_use]
    pub fn new(pipes: Vec<Box<dyn Pipe>>) -> Self {
        Self { pipes }
    }

    /// The standard region order for GUIslice sketches.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(FilePipe),
            Box::new(IncludesPipe),
            Box::new(PathStoragePipe),
            Box::new(FontsPipe),
            Box::new(ResourcesPipe),
            Box::new(EnumPipe),
            Box::new(ElementDefinesPipe),
            Box::new(ExtraElementsPipe),
            Box::new(SaveRefsPipe),
            Box::new(CallbackPipe::button()),
            Box::new(CallbackPipe::checkbox()),
            Box::new(CallbackPipe::keypad()),
            Box::new(CallbackPipe::spinner()),
            Box::new(CallbackPipe::listbox()),
            Box::new(UserCallbackPipe::draw()),
            Box::new(CallbackPipe::slider()),
            Box::new(UserCallbackPipe::tick()),
            Box::new(InitGuiPipe),
            Box::new(FontLoadPipe),
            Box::new(StartupPipe),
        ])
    }

    /// Region names in run order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.pipes.iter().map(|p| p.name()).collect()
    }

    /// Runs every pipe, stopping at the first structural error.
    ///
    /// # Errors
    ///
    /// Returns the first error a pipe raises.
    pub fn run(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        for pipe in &self.pipes {
            debug!("Running {} pipe", pipe.name());
            pipe.process(ctx, doc, report)?;
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

/// Replaces the body of a region that must exist.
fn fill_region(doc: &mut Document, name: &str, body: Vec<String>) -> CodeGenResult<()> {
    if !doc.contains_region(name) {
        return Err(doc.missing_tag(name));
    }
    doc.replace_body(name, body)
}

/// Builds a macro map from literal pairs.
fn macros<const N: usize>(pairs: [(&str, String); N]) -> MacroMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::codegen::CodeGenError;
    use crate::models::Project;

    #[test]
    fn test_standard_order() {
        assert_eq!(
            Pipeline::standard().names(),
            vec![
                "File",
                "Includes",
                "PathStorage",
                "Fonts",
                "Resources",
                "Enum",
                "ElementDefines",
                "GUI_Extra_Elements",
                "Save_References",
                "Button Callback",
                "Checkbox Callback",
                "Keypad Callback",
                "Spinner Callback",
                "Listbox Callback",
                "Draw Callback",
                "Slider Callback",
                "Tick Callback",
                "InitGUI",
                "Load_Fonts",
                "Startup",
            ]
        );
    }

    #[test]
    fn test_missing_region_stops_the_run() {
        let project = Project::new("demo");
        let store = builtin();
        let ctx = GenerationContext::new(&project, &store);
        let mut doc = doc_with("File");
        let mut report = AssetReport::new();
        let err = Pipeline::standard()
            .run(&ctx, &mut doc, &mut report)
            .unwrap_err();
        match err {
            CodeGenError::MissingTag { tag, template, output } => {
                assert_eq!(tag, "//<Includes !Start!>");
                assert_eq!(template, "ino.t");
                assert_eq!(output, "demo.ino");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
