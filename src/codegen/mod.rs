//! GUIslice source generation.
//!
//! The generator treats its output file as the source of truth for
//! everything outside the tagged regions. A run parses the file (or a fresh
//! skeleton) into a [`Document`], lets each pipe rebuild its region from the
//! [`Project`](crate::models::Project) and renders the result.
//!
//! ```no_run
//! use slicegen::codegen::{CodeGenerator, GenerationContext, TemplateStore};
//! use slicegen::models::Project;
//! use std::path::Path;
//!
//! let project = Project::load(Path::new("demo.toml")).unwrap();
//! let templates = TemplateStore::load(None).unwrap();
//! let ctx = GenerationContext::new(&project, &templates);
//! CodeGenerator::new()
//!     .generate_file(&ctx, Path::new("demo.ino"), true)
//!     .unwrap();
//! ```

pub mod blocks;
pub mod context;
pub mod document;
pub mod error;
pub mod generator;
pub mod merge;
pub mod pipes;
pub mod report;
pub mod tags;
pub mod template;

pub use context::{GenerationContext, TargetPlatform};
pub use document::{Document, LineEnding, Region, Segment};
pub use error::{CodeGenError, CodeGenResult};
pub use generator::{backup_path, write_output, CodeGenerator};
pub use pipes::{Pipe, Pipeline};
pub use report::{AssetIssue, AssetIssueKind, AssetReport};
pub use template::{MacroMap, TemplateStore, TEMPLATE_ASSET};
