//! SliceGen Library
//!
//! Regenerates GUIslice sketches from a declarative project model. Tagged
//! regions in an existing `.ino` or `.c` file are rewritten from template
//! fragments while hand-written code in callback cases is kept.

pub mod cli;
pub mod codegen;
pub mod config;
pub mod constants;
pub mod models;
