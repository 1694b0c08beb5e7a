//! Template fragments and macro expansion.
//!
//! A template asset is a plain text file of named fragments:
//!
//! ```text
//! <BOX>
//!   pElemRef = gslc_ElemCreateBox(&m_gui,$<ENUM>,$<PAGE_ENUM>,(gslc_tsRect){$<X>,$<Y>,$<W>,$<H>});
//! <STOP>
//! ```
//!
//! A fragment runs from its `<NAME>` header to the next header, a `<STOP>`
//! line or the end of the file. `<END>` stops parsing altogether.

use super::error::{CodeGenError, CodeGenResult};
use crate::constants::CLIP_LINE;
use regex::Regex;
use rust_embed::Embed;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Macro name to replacement text, built fresh for every expansion.
pub type MacroMap = HashMap<String, String>;

/// File name of the fragment asset.
pub const TEMPLATE_ASSET: &str = "guislice.t";

/// Built-in template assets compiled into the binary.
#[derive(Embed)]
#[folder = "templates/"]
struct BuiltinTemplates;

/// Reads an asset from `dir` when given, otherwise from the built-in set.
///
/// # Errors
///
/// Returns [`CodeGenError::MissingAsset`] if the asset cannot be found and
/// [`CodeGenError::Io`] if reading an override file fails.
pub fn load_asset(dir: Option<&Path>, name: &str) -> CodeGenResult<String> {
    if let Some(dir) = dir {
        let path = dir.join(name);
        if path.exists() {
            debug!("Loading template asset from {}", path.display());
            return std::fs::read_to_string(&path)
                .map_err(|e| CodeGenError::io(format!("Failed to read {}", path.display()), e));
        }
    }
    BuiltinTemplates::get(name)
        .map(|file| String::from_utf8_lossy(&file.data).into_owned())
        .ok_or_else(|| CodeGenError::MissingAsset {
            name: name.to_string(),
        })
}

/// Named template fragments, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    asset_name: String,
    fragments: HashMap<String, Vec<String>>,
    names: Vec<String>,
}

impl TemplateStore {
    /// Parses fragment text.
    #[must_use]
    pub fn parse(asset_name: impl Into<String>, text: &str) -> Self {
        let mut store = Self {
            asset_name: asset_name.into(),
            ..Self::default()
        };
        let mut current: Option<String> = None;

        for line in text.lines() {
            match fragment_header(line) {
                Some("END") => break,
                Some("STOP") => current = None,
                Some(name) => {
                    let key = format!("<{name}>");
                    if !store.fragments.contains_key(&key) {
                        store.names.push(key.clone());
                    }
                    store.fragments.insert(key.clone(), Vec::new());
                    current = Some(key);
                }
                None => {
                    if let Some(key) = &current {
                        if let Some(lines) = store.fragments.get_mut(key) {
                            lines.push(line.to_string());
                        }
                    }
                }
            }
        }

        store
    }

    /// Loads the fragment asset, honoring an override directory.
    ///
    /// # Errors
    ///
    /// Fails if the asset is absent or unreadable.
    pub fn load(dir: Option<&Path>) -> CodeGenResult<Self> {
        let text = load_asset(dir, TEMPLATE_ASSET)?;
        let store = Self::parse(TEMPLATE_ASSET, &text);
        debug!("Loaded {} template fragments", store.names.len());
        Ok(store)
    }

    /// Name of the asset these fragments came from.
    #[must_use]
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Fragment names in asset order, brackets included.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns a private copy of a fragment's lines.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::MissingTemplate`] for an unknown name.
    pub fn load_template(&self, name: &str) -> CodeGenResult<Vec<String>> {
        self.fragments
            .get(name)
            .cloned()
            .ok_or_else(|| CodeGenError::MissingTemplate {
                name: name.to_string(),
            })
    }

    /// Loads a fragment and expands it with `map`.
    pub fn expand(&self, name: &str, map: &MacroMap) -> CodeGenResult<Vec<String>> {
        Ok(expand_macros(&self.load_template(name)?, map))
    }
}

fn fragment_header(line: &str) -> Option<&str> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    let re = HEADER.get_or_init(|| Regex::new(r"^<([A-Z0-9_]+)>$").unwrap());
    re.captures(line.trim_end())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn macro_regex() -> &'static Regex {
    static MACRO: OnceLock<Regex> = OnceLock::new();
    MACRO.get_or_init(|| Regex::new(r"\$<([^<>$]+)>").unwrap())
}

/// Substitutes every mapped `$<KEY>` token in `lines`.
///
/// Unmapped tokens are left as they are. A numeric token such as `$<18>`
/// directly in front of a mapped token pads that token's value with spaces
/// to 18 columns and is itself removed; anywhere else it stays verbatim.
/// A value containing `\n` splits its line into several output lines.
#[must_use]
pub fn expand_macros(lines: &[String], map: &MacroMap) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    for line in lines {
        let expanded = expand_line(line, map);
        if expanded.contains('\n') {
            output.extend(expanded.split('\n').map(String::from));
        } else {
            output.push(expanded);
        }
    }
    output
}

fn expand_line(line: &str, map: &MacroMap) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    // (start, end, width) of a numeric padding token awaiting its macro
    let mut pending: Option<(usize, usize, usize)> = None;

    for caps in macro_regex().captures_iter(line) {
        let Some(token) = caps.get(0) else { continue };
        let key = &caps[1];

        if let Some(value) = map.get(key) {
            match pending.take() {
                Some((start, end, width)) if end == token.start() => {
                    out.push_str(&line[last..start]);
                    out.push_str(&format!("{value:<width$}"));
                }
                _ => {
                    out.push_str(&line[last..token.start()]);
                    out.push_str(value);
                }
            }
            last = token.end();
        } else if let Some(width) = padding_width(key) {
            pending = Some((token.start(), token.end(), width));
        } else {
            pending = None;
        }
    }

    out.push_str(&line[last..]);
    out
}

fn padding_width(key: &str) -> Option<usize> {
    if key.bytes().all(|b| b.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

/// Writes a C enumeration, wrapping before lines reach the clip column.
///
/// ```text
/// enum {E_ELEM_BOX1,E_ELEM_BOX2
///       ,E_ELEM_TEXT1};
/// ```
#[must_use]
pub fn write_enums<S: AsRef<str>>(enums: &[S]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::from("enum {");
    for (idx, item) in enums.iter().enumerate() {
        let item = item.as_ref();
        if idx == 0 {
            current.push_str(item);
        } else if current.len() + item.len() + 1 >= CLIP_LINE {
            lines.push(std::mem::take(&mut current));
            current = format!("      ,{item}");
        } else {
            current.push(',');
            current.push_str(item);
        }
    }
    current.push_str("};");
    lines.push(current);
    lines
}
