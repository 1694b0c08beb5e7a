//! Region marker names and the line scanner that locates them.
//!
//! Generated files carry paired comment lines such as
//! `//<InitGUI !Start!>` and `//<InitGUI !End!>`. A line matches a marker
//! when it equals the marker after leading whitespace is trimmed.

use super::error::{CodeGenError, CodeGenResult};

/// `//<File !Start!>` header region.
pub const FILE: &str = "File";
/// Extension header includes.
pub const INCLUDES: &str = "Includes";
/// Image path buffers on Linux.
pub const PATH_STORAGE: &str = "PathStorage";
/// Font includes and defines.
pub const FONTS: &str = "Fonts";
/// Image resource defines.
pub const RESOURCES: &str = "Resources";
/// Page, element, group and font enumerations.
pub const ENUM: &str = "Enum";
/// `MAX_PAGE` and per-page element counts.
pub const ELEMENT_DEFINES: &str = "ElementDefines";
/// Page storage plus extended element storage.
pub const GUI_EXTRA_ELEMENTS: &str = "GUI_Extra_Elements";
/// Element reference variable declarations.
pub const SAVE_REFERENCES: &str = "Save_References";
/// Button callback function.
pub const BUTTON_CB: &str = "Button Callback";
/// Case statements inside the button callback.
pub const BUTTON_ENUMS: &str = "Button Enums";
/// Checkbox callback function.
pub const CHECKBOX_CB: &str = "Checkbox Callback";
/// Case statements inside the checkbox callback.
pub const CHECKBOX_ENUMS: &str = "Checkbox Enums";
/// Keypad input-ready callback function.
pub const KEYPAD_CB: &str = "Keypad Callback";
/// Case statements inside the keypad callback.
pub const KEYPAD_ENUMS: &str = "Keypad Enums";
/// Spinner callback function.
pub const SPINNER_CB: &str = "Spinner Callback";
/// Case statements inside the spinner callback.
pub const SPINNER_ENUMS: &str = "Spinner Enums";
/// Listbox selection callback function.
pub const LISTBOX_CB: &str = "Listbox Callback";
/// Case statements inside the listbox callback.
pub const LISTBOX_ENUMS: &str = "Listbox Enums";
/// Slider callback function.
pub const SLIDER_CB: &str = "Slider Callback";
/// Case statements inside the slider callback.
pub const SLIDER_ENUMS: &str = "Slider Enums";
/// Custom box drawing callback.
pub const DRAW_CB: &str = "Draw Callback";
/// Periodic box update callback.
pub const TICK_CB: &str = "Tick Callback";
/// GUI construction function body.
pub const INIT_GUI: &str = "InitGUI";
/// Font loading calls.
pub const LOAD_FONTS: &str = "Load_Fonts";
/// Startup statements such as rotation.
pub const STARTUP: &str = "Startup";

/// Which half of a marker pair a line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `//<NAME !Start!>`
    Start,
    /// `//<NAME !End!>`
    End,
}

/// Builds the start marker line for a region.
#[must_use]
pub fn start_tag(name: &str) -> String {
    format!("//<{name} !Start!>")
}

/// Builds the end marker line for a region.
#[must_use]
pub fn end_tag(name: &str) -> String {
    format!("//<{name} !End!>")
}

/// Returns true if `line` is the given marker, ignoring leading whitespace.
#[must_use]
pub fn matches_tag(line: &str, tag: &str) -> bool {
    line.trim_start() == tag
}

/// Recognizes a marker line and returns its kind and region name.
#[must_use]
pub fn parse_tag(line: &str) -> Option<(TagKind, &str)> {
    let inner = line.trim_start().strip_prefix("//<")?.strip_suffix('>')?;
    if let Some(name) = inner.strip_suffix(" !Start!") {
        Some((TagKind::Start, name))
    } else {
        inner.strip_suffix(" !End!").map(|name| (TagKind::End, name))
    }
}

/// Forward-only cursor over the lines of a file.
pub struct TagScanner<'a> {
    lines: &'a [String],
    pos: usize,
    template: String,
    output: String,
}

impl<'a> TagScanner<'a> {
    /// Creates a scanner positioned at the first line.
    #[must_use]
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            pos: 0,
            template: String::new(),
            output: String::new(),
        }
    }

    /// Names the template and output files reported on a missing marker.
    pub fn with_names(mut self, template: impl Into<String>, output: impl Into<String>) -> Self {
        self.template = template.into();
        self.output = output.into();
        self
    }

    /// Index of the next unread line.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// True once every line has been consumed.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Reads the next line, if any.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line.as_str())
    }

    /// Copies lines to `out` up to and including the line matching `tag`.
    ///
    /// The scanner stops directly after the marker line.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::MissingTag`] if the input ends first. Lines
    /// scanned before the failure remain in `out`.
    pub fn copy_through(&mut self, tag: &str, out: &mut Vec<String>) -> CodeGenResult<()> {
        while let Some(line) = self.next_line() {
            out.push(line.to_string());
            if matches_tag(line, tag) {
                return Ok(());
            }
        }
        Err(CodeGenError::MissingTag {
            tag: tag.to_string(),
            template: self.template.clone(),
            output: self.output.clone(),
        })
    }

    /// Like [`copy_through`](Self::copy_through) but discards the skipped lines.
    ///
    /// Returns the marker line itself so callers can re-emit it verbatim.
    pub fn skip_through(&mut self, tag: &str) -> CodeGenResult<String> {
        let mut skipped = Vec::new();
        self.copy_through(tag, &mut skipped)?;
        Ok(skipped.pop().unwrap_or_default())
    }

    /// Copies every remaining line to `out`.
    pub fn drain_into(&mut self, out: &mut Vec<String>) {
        while let Some(line) = self.next_line() {
            out.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_tag_builders() {
        assert_eq!(start_tag(INIT_GUI), "//<InitGUI !Start!>");
        assert_eq!(end_tag(BUTTON_ENUMS), "//<Button Enums !End!>");
    }

    #[test]
    fn test_parse_tag_ignores_leading_whitespace() {
        assert_eq!(
            parse_tag("    //<Button Enums !Start!>"),
            Some((TagKind::Start, "Button Enums"))
        );
        assert_eq!(parse_tag("//<Fonts !End!>"), Some((TagKind::End, "Fonts")));
        assert_eq!(parse_tag("// <Fonts !End!>"), None);
        assert_eq!(parse_tag("//<Fonts !End!> trailing"), None);
        assert_eq!(parse_tag("int x;"), None);
    }

    #[test]
    fn test_copy_through_stops_after_tag() {
        let input = lines("a\n  //<Enum !Start!>\nb\n//<Enum !End!>\nc");
        let mut scanner = TagScanner::new(&input);
        let mut out = Vec::new();
        scanner.copy_through(&start_tag(ENUM), &mut out).unwrap();
        assert_eq!(out, vec!["a", "  //<Enum !Start!>"]);
        assert_eq!(scanner.position(), 2);

        let end = scanner.skip_through(&end_tag(ENUM)).unwrap();
        assert_eq!(end, "//<Enum !End!>");
        // Never consumes past the end marker
        assert_eq!(scanner.next_line(), Some("c"));
    }

    #[test]
    fn test_copy_through_missing_tag_fails() {
        let input = lines("a\nb");
        let mut scanner = TagScanner::new(&input).with_names("guislice.t", "demo.ino");
        let mut out = Vec::new();
        let err = scanner
            .copy_through(&start_tag(FONTS), &mut out)
            .unwrap_err();
        match err {
            CodeGenError::MissingTag {
                tag,
                template,
                output,
            } => {
                assert_eq!(tag, "//<Fonts !Start!>");
                assert_eq!(template, "guislice.t");
                assert_eq!(output, "demo.ino");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(scanner.is_done());
    }
}
