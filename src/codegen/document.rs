//! Tagged-region document model.
//!
//! A generated source file is parsed once into a list of [`Segment`]s.
//! Plain lines pass through untouched; each marker pair becomes a
//! [`Region`] whose body may itself contain nested regions (the callback
//! regions hold their case-statement enum region).

use super::error::{CodeGenError, CodeGenResult};
use super::tags::{self, TagKind, TagScanner};
use tracing::warn;

/// One piece of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A line outside any recognized region.
    Line(String),
    /// A marker-delimited region.
    Region(Region),
}

/// A region bounded by `//<NAME !Start!>` and `//<NAME !End!>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Region name between the angle brackets.
    pub name: String,
    /// The start marker line exactly as it appeared, indentation included.
    pub start_line: String,
    /// Content between the markers.
    pub body: Vec<Segment>,
    /// The end marker line exactly as it appeared.
    pub end_line: String,
}

impl Region {
    /// Flattens the body back into lines, nested markers included.
    #[must_use]
    pub fn body_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        flatten(&self.body, &mut out);
        out
    }

    /// Finds a nested region by name.
    #[must_use]
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        find_in(&self.body, name)
    }
}

/// Line terminator a document is rendered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Picks the terminator of the first line in `text`.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if text[..idx].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    /// The terminator itself.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
    line_ending: LineEnding,
    template_name: String,
    output_name: String,
}

impl Document {
    /// Parses text into segments, remembering its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::UnterminatedRegion`] when a start marker has
    /// no matching end marker.
    pub fn parse(text: &str) -> CodeGenResult<Self> {
        let lines: Vec<String> = text.lines().map(String::from).collect();
        Ok(Self {
            segments: parse_segments(&lines)?,
            line_ending: LineEnding::detect(text),
            template_name: String::new(),
            output_name: String::new(),
        })
    }

    /// Records the template and output names used in error reports.
    pub fn with_names(mut self, template: impl Into<String>, output: impl Into<String>) -> Self {
        self.template_name = template.into();
        self.output_name = output.into();
        self
    }

    /// Top-level segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Terminator used by [`render`](Self::render).
    #[must_use]
    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Builds the corruption error for a region this document lacks.
    #[must_use]
    pub fn missing_tag(&self, name: &str) -> CodeGenError {
        CodeGenError::MissingTag {
            tag: tags::start_tag(name),
            template: self.template_name.clone(),
            output: self.output_name.clone(),
        }
    }

    /// Finds a region anywhere in the tree.
    #[must_use]
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        find_in(&self.segments, name)
    }

    /// True if the named region exists at any depth.
    #[must_use]
    pub fn contains_region(&self, name: &str) -> bool {
        self.find_region(name).is_some()
    }

    /// Replaces the content between a region's markers, keeping the markers.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::MissingTag`] if the region does not exist.
    pub fn replace_body(&mut self, name: &str, lines: Vec<String>) -> CodeGenResult<()> {
        let body = parse_segments(&lines)?;
        match find_in_mut(&mut self.segments, name) {
            Some(region) => {
                region.body = body;
                Ok(())
            }
            None => Err(self.missing_tag(name)),
        }
    }

    /// Replaces a whole region, markers included, with new lines.
    ///
    /// Markers inside `lines` are parsed so later lookups see any regions
    /// the replacement introduces.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGenError::MissingTag`] if the region does not exist.
    pub fn replace_region(&mut self, name: &str, lines: Vec<String>) -> CodeGenResult<()> {
        let replacement = parse_segments(&lines)?;
        if splice_in(&mut self.segments, name, replacement) {
            Ok(())
        } else {
            Err(self.missing_tag(name))
        }
    }

    /// Lists every region as `(depth, name)` in document order.
    #[must_use]
    pub fn outline(&self) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        outline_in(&self.segments, 0, &mut out);
        out
    }

    /// Flattens the document back into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        flatten(&self.segments, &mut out);
        out
    }

    /// Renders the document as text with the terminator it was parsed with.
    #[must_use]
    pub fn render(&self) -> String {
        let eol = self.line_ending.as_str();
        let mut text = String::new();
        for line in self.lines() {
            text.push_str(&line);
            text.push_str(eol);
        }
        text
    }
}

fn parse_segments(lines: &[String]) -> CodeGenResult<Vec<Segment>> {
    let mut scanner = TagScanner::new(lines);
    let mut segments = Vec::new();

    while let Some(line) = scanner.next_line() {
        match tags::parse_tag(line) {
            Some((TagKind::Start, name)) => {
                let mut body = Vec::new();
                scanner
                    .copy_through(&tags::end_tag(name), &mut body)
                    .map_err(|_| CodeGenError::UnterminatedRegion {
                        tag: name.to_string(),
                    })?;
                let end_line = body.pop().unwrap_or_default();
                segments.push(Segment::Region(Region {
                    name: name.to_string(),
                    start_line: line.to_string(),
                    body: parse_segments(&body)?,
                    end_line,
                }));
            }
            Some((TagKind::End, name)) => {
                warn!("Ignoring end marker for '{}' with no open region", name);
                segments.push(Segment::Line(line.to_string()));
            }
            None => segments.push(Segment::Line(line.to_string())),
        }
    }

    Ok(segments)
}

fn flatten(segments: &[Segment], out: &mut Vec<String>) {
    for segment in segments {
        match segment {
            Segment::Line(line) => out.push(line.clone()),
            Segment::Region(region) => {
                out.push(region.start_line.clone());
                flatten(&region.body, out);
                out.push(region.end_line.clone());
            }
        }
    }
}

fn find_in<'a>(segments: &'a [Segment], name: &str) -> Option<&'a Region> {
    segments.iter().find_map(|segment| match segment {
        Segment::Region(region) if region.name == name => Some(region),
        Segment::Region(region) => find_in(&region.body, name),
        Segment::Line(_) => None,
    })
}

fn find_in_mut<'a>(segments: &'a mut [Segment], name: &str) -> Option<&'a mut Region> {
    for segment in segments.iter_mut() {
        if let Segment::Region(region) = segment {
            if region.name == name {
                return Some(region);
            }
            if let Some(found) = find_in_mut(&mut region.body, name) {
                return Some(found);
            }
        }
    }
    None
}

fn splice_in(segments: &mut Vec<Segment>, name: &str, replacement: Vec<Segment>) -> bool {
    let position = segments
        .iter()
        .position(|s| matches!(s, Segment::Region(r) if r.name == name));
    if let Some(idx) = position {
        segments.splice(idx..=idx, replacement);
        return true;
    }
    for segment in segments.iter_mut() {
        if let Segment::Region(region) = segment {
            if splice_in(&mut region.body, name, replacement.clone()) {
                return true;
            }
        }
    }
    false
}

fn outline_in(segments: &[Segment], depth: usize, out: &mut Vec<(usize, String)>) {
    for segment in segments {
        if let Segment::Region(region) = segment {
            out.push((depth, region.name.clone()));
            outline_in(&region.body, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
#include \"GUIslice.h\"
//<Enum !Start!>
enum {E_PG_MAIN};
//<Enum !End!>
bool CbBtnCommon()
{
  //<Button Callback !Start!>
  switch (pElem->nId) {
    //<Button Enums !Start!>
    case E_ELEM_BTN1:
      break;
    //<Button Enums !End!>
  }
  //<Button Callback !End!>
}
";

    #[test]
    fn test_parse_render_identity() {
        let doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.render(), SAMPLE);
    }

    #[test]
    fn test_crlf_file_renders_unchanged() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        let doc = Document::parse(&crlf).unwrap();
        assert_eq!(doc.line_ending(), LineEnding::CrLf);
        assert_eq!(doc.render(), crlf);

        let mut doc = doc;
        doc.replace_body("Enum", vec!["enum {E_PG_MAIN,E_PG2};".to_string()])
            .unwrap();
        assert!(doc
            .render()
            .contains("//<Enum !Start!>\r\nenum {E_PG_MAIN,E_PG2};\r\n//<Enum !End!>\r\n"));
        assert!(!doc.render().replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect(""), LineEnding::Lf);
        assert_eq!(Document::parse(SAMPLE).unwrap().line_ending(), LineEnding::Lf);
    }

    #[test]
    fn test_nested_regions_found() {
        let doc = Document::parse(SAMPLE).unwrap();
        let outline = doc.outline();
        assert_eq!(
            outline,
            vec![
                (0, "Enum".to_string()),
                (0, "Button Callback".to_string()),
                (1, "Button Enums".to_string()),
            ]
        );
        let enums = doc.find_region("Button Enums").unwrap();
        assert_eq!(enums.start_line, "    //<Button Enums !Start!>");
        assert_eq!(
            enums.body_lines(),
            vec!["    case E_ELEM_BTN1:", "      break;"]
        );
    }

    #[test]
    fn test_replace_body_keeps_markers() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        doc.replace_body("Enum", vec!["enum {E_PG_MAIN,E_PG2};".to_string()])
            .unwrap();
        let text = doc.render();
        assert!(text.contains("//<Enum !Start!>\nenum {E_PG_MAIN,E_PG2};\n//<Enum !End!>"));
    }

    #[test]
    fn test_replace_region_drops_markers_and_reparses() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        doc.replace_region(
            "Button Callback",
            vec![
                "  // regenerated".to_string(),
                "  //<Button Enums !Start!>".to_string(),
                "  //<Button Enums !End!>".to_string(),
            ],
        )
        .unwrap();
        assert!(!doc.contains_region("Button Callback"));
        assert!(doc.contains_region("Button Enums"));
        assert!(!doc.render().contains("//<Button Callback !Start!>"));
    }

    #[test]
    fn test_unterminated_region_is_error() {
        let err = Document::parse("//<Fonts !Start!>\nfoo\n").unwrap_err();
        assert!(matches!(err, CodeGenError::UnterminatedRegion { ref tag } if tag == "Fonts"));
    }

    #[test]
    fn test_stray_end_marker_kept_as_line() {
        let text = "a\n//<Fonts !End!>\nb\n";
        let doc = Document::parse(text).unwrap();
        assert!(doc.outline().is_empty());
        assert_eq!(doc.render(), text);
    }

    #[test]
    fn test_missing_region_reports_names() {
        let mut doc = Document::parse("a\n").unwrap().with_names("guislice.t", "demo.ino");
        let err = doc.replace_body("InitGUI", Vec::new()).unwrap_err();
        assert!(err.to_string().contains("//<InitGUI !Start!>"));
        assert!(err.to_string().contains("demo.ino"));
    }
}
