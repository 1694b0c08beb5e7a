//! Case-statement merging for callback enum regions.
//!
//! A callback `switch` carries one `case` per widget. Users add their own
//! code to those cases, so on regeneration the stored cases are parsed,
//! classified by the GUIslice call they contain and then kept, patched or
//! regenerated:
//!
//! | stored case                                  | action     |
//! |----------------------------------------------|------------|
//! | same kind, same parameter                    | keep       |
//! | any complete case for a plain widget         | keep       |
//! | same kind, different parameter               | patch line |
//! | other kind, incomplete or missing            | regenerate |
//!
//! Each callback only recognises the calls it generates itself, so a slider
//! read typed into a button case never changes how that case is classified.
//! Cases for widgets that no longer exist are dropped.

use std::collections::HashSet;
use tracing::{debug, warn};

/// What a callback case does, with the page or element it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseKind {
    /// No recognised call.
    Standard,
    /// `gslc_SetPageCur` to a page.
    ChangePage(String),
    /// `gslc_PopupShow` of a page.
    ShowPopup(String),
    /// `gslc_PopupHide`.
    HidePopup,
    /// Numeric keypad opened for an element.
    NumericInputAsk(String),
    /// Alphanumeric keypad opened for an element.
    TextInputAsk(String),
    /// Toggle button state read.
    Toggle(String),
    /// Slider position read.
    SliderPos(String),
    /// Spinner counter read.
    SpinnerCounter(String),
    /// Checkbox state read.
    CheckboxState(String),
    /// Keypad value copied into an input field.
    KeypadInput(String),
    /// Selected list box item read.
    ListboxItem,
}

impl CaseKind {
    /// True if both kinds are the same variant, ignoring parameters.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A GUIslice call a callback case may be built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `gslc_SetPageCur`
    SetPage,
    /// `gslc_PopupShow`
    PopupShow,
    /// `gslc_PopupHide`
    PopupHide,
    /// `gslc_ElemXKeyPadInputAsk`
    KeyPadAsk,
    /// `gslc_ElemXTogglebtnGetState`
    ToggleState,
    /// `gslc_ElemXSliderGetPos`
    SliderPos,
    /// `gslc_ElemXSpinnerGetCounter`
    SpinnerCounter,
    /// `gslc_ElemXCheckboxGetState`
    CheckboxState,
    /// `gslc_ElemXKeyPadInputGet`
    KeyPadInput,
    /// `gslc_ElemXListboxGetItem`
    ListboxItem,
}

/// GUIslice calls recognised inside stored cases, checked in order.
///
/// Update this table when the target API changes.
const API_SHAPES: &[(&str, Shape)] = &[
    ("gslc_SetPageCur(", Shape::SetPage),
    ("gslc_PopupShow(", Shape::PopupShow),
    ("gslc_PopupHide(", Shape::PopupHide),
    ("gslc_ElemXKeyPadInputAsk(", Shape::KeyPadAsk),
    ("gslc_ElemXTogglebtnGetState(", Shape::ToggleState),
    ("gslc_ElemXSliderGetPos(", Shape::SliderPos),
    ("gslc_ElemXSpinnerGetCounter(", Shape::SpinnerCounter),
    ("gslc_ElemXCheckboxGetState(", Shape::CheckboxState),
    ("gslc_ElemXKeyPadInputGet(", Shape::KeyPadInput),
    ("gslc_ElemXListboxGetItem(", Shape::ListboxItem),
];

/// Calls that classify cases of the button callback.
pub const BUTTON_SHAPES: &[Shape] = &[
    Shape::SetPage,
    Shape::PopupShow,
    Shape::PopupHide,
    Shape::KeyPadAsk,
    Shape::ToggleState,
];
/// Calls that classify cases of the checkbox callback.
pub const CHECKBOX_SHAPES: &[Shape] = &[Shape::CheckboxState];
/// Calls that classify cases of the keypad callback.
pub const KEYPAD_SHAPES: &[Shape] = &[Shape::KeyPadInput];
/// Calls that classify cases of the listbox callback.
pub const LISTBOX_SHAPES: &[Shape] = &[Shape::ListboxItem];
/// Calls that classify cases of the slider callback.
pub const SLIDER_SHAPES: &[Shape] = &[Shape::SliderPos];
/// Calls that classify cases of the spinner callback.
pub const SPINNER_SHAPES: &[Shape] = &[Shape::SpinnerCounter];

/// How one callback reads its stored cases.
#[derive(Debug, Clone, Copy)]
pub struct CaseShapes<'a> {
    shapes: &'static [Shape],
    alpha_keypad_ref: &'a str,
}

impl<'a> CaseShapes<'a> {
    /// Recognises `shapes`; `alpha_keypad_ref` tells the two keypads apart.
    #[must_use]
    pub const fn new(shapes: &'static [Shape], alpha_keypad_ref: &'a str) -> Self {
        Self {
            shapes,
            alpha_keypad_ref,
        }
    }

    fn calls(&self) -> impl Iterator<Item = &(&'static str, Shape)> + '_ {
        API_SHAPES.iter().filter(|(_, shape)| self.shapes.contains(shape))
    }
}

/// Splits the top-level arguments of the call starting at `call`.
fn call_args(line: &str, call: &str) -> Vec<String> {
    let Some(start) = line.find(call) else {
        return Vec::new();
    };
    let rest = &line[start + call.len()..];
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in rest.chars() {
        match ch {
            '(' | '{' => {
                depth += 1;
                current.push(ch);
            }
            ')' | '}' if depth > 0 => {
                depth -= 1;
                current.push(ch);
            }
            ')' => break,
            ',' if depth == 0 => args.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    args.push(current.trim().to_string());
    args
}

fn arg(args: &[String], idx: usize) -> String {
    args.get(idx).cloned().unwrap_or_default()
}

fn kind_for(shape: Shape, line: &str, call: &str, alpha_keypad_ref: &str) -> CaseKind {
    let args = call_args(line, call);
    match shape {
        Shape::SetPage => CaseKind::ChangePage(arg(&args, 1)),
        Shape::PopupShow => CaseKind::ShowPopup(arg(&args, 1)),
        Shape::PopupHide => CaseKind::HidePopup,
        Shape::KeyPadAsk => {
            if arg(&args, 1) == alpha_keypad_ref {
                CaseKind::TextInputAsk(arg(&args, 3))
            } else {
                CaseKind::NumericInputAsk(arg(&args, 3))
            }
        }
        Shape::ToggleState => CaseKind::Toggle(arg(&args, 1)),
        Shape::SliderPos => CaseKind::SliderPos(arg(&args, 1)),
        Shape::SpinnerCounter => CaseKind::SpinnerCounter(arg(&args, 1)),
        Shape::CheckboxState => CaseKind::CheckboxState(arg(&args, 1)),
        Shape::KeyPadInput => CaseKind::KeypadInput(arg(&args, 1)),
        Shape::ListboxItem => CaseKind::ListboxItem,
    }
}

/// Classifies case lines by the first call the callback recognises.
///
/// `//` comment lines are skipped. Returns the kind and the offset of the
/// deciding line, or `(Standard, None)` when no line matches.
#[must_use]
pub fn classify(lines: &[String], shapes: &CaseShapes<'_>) -> (CaseKind, Option<usize>) {
    for (offset, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with("//") {
            continue;
        }
        for (call, shape) in shapes.calls() {
            if line.contains(call) {
                return (kind_for(*shape, line, call, shapes.alpha_keypad_ref), Some(offset));
            }
        }
    }
    (CaseKind::Standard, None)
}

/// One `case` parsed from an existing enum region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCase {
    /// Enum after `case`.
    pub enum_id: String,
    /// All lines, from `case` to just before the next case.
    pub lines: Vec<String>,
    /// Classified kind.
    pub kind: CaseKind,
    /// Offset of the line that decided `kind`.
    pub api_offset: Option<usize>,
    /// True if the case contains a `break;`.
    pub complete: bool,
}

/// Parsed content of an enum region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredCases {
    /// Lines before the first case.
    pub prelude: Vec<String>,
    /// Cases in file order.
    pub cases: Vec<StoredCase>,
}

impl StoredCases {
    /// First stored case for an enum.
    #[must_use]
    pub fn get(&self, enum_id: &str) -> Option<&StoredCase> {
        self.cases.iter().find(|c| c.enum_id == enum_id)
    }
}

fn indent_of(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn case_enum(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix("case ")?;
    let (name, _) = rest.split_once(':')?;
    Some(name.trim().to_string())
}

/// Groups enum region lines into cases.
///
/// Case boundaries are `case X:` lines at the indentation of the first
/// case; deeper `case` lines stay inside the enclosing body.
#[must_use]
pub fn parse_cases(lines: &[String], shapes: &CaseShapes<'_>) -> StoredCases {
    let mut parsed = StoredCases::default();
    let mut case_indent: Option<String> = None;
    let mut current: Option<(String, Vec<String>)> = None;

    let close = |current: Option<(String, Vec<String>)>, cases: &mut Vec<StoredCase>| {
        if let Some((enum_id, lines)) = current {
            let (kind, api_offset) = classify(&lines, shapes);
            let complete = lines.iter().any(|l| l.trim_start().starts_with("break;"));
            cases.push(StoredCase {
                enum_id,
                lines,
                kind,
                api_offset,
                complete,
            });
        }
    };

    for line in lines {
        let starts_case = case_enum(line).filter(|_| match &case_indent {
            None => true,
            Some(indent) => indent_of(line) == indent,
        });

        match starts_case {
            Some(enum_id) => {
                if case_indent.is_none() {
                    case_indent = Some(indent_of(line).to_string());
                }
                close(current.take(), &mut parsed.cases);
                current = Some((enum_id, vec![line.clone()]));
            }
            None => match current.as_mut() {
                Some((_, body)) => body.push(line.clone()),
                None => parsed.prelude.push(line.clone()),
            },
        }
    }
    close(current.take(), &mut parsed.cases);

    parsed
}

/// A live widget that needs a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCase {
    /// Widget enum.
    pub enum_id: String,
    /// Kind the current model calls for.
    pub desired: CaseKind,
    /// Freshly expanded case lines.
    pub fresh: Vec<String>,
}

/// What happens to one live case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Re-emit the stored lines.
    Keep,
    /// Replace the API line at the stored offset.
    Patch(usize),
    /// Emit the fresh lines.
    Regenerate,
}

/// Decides how to treat a live case given its stored counterpart.
///
/// A widget with no generated call keeps whatever complete case the user
/// wrote for it.
#[must_use]
pub fn decide(stored: Option<&StoredCase>, desired: &CaseKind, round_trip: bool) -> MergeAction {
    let Some(stored) = stored.filter(|_| round_trip) else {
        return MergeAction::Regenerate;
    };
    if !stored.complete {
        return MergeAction::Regenerate;
    }
    if *desired == CaseKind::Standard || stored.kind == *desired {
        return MergeAction::Keep;
    }
    match stored.api_offset {
        Some(offset) if stored.kind.same_shape(desired) => MergeAction::Patch(offset),
        _ => MergeAction::Regenerate,
    }
}

fn patched(stored: &StoredCase, offset: usize, fresh: &[String], shapes: &CaseShapes<'_>) -> Option<Vec<String>> {
    let (_, fresh_offset) = classify(fresh, shapes);
    let new_line = fresh.get(fresh_offset?)?;
    let old_line = stored.lines.get(offset)?;
    let mut lines = stored.lines.clone();
    lines[offset] = format!("{}{}", indent_of(old_line), new_line.trim_start());
    Some(lines)
}

/// Merges the old enum region body with the live cases.
///
/// The prelude is kept, cases come out in live order and stored cases with
/// no live widget are dropped.
#[must_use]
pub fn merge_cases(
    old_body: &[String],
    live: &[LiveCase],
    round_trip: bool,
    shapes: &CaseShapes<'_>,
) -> Vec<String> {
    let stored = parse_cases(old_body, shapes);
    let live_enums: HashSet<&str> = live.iter().map(|c| c.enum_id.as_str()).collect();
    for orphan in stored.cases.iter().filter(|c| !live_enums.contains(c.enum_id.as_str())) {
        debug!("Dropping case for removed widget {}", orphan.enum_id);
    }

    let mut out = stored.prelude.clone();
    for case in live {
        let old = stored.get(&case.enum_id);
        if let Some(old) = old.filter(|o| round_trip && !o.complete) {
            warn!("Case {} has no break; regenerating it", old.enum_id);
        }

        match decide(old, &case.desired, round_trip) {
            MergeAction::Keep => {
                if let Some(old) = old {
                    out.extend(old.lines.iter().cloned());
                }
            }
            MergeAction::Patch(offset) => {
                let lines = old.and_then(|o| patched(o, offset, &case.fresh, shapes));
                match lines {
                    Some(lines) => {
                        debug!("Patching case {}", case.enum_id);
                        out.extend(lines);
                    }
                    None => out.extend(case.fresh.iter().cloned()),
                }
            }
            MergeAction::Regenerate => out.extend(case.fresh.iter().cloned()),
        }
    }
    out
}
