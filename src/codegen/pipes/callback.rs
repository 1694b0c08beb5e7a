//! Callback functions and their `switch` cases.
//!
//! On the first run a callback region is an empty placeholder. It is
//! replaced by the full callback function, which carries an inner enum
//! region holding one `case` per widget. Later runs only touch that inner
//! region, merging the stored cases with the live widgets so hand-written
//! case bodies survive.

use super::{macros, Pipe};
use crate::codegen::context::GenerationContext;
use crate::codegen::document::Document;
use crate::codegen::error::CodeGenResult;
use crate::codegen::merge::{
    merge_cases, CaseKind, CaseShapes, LiveCase, Shape, BUTTON_SHAPES, CHECKBOX_SHAPES,
    KEYPAD_SHAPES, LISTBOX_SHAPES, SLIDER_SHAPES, SPINNER_SHAPES,
};
use crate::codegen::report::AssetReport;
use crate::codegen::tags;
use crate::codegen::template::MacroMap;
use crate::models::{ButtonAction, ButtonNav, KeypadKind, WidgetKind, WidgetModel};
use tracing::{debug, info};

type CaseBuilder = fn(&GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>>;

/// One callback function: its placeholder region, its enum region, the
/// scaffold fragment, the calls its cases are built around and the widgets
/// that get a case.
pub struct CallbackPipe {
    region: &'static str,
    enums: &'static str,
    scaffold: &'static str,
    shapes: &'static [Shape],
    cases: CaseBuilder,
}

impl CallbackPipe {
    /// Touch callback shared by buttons, inputs and touch-enabled boxes.
    #[must_use]
    pub fn button() -> Self {
        Self {
            region: tags::BUTTON_CB,
            enums: tags::BUTTON_ENUMS,
            scaffold: "<BUTTON_CB>",
            shapes: BUTTON_SHAPES,
            cases: button_cases,
        }
    }

    /// Checkbox and radio button state callback.
    #[must_use]
    pub fn checkbox() -> Self {
        Self {
            region: tags::CHECKBOX_CB,
            enums: tags::CHECKBOX_ENUMS,
            scaffold: "<CHECKBOX_CB>",
            shapes: CHECKBOX_SHAPES,
            cases: checkbox_cases,
        }
    }

    /// Keypad callback that copies an entered value into its input field.
    #[must_use]
    pub fn keypad() -> Self {
        Self {
            region: tags::KEYPAD_CB,
            enums: tags::KEYPAD_ENUMS,
            scaffold: "<KEYPAD_CB>",
            shapes: KEYPAD_SHAPES,
            cases: keypad_cases,
        }
    }

    /// Listbox selection callback.
    #[must_use]
    pub fn listbox() -> Self {
        Self {
            region: tags::LISTBOX_CB,
            enums: tags::LISTBOX_ENUMS,
            scaffold: "<LISTBOX_CB>",
            shapes: LISTBOX_SHAPES,
            cases: listbox_cases,
        }
    }

    /// Spinner counter callback.
    #[must_use]
    pub fn spinner() -> Self {
        Self {
            region: tags::SPINNER_CB,
            enums: tags::SPINNER_ENUMS,
            scaffold: "<SPINNER_CB>",
            shapes: SPINNER_SHAPES,
            cases: spinner_cases,
        }
    }

    /// Slider position callback, scrollbars included.
    #[must_use]
    pub fn slider() -> Self {
        Self {
            region: tags::SLIDER_CB,
            enums: tags::SLIDER_ENUMS,
            scaffold: "<SLIDER_CB>",
            shapes: SLIDER_SHAPES,
            cases: slider_cases,
        }
    }
}

impl Pipe for CallbackPipe {
    fn name(&self) -> &'static str {
        self.region
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let live = (self.cases)(ctx)?;

        if doc.contains_region(self.region) {
            if live.is_empty() {
                return Ok(());
            }
            info!("Creating {} with {} case(s)", self.region, live.len());
            let callback = live
                .iter()
                .flat_map(|c| c.fresh.iter().cloned())
                .collect::<Vec<_>>()
                .join("\n");
            let lines = ctx.expand(self.scaffold, &macros([("CALLBACK", callback)]))?;
            return doc.replace_region(self.region, lines);
        }

        let Some(region) = doc.find_region(self.enums) else {
            return Err(doc.missing_tag(self.region));
        };
        let shapes = CaseShapes::new(self.shapes, ctx.keypad_ref(KeypadKind::Alpha));
        let merged = merge_cases(&region.body_lines(), &live, ctx.round_trip, &shapes);
        debug!("{}: {} live case(s)", self.enums, live.len());
        doc.replace_body(self.enums, merged)
    }
}

/// Element reference used inside a case.
fn case_ref(widget: &WidgetModel) -> String {
    if widget.has_element_ref() {
        widget.element_ref().to_string()
    } else {
        "pElemRef".to_string()
    }
}

fn live_case(
    ctx: &GenerationContext<'_>,
    widget: &WidgetModel,
    desired: CaseKind,
    fragment: &str,
    map: &MacroMap,
) -> CodeGenResult<LiveCase> {
    Ok(LiveCase {
        enum_id: widget.enum_id.clone(),
        desired,
        fresh: ctx.expand(fragment, map)?,
    })
}

fn nav_case(nav: &ButtonNav, map: &mut MacroMap) -> (CaseKind, &'static str) {
    match nav.action() {
        ButtonAction::ChangePage(page) => {
            map.insert("PAGE_ENUM".to_string(), page.clone());
            (CaseKind::ChangePage(page), "<BUTTON_CB_CHGPAGE>")
        }
        ButtonAction::ShowPopup(page) => {
            map.insert("PAGE_ENUM".to_string(), page.clone());
            (CaseKind::ShowPopup(page), "<BUTTON_CB_SHOWPOPUP>")
        }
        ButtonAction::HidePopup => (CaseKind::HidePopup, "<BUTTON_CB_HIDEPOPUP>"),
        ButtonAction::None => (CaseKind::Standard, "<BUTTON_CB_CASE>"),
    }
}

fn input_case(
    ctx: &GenerationContext<'_>,
    kind: KeypadKind,
    elem_ref: String,
    map: &mut MacroMap,
) -> (CaseKind, &'static str) {
    map.insert("KEY_ELEMREF".to_string(), ctx.keypad_ref(kind).to_string());
    map.insert("KEY_PAGE_ENUM".to_string(), kind.page_enum().to_string());
    let desired = match kind {
        KeypadKind::Numeric => CaseKind::NumericInputAsk(elem_ref),
        KeypadKind::Alpha => CaseKind::TextInputAsk(elem_ref),
    };
    (desired, "<BUTTON_CB_INPUT>")
}

fn button_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        let elem_ref = case_ref(widget);
        let mut map = widget.macro_map(page_enum);
        map.insert("ELEMREF".to_string(), elem_ref.clone());

        let (desired, fragment) = match &widget.kind {
            WidgetKind::TxtButton(p) => nav_case(&p.nav, &mut map),
            WidgetKind::ImgButton(p) => nav_case(&p.nav, &mut map),
            WidgetKind::NumInput(_) => input_case(ctx, KeypadKind::Numeric, elem_ref, &mut map),
            WidgetKind::TextInput(_) => input_case(ctx, KeypadKind::Alpha, elem_ref, &mut map),
            WidgetKind::ToggleButton(_) => (CaseKind::Toggle(elem_ref), "<BUTTON_CB_TOGGLE>"),
            WidgetKind::Box(p) if p.touch => (CaseKind::Standard, "<BUTTON_CB_CASE>"),
            WidgetKind::Image(p) if p.touch => (CaseKind::Standard, "<BUTTON_CB_CASE>"),
            _ => continue,
        };
        cases.push(live_case(ctx, widget, desired, fragment, &map)?);
    }
    Ok(cases)
}

fn checkbox_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        let WidgetKind::CheckBox(p) = &widget.kind else { continue };
        if !p.callback {
            continue;
        }
        let elem_ref = case_ref(widget);
        let mut map = widget.macro_map(page_enum);
        map.insert("ELEMREF".to_string(), elem_ref.clone());
        let desired = CaseKind::CheckboxState(elem_ref);
        cases.push(live_case(ctx, widget, desired, "<CHECKBOX_CB_CASE>", &map)?);
    }
    Ok(cases)
}

fn keypad_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        if !matches!(widget.kind, WidgetKind::NumInput(_) | WidgetKind::TextInput(_)) {
            continue;
        }
        // inside this callback pElemRef is the keypad, so unnamed fields are looked up
        let elem_ref = if widget.has_element_ref() {
            widget.element_ref().to_string()
        } else {
            format!("gslc_PageFindElemById(pGui,{page_enum},{})", widget.enum_id)
        };
        let mut map = widget.macro_map(page_enum);
        map.insert("ELEMREF".to_string(), elem_ref.clone());
        let desired = CaseKind::KeypadInput(elem_ref);
        cases.push(live_case(ctx, widget, desired, "<KEYPAD_CB_CASE>", &map)?);
    }
    Ok(cases)
}

fn listbox_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        if !matches!(widget.kind, WidgetKind::ListBox(_)) {
            continue;
        }
        let map = widget.macro_map(page_enum);
        cases.push(live_case(ctx, widget, CaseKind::ListboxItem, "<LISTBOX_CB_CASE>", &map)?);
    }
    Ok(cases)
}

fn spinner_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        if !matches!(widget.kind, WidgetKind::Spinner(_)) {
            continue;
        }
        let map = widget.macro_map(page_enum);
        let desired = CaseKind::SpinnerCounter(format!("&m_sXSpinner{}", widget.key_count()));
        cases.push(live_case(ctx, widget, desired, "<SPINNER_CB_CASE>", &map)?);
    }
    Ok(cases)
}

fn slider_cases(ctx: &GenerationContext<'_>) -> CodeGenResult<Vec<LiveCase>> {
    let mut cases = Vec::new();
    for (page_enum, widget) in ctx.project.widgets() {
        let mut map = widget.macro_map(page_enum);
        if matches!(widget.kind, WidgetKind::Slider(_)) {
            let elem_ref = case_ref(widget);
            map.insert("ELEMREF".to_string(), elem_ref.clone());
            let desired = CaseKind::SliderPos(elem_ref);
            cases.push(live_case(ctx, widget, desired, "<SLIDER_CB_CASE>", &map)?);
        } else if let Some((sb_enum, sb_ref)) = widget.scrollbar() {
            map.insert("ENUM".to_string(), sb_enum.clone());
            map.insert("ELEMREF".to_string(), sb_ref.clone());
            cases.push(LiveCase {
                enum_id: sb_enum,
                desired: CaseKind::SliderPos(sb_ref),
                fresh: ctx.expand("<SLIDER_CB_CASE>", &map)?,
            });
        }
    }
    Ok(cases)
}

/// A callback function written once and then owned by the user.
///
/// The placeholder is replaced the first time a widget needs the function;
/// after that the region no longer exists and the pipe does nothing.
pub struct UserCallbackPipe {
    region: &'static str,
    fragment: &'static str,
    wanted: fn(&WidgetModel) -> bool,
}

impl UserCallbackPipe {
    /// Drawing callback for boxes with a custom draw function.
    #[must_use]
    pub fn draw() -> Self {
        Self {
            region: tags::DRAW_CB,
            fragment: "<DRAWBOX_CB>",
            wanted: |w| matches!(&w.kind, WidgetKind::Box(p) if p.draw_func),
        }
    }

    /// Tick callback for boxes that update themselves periodically.
    #[must_use]
    pub fn tick() -> Self {
        Self {
            region: tags::TICK_CB,
            fragment: "<TICK_CB>",
            wanted: |w| matches!(&w.kind, WidgetKind::Box(p) if p.tick_func),
        }
    }
}

impl Pipe for UserCallbackPipe {
    fn name(&self) -> &'static str {
        self.region
    }

    fn process(
        &self,
        ctx: &GenerationContext<'_>,
        doc: &mut Document,
        _report: &mut AssetReport,
    ) -> CodeGenResult<()> {
        let wanted = ctx.project.widgets().any(|(_, w)| (self.wanted)(w));
        if !wanted || !doc.contains_region(self.region) {
            return Ok(());
        }
        info!("Creating {}", self.region);
        let lines = ctx.template(self.fragment)?;
        doc.replace_region(self.region, lines)
    }
}
