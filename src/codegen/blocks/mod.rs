//! Per-widget code blocks for the `InitGUI` region.
//!
//! Each widget kind has an emitter that expands its base "create" fragment
//! and then the optional fragments its properties call for, in the order
//! GUIslice expects the calls.

mod boxes;
mod button;
mod checkbox;
mod flash;
mod image;
mod input;
mod line;
mod listbox;
mod ringgauge;
mod slider;
mod text;

use super::context::GenerationContext;
use super::error::CodeGenResult;
use super::template::MacroMap;
use crate::models::{WidgetKind, WidgetModel};

pub use flash::in_flash;

/// Appends the code block for one widget to `out`.
///
/// # Errors
///
/// Propagates [`CodeGenError::MissingTemplate`](super::CodeGenError) when a
/// fragment the widget needs is absent from the template asset.
pub fn emit(
    ctx: &GenerationContext<'_>,
    out: &mut Vec<String>,
    page_enum: &str,
    widget: &WidgetModel,
) -> CodeGenResult<()> {
    let mut block = Block::new(ctx, out, page_enum, widget);
    if flash::emit(&mut block, widget)? {
        return Ok(());
    }
    match &widget.kind {
        WidgetKind::Box(p) => boxes::emit(&mut block, p),
        WidgetKind::CheckBox(p) => checkbox::emit(&mut block, p),
        WidgetKind::Image(p) => image::emit_image(&mut block, p),
        WidgetKind::ImgButton(p) => image::emit_button(&mut block, p),
        WidgetKind::Line(_) => line::emit(&mut block),
        WidgetKind::ListBox(p) => listbox::emit(&mut block, p),
        WidgetKind::NumInput(p) => input::emit_numeric(&mut block, p),
        WidgetKind::TextInput(p) => input::emit_text(&mut block, p),
        WidgetKind::RingGauge(p) => ringgauge::emit(&mut block, p),
        WidgetKind::Slider(_) => slider::emit_slider(&mut block),
        WidgetKind::Spinner(p) => slider::emit_spinner(&mut block, p),
        WidgetKind::Text(p) => text::emit_text(&mut block, p),
        WidgetKind::TextBox(p) => text::emit_textbox(&mut block, p),
        WidgetKind::TxtButton(p) => button::emit_text_button(&mut block, p),
        WidgetKind::ToggleButton(_) => button::emit_toggle(&mut block),
    }
}

/// Expansion state for one widget: the shared context, the widget's macro
/// map and the output being appended to.
pub(crate) struct Block<'w, 'c, 'a> {
    ctx: &'c GenerationContext<'a>,
    widget: &'c WidgetModel,
    map: MacroMap,
    out: &'w mut Vec<String>,
}

impl<'w, 'c, 'a> Block<'w, 'c, 'a> {
    fn new(
        ctx: &'c GenerationContext<'a>,
        out: &'w mut Vec<String>,
        page_enum: &str,
        widget: &'c WidgetModel,
    ) -> Self {
        let mut map = widget.macro_map(page_enum);
        map.insert(
            "FONT_ID".to_string(),
            ctx.font_enum(widget.font.as_deref()),
        );
        Self {
            ctx,
            widget,
            map,
            out,
        }
    }

    /// The shared generation context.
    pub(crate) const fn ctx(&self) -> &GenerationContext<'a> {
        self.ctx
    }

    /// The widget being emitted.
    pub(crate) const fn widget(&self) -> &WidgetModel {
        self.widget
    }

    /// Adds or overrides a macro for the fragments that follow.
    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        self.map.insert(key.to_string(), value.into());
    }

    /// Expands a fragment, named without brackets, and appends it.
    pub(crate) fn push(&mut self, fragment: &str) -> CodeGenResult<()> {
        let lines = self.ctx.expand(&format!("<{fragment}>"), &self.map)?;
        self.out.extend(lines);
        Ok(())
    }

    /// Expands a fragment only when `cond` holds.
    pub(crate) fn push_if(&mut self, cond: bool, fragment: &str) -> CodeGenResult<()> {
        if cond {
            self.push(fragment)?;
        }
        Ok(())
    }

    /// Saves the element handle when the widget has a reference.
    pub(crate) fn element_ref(&mut self) -> CodeGenResult<()> {
        let has_ref = self.widget.has_element_ref();
        self.push_if(has_ref, "ELEMENT_REF")
    }
}

/// Every fragment an emitter may expand, bracket-free.
///
/// The `templates` command checks the active asset against this list.
pub const FRAGMENTS: &[&str] = &[
    "BOX",
    "BOX_P",
    "CHECKBOX",
    "CHECKBOXSETSTATE",
    "CHECKBOX_P",
    "COLOR",
    "COLOR_FILL",
    "COLOR_IMAGE",
    "CORNERS_ROUNDED",
    "DRAWFUNC",
    "ELEMENT_REF",
    "ELEMENT_REF_FIND_P",
    "FILL_EN",
    "FRAME_EN",
    "GROUP",
    "IMAGETRANSPARENT",
    "IMAGE_DEFINE",
    "IMAGE_EXTERN",
    "IMAGE_PATH_SET",
    "IMGBTNTRANSPARENT",
    "IMGBUTTON_DEFINE",
    "IMGBUTTON_EXTERN",
    "IMGBUTTON_PATH_SET",
    "IMGTOGGLE_DEFINE",
    "IMGTOGGLE_EXTERN",
    "INPUTFRAME_EN",
    "LINE",
    "LISTBOX",
    "LISTBOXSLIDER_1",
    "LISTBOXSLIDER_2",
    "LISTBOX_GAP",
    "LISTBOX_ITEM",
    "NUM_INPUT",
    "RINGGAUGE",
    "RINGGAUGE_FLATCOL",
    "RINGGAUGE_GRADIENTCOL",
    "RINGGAUGE_INACTIVECOL",
    "RINGGAUGE_LINE",
    "RINGGAUGE_RANGE",
    "RINGGAUGE_SEGMENTS",
    "SLIDER",
    "SLIDER_P",
    "SLIDER_STYLE_P",
    "SPINNER",
    "SPINNER_ARROWS",
    "TEXT",
    "TEXTALIGN",
    "TEXTBOX",
    "TEXTBOXSLIDER_1",
    "TEXTBOXSLIDER_2",
    "TEXT_COLOR",
    "TEXT_INPUT",
    "TEXT_MARGIN",
    "TEXT_P",
    "TEXT_UPDATE",
    "TEXT_UPDATE_P",
    "TEXT_UTF8",
    "TICKFUNC",
    "TOGGLEBUTTON",
    "TOGGLEBUTTON_P",
    "TOUCH_EN",
    "TXTBUTTON",
    "TXTBUTTON_P",
    "TXTBUTTON_UPDATE",
];

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::codegen::template::TemplateStore;
    use crate::models::{Page, PageKind, Project, PAGE_MAIN};

    /// Builds a one-widget project.
    pub fn project_with(widget: WidgetModel) -> Project {
        Project::new("demo").with_page(Page::new("Page$1", PAGE_MAIN, PageKind::Page).with_widget(widget))
    }

    /// Loads the built-in fragments.
    pub fn builtin() -> TemplateStore {
        TemplateStore::load(None).unwrap()
    }

    /// Emits the widget's block and returns the output lines.
    pub fn emit_lines(ctx: &GenerationContext<'_>, widget: &WidgetModel) -> Vec<String> {
        let mut out = Vec::new();
        emit(ctx, &mut out, PAGE_MAIN, widget).unwrap();
        out
    }

    /// Emits a block against a store of marker fragments and returns the
    /// fragment names in emission order.
    ///
    /// Every fragment expands to its own name, so the output is exactly
    /// the decision sequence.
    pub fn sequence(project: &Project, widget: &WidgetModel) -> Vec<String> {
        let text: String = FRAGMENTS
            .iter()
            .map(|name| format!("<{name}>\n{name}\n"))
            .collect();
        let store = TemplateStore::parse("markers.t", &text);
        let ctx = GenerationContext::new(project, &store);
        emit_lines(&ctx, widget)
    }
}
