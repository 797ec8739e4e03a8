use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::history::AnnotationHistory;
use crate::input::{InputState, Mode, Popup, ToolState, clamp_brush_width};
use crate::render;
use crate::stroke::{Point, StrokeRecord};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Drawing began: suspend idle playback, stop auto-rotation, and let the
    /// overlay receive pointer events.
    DrawingEntered,
    /// Drawing ended: resume idle playback and let pointer events through.
    DrawingExited,
    /// Route this pointer's events to the overlay until released.
    CapturePointer(i32),
    ReleasePointer(i32),
    /// The newest segment of the in-progress stroke needs drawing.
    SegmentAdded,
    /// Toolbar state (colour, width, eraser, popups, undo availability)
    /// changed.
    ToolsChanged,
    /// Clear the surface and replay history.
    RenderNeeded,
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub history: AnnotationHistory,
    pub tools: ToolState,
    pub mode: Mode,
    pub input: InputState,
    pub surface_width: f64,
    pub surface_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            history: AnnotationHistory::default(),
            tools: ToolState::default(),
            mode: Mode::Idle,
            input: InputState::Idle,
            surface_width: 0.0,
            surface_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from saved brush preferences.
    #[must_use]
    pub fn with_tools(tools: ToolState) -> Self {
        Self { tools, ..Self::default() }
    }

    // --- Mode ---

    pub fn toggle_drawing(&mut self) -> Vec<Action> {
        match self.mode {
            Mode::Idle => self.enter_drawing(),
            Mode::Drawing => self.exit_drawing(),
        }
    }

    pub fn enter_drawing(&mut self) -> Vec<Action> {
        if self.mode == Mode::Drawing {
            return Vec::new();
        }
        self.mode = Mode::Drawing;
        vec![Action::DrawingEntered, Action::ToolsChanged]
    }

    /// Leave Drawing. Strokes stay on screen until cleared or the image
    /// changes; popups close and the eraser is reset.
    pub fn exit_drawing(&mut self) -> Vec<Action> {
        if self.mode == Mode::Idle {
            return Vec::new();
        }
        let mut actions = self.finish_stroke();
        self.mode = Mode::Idle;
        self.tools.eraser = false;
        self.tools.popup = Popup::None;
        actions.push(Action::DrawingExited);
        actions.push(Action::ToolsChanged);
        actions
    }

    // --- Toolbar ---

    /// Flip the eraser. Ignored outside Drawing.
    pub fn toggle_eraser(&mut self) -> Vec<Action> {
        if self.mode != Mode::Drawing {
            return Vec::new();
        }
        self.tools.eraser = !self.tools.eraser;
        vec![Action::ToolsChanged]
    }

    /// Open or close the colour palette. Opening it turns the eraser off.
    pub fn toggle_palette(&mut self) -> Vec<Action> {
        self.tools.toggle_popup(Popup::Palette);
        self.tools.eraser = false;
        vec![Action::ToolsChanged]
    }

    pub fn toggle_brush_popup(&mut self) -> Vec<Action> {
        self.tools.toggle_popup(Popup::BrushSize);
        vec![Action::ToolsChanged]
    }

    /// Pick a paint colour and close the palette.
    pub fn select_color(&mut self, color: &str) -> Vec<Action> {
        let color = color.trim();
        if color.is_empty() {
            return Vec::new();
        }
        color.clone_into(&mut self.tools.color);
        if self.tools.popup == Popup::Palette {
            self.tools.popup = Popup::None;
        }
        vec![Action::ToolsChanged]
    }

    /// Set the brush width for subsequent strokes, clamped to the slider range.
    pub fn set_brush_width(&mut self, width: f64) -> Vec<Action> {
        let Some(width) = clamp_brush_width(width) else {
            return Vec::new();
        };
        self.tools.width = width;
        vec![Action::ToolsChanged]
    }

    /// Erase everything, wipe history, and leave Drawing.
    pub fn clear(&mut self) -> Vec<Action> {
        self.wipe()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        let mut actions = self.finish_stroke();
        if self.history.undo() {
            actions.extend([Action::RenderNeeded, Action::ToolsChanged]);
        }
        actions
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let mut actions = self.finish_stroke();
        if self.history.redo() {
            actions.extend([Action::RenderNeeded, Action::ToolsChanged]);
        }
        actions
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, pointer_id: i32, point: Point) -> Vec<Action> {
        if self.mode != Mode::Drawing || self.is_capturing() {
            return Vec::new();
        }
        let stroke = StrokeRecord::begin(point, &self.tools.color, self.tools.width, self.tools.composite_mode());
        self.input = InputState::Capturing { pointer_id, stroke };
        vec![Action::CapturePointer(pointer_id)]
    }

    pub fn on_pointer_move(&mut self, pointer_id: i32, point: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Capturing { pointer_id: active, stroke } if *active == pointer_id => {
                if stroke.extend_to(point) { vec![Action::SegmentAdded] } else { Vec::new() }
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, pointer_id: i32) -> Vec<Action> {
        let owns_stroke =
            matches!(&self.input, InputState::Capturing { pointer_id: active, .. } if *active == pointer_id);
        if owns_stroke { self.finish_stroke() } else { Vec::new() }
    }

    /// The pointer left the surface; treated exactly like pointer-up.
    pub fn on_pointer_leave(&mut self, pointer_id: i32) -> Vec<Action> {
        self.on_pointer_up(pointer_id)
    }

    // --- External events ---

    /// The displayed image changed: drop every stroke and leave Drawing.
    pub fn image_switched(&mut self) -> Vec<Action> {
        self.wipe()
    }

    /// Record the surface size in CSS pixels. The backing store is reset by
    /// a resize, so history is replayed.
    pub fn set_surface(&mut self, width: f64, height: f64, dpr: f64) -> Vec<Action> {
        self.surface_width = width.max(0.0);
        self.surface_height = height.max(0.0);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        vec![Action::RenderNeeded]
    }

    // --- Queries ---

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.mode == Mode::Drawing
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        matches!(self.input, InputState::Capturing { .. })
    }

    /// The stroke being captured, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<&StrokeRecord> {
        match &self.input {
            InputState::Capturing { stroke, .. } => Some(stroke),
            InputState::Idle => None,
        }
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Abandon any capture, drop all strokes, and leave Drawing.
    fn wipe(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let InputState::Capturing { pointer_id, .. } = std::mem::take(&mut self.input) {
            actions.push(Action::ReleasePointer(pointer_id));
        }
        self.history.clear();
        actions.push(Action::RenderNeeded);
        actions.extend(self.exit_drawing());
        if !actions.contains(&Action::ToolsChanged) {
            actions.push(Action::ToolsChanged);
        }
        actions
    }

    /// Commit the in-progress stroke, if any. Strokes that never moved leave
    /// no mark and are dropped.
    fn finish_stroke(&mut self) -> Vec<Action> {
        let InputState::Capturing { pointer_id, stroke } = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let mut actions = vec![Action::ReleasePointer(pointer_id)];
        if stroke.is_visible() {
            self.history.commit(stroke);
            actions.push(Action::ToolsChanged);
        }
        actions
    }
}

/// The full annotation engine. Wraps `EngineCore` and owns the overlay canvas.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas` and acquire its 2D context.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, tools: ToolState) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx, core: EngineCore::with_tools(tools) })
    }

    // --- Delegated mode and toolbar ---

    pub fn toggle_drawing(&mut self) -> Vec<Action> {
        self.core.toggle_drawing()
    }

    pub fn exit_drawing(&mut self) -> Vec<Action> {
        self.core.exit_drawing()
    }

    pub fn toggle_eraser(&mut self) -> Vec<Action> {
        self.core.toggle_eraser()
    }

    pub fn toggle_palette(&mut self) -> Vec<Action> {
        self.core.toggle_palette()
    }

    pub fn toggle_brush_popup(&mut self) -> Vec<Action> {
        self.core.toggle_brush_popup()
    }

    pub fn select_color(&mut self, color: &str) -> Vec<Action> {
        self.core.select_color(color)
    }

    pub fn set_brush_width(&mut self, width: f64) -> Vec<Action> {
        self.core.set_brush_width(width)
    }

    pub fn clear(&mut self) -> Vec<Action> {
        self.core.clear()
    }

    pub fn undo(&mut self) -> Vec<Action> {
        self.core.undo()
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.core.redo()
    }

    pub fn image_switched(&mut self) -> Vec<Action> {
        self.core.image_switched()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pointer_id: i32, point: Point) -> Vec<Action> {
        self.core.on_pointer_down(pointer_id, point)
    }

    /// Extend the stroke and draw the new segment immediately.
    pub fn on_pointer_move(&mut self, pointer_id: i32, point: Point) -> Vec<Action> {
        let actions = self.core.on_pointer_move(pointer_id, point);
        if actions.contains(&Action::SegmentAdded) {
            if let Some(stroke) = self.core.in_progress() {
                if let Err(e) = render::draw_latest_segment(&self.ctx, stroke, self.core.dpr) {
                    web_sys::console::warn_2(&JsValue::from_str("segment draw failed"), &e);
                }
            }
        }
        actions
    }

    pub fn on_pointer_up(&mut self, pointer_id: i32) -> Vec<Action> {
        self.core.on_pointer_up(pointer_id)
    }

    pub fn on_pointer_leave(&mut self, pointer_id: i32) -> Vec<Action> {
        self.core.on_pointer_leave(pointer_id)
    }

    // --- Surface ---

    /// Resize the backing store to the CSS size times the device pixel ratio.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_surface(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_surface(width_css, height_css, dpr);
        self.canvas.set_width((self.core.surface_width * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.surface_height * self.core.dpr).round() as u32);
        actions
    }

    // --- Render ---

    /// Clear the surface and replay the visible history.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        render::replay(
            &self.ctx,
            self.core.history.base(),
            self.core.history.visible(),
            self.core.in_progress(),
            self.core.surface_width,
            self.core.surface_height,
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn tools(&self) -> &ToolState {
        &self.core.tools
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.core.is_drawing()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.core.can_redo()
    }
}
