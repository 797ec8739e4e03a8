//! Toolbar view model for the annotation overlay.
//!
//! The canvas engine is the source of truth; this snapshot is refreshed after
//! every engine action so the toolbar can render reactively.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use canvas::consts::{MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use canvas::engine::EngineCore;
use canvas::input::{Popup, ToolState};

/// `localStorage` key for the persisted brush preferences.
pub const TOOL_PREFS_KEY: &str = "panoview_annotation_tools";

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationState {
    pub drawing: bool,
    pub eraser: bool,
    pub popup: Popup,
    pub color: String,
    pub width: f64,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl Default for AnnotationState {
    fn default() -> Self {
        Self::from_core(&EngineCore::new())
    }
}

impl AnnotationState {
    #[must_use]
    pub fn from_core(core: &EngineCore) -> Self {
        Self {
            drawing: core.is_drawing(),
            eraser: core.tools.eraser,
            popup: core.tools.popup,
            color: core.tools.color.clone(),
            width: core.tools.width,
            can_undo: core.can_undo(),
            can_redo: core.can_redo(),
        }
    }

    /// Snapshot before the engine is mounted, seeded from saved preferences.
    #[must_use]
    pub fn from_tools(tools: &ToolState) -> Self {
        Self::from_core(&EngineCore::with_tools(tools.clone()))
    }

    /// Slider label, e.g. `"5 px"`.
    #[must_use]
    pub fn brush_label(&self) -> String {
        format!("{} px", self.width.round())
    }

    /// Overlay class: pointer events only reach the canvas while drawing.
    #[must_use]
    pub fn overlay_class(&self) -> &'static str {
        if self.drawing { "annotation-overlay drawing" } else { "annotation-overlay" }
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match (self.drawing, self.eraser) {
            (false, _) => "default",
            (true, false) => "crosshair",
            (true, true) => "cell",
        }
    }

    #[must_use]
    pub fn palette_open(&self) -> bool {
        self.popup == Popup::Palette
    }

    #[must_use]
    pub fn brush_popup_open(&self) -> bool {
        self.popup == Popup::BrushSize
    }
}

/// Bounds for the brush-size slider.
#[must_use]
pub fn brush_range() -> (f64, f64) {
    (MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
}
