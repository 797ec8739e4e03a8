//! Input model: the drawing mode, toolbar state, and the capture state machine.
//!
//! `Mode` says whether the overlay accepts pointer input at all. `ToolState`
//! holds the brush settings a new stroke copies when it starts. `InputState`
//! is the gesture tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BRUSH_WIDTH, DEFAULT_COLOR, MAX_BRUSH_WIDTH, MIN_BRUSH_WIDTH};
use crate::stroke::{CompositeMode, StrokeRecord};

/// Whether the overlay is capturing pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pointer events pass through to the panorama.
    #[default]
    Idle,
    /// Pointer events draw on the overlay.
    Drawing,
}

/// Which toolbar popup is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popup {
    #[default]
    None,
    BrushSize,
    Palette,
}

/// Brush settings and toolbar visibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolState {
    pub color: String,
    pub width: f64,
    /// Erase instead of paint. Only meaningful in [`Mode::Drawing`].
    #[serde(skip)]
    pub eraser: bool,
    #[serde(skip)]
    pub popup: Popup,
}

impl Default for ToolState {
    fn default() -> Self {
        Self { color: DEFAULT_COLOR.to_owned(), width: DEFAULT_BRUSH_WIDTH, eraser: false, popup: Popup::None }
    }
}

impl ToolState {
    /// Compositing mode for the next stroke.
    #[must_use]
    pub fn composite_mode(&self) -> CompositeMode {
        if self.eraser { CompositeMode::Erase } else { CompositeMode::Paint }
    }

    /// Open `popup`, or close it if it is already open.
    pub fn toggle_popup(&mut self, popup: Popup) {
        self.popup = if self.popup == popup { Popup::None } else { popup };
    }
}

/// Clamp a requested brush width to the supported range. Non-finite input
/// yields `None`.
#[must_use]
pub fn clamp_brush_width(width: f64) -> Option<f64> {
    width.is_finite().then(|| width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH))
}

/// The gesture in progress.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No pointer is down on the overlay.
    #[default]
    Idle,
    /// A stroke is being captured from one pointer.
    Capturing {
        /// Pointer that started the stroke; other pointers are ignored.
        pointer_id: i32,
        stroke: StrokeRecord,
    },
}
