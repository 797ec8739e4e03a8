//! Shared constants for the annotation canvas.

// ── Brush ───────────────────────────────────────────────────────

/// Stroke width in CSS pixels when nothing else has been chosen.
pub const DEFAULT_BRUSH_WIDTH: f64 = 5.0;

/// Narrowest brush the size slider allows.
pub const MIN_BRUSH_WIDTH: f64 = 1.0;

/// Widest brush the size slider allows.
pub const MAX_BRUSH_WIDTH: f64 = 50.0;

/// Initial paint colour.
pub const DEFAULT_COLOR: &str = "#ff0000";

/// Swatches offered by the colour palette, in display order.
pub const PALETTE: [&str; 8] = ["#ff0000", "#ff9900", "#ffff00", "#00cc44", "#0099ff", "#9933ff", "#ffffff", "#000000"];

/// Stroke style used while erasing. Only its alpha matters under
/// `destination-out`.
pub const ERASE_STYLE: &str = "rgba(0,0,0,1)";

// ── History ─────────────────────────────────────────────────────

/// Committed strokes kept for undo before the oldest is dropped.
pub const HISTORY_CAPACITY: usize = 50;
