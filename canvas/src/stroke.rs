//! Stroke geometry: points in canvas space and finished drawing gestures.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};

/// A point in canvas-local CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How a stroke combines with pixels already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositeMode {
    /// Paint over existing pixels.
    #[default]
    Paint,
    /// Remove existing pixels, revealing whatever lies under the canvas.
    Erase,
}

impl CompositeMode {
    /// The `globalCompositeOperation` value for this mode.
    #[must_use]
    pub fn operation(self) -> &'static str {
        match self {
            Self::Paint => "source-over",
            Self::Erase => "destination-out",
        }
    }
}

/// One pointer-down to pointer-up gesture.
///
/// Colour, width and mode are fixed when the stroke starts; only `points`
/// grows, and only until the stroke is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
    pub mode: CompositeMode,
}

impl StrokeRecord {
    #[must_use]
    pub fn begin(start: Point, color: &str, width: f64, mode: CompositeMode) -> Self {
        Self { points: vec![start], color: color.to_owned(), width, mode }
    }

    /// Append a point. Returns `false` for a repeat of the last point.
    pub fn extend_to(&mut self, point: Point) -> bool {
        if self.points.last() == Some(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    /// The most recently added segment, if the stroke has one.
    #[must_use]
    pub fn last_segment(&self) -> Option<(Point, Point)> {
        match self.points.as_slice() {
            [.., from, to] => Some((*from, *to)),
            _ => None,
        }
    }

    /// Whether the stroke has at least one segment and so marks the canvas.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.points.len() > 1
    }
}
