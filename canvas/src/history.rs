//! Bounded undo/redo ledger of committed strokes.
//!
//! Strokes before the cursor are visible; strokes from the cursor on are the
//! redo buffer. Undo and redo only move the cursor, and the canvas is redrawn
//! by replaying the base layer and then the visible prefix. Committing a
//! stroke drops the redo buffer first; once the capacity is exceeded the
//! oldest strokes move into the base layer, which stays on screen but can no
//! longer be undone.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::consts::HISTORY_CAPACITY;
use crate::stroke::StrokeRecord;

#[derive(Debug, Clone)]
pub struct AnnotationHistory {
    base: Vec<StrokeRecord>,
    strokes: Vec<StrokeRecord>,
    cursor: usize,
    capacity: usize,
}

impl Default for AnnotationHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl AnnotationHistory {
    /// A ledger holding at most `capacity` strokes (at least one).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { base: Vec::new(), strokes: Vec::new(), cursor: 0, capacity: capacity.max(1) }
    }

    pub fn commit(&mut self, stroke: StrokeRecord) {
        self.strokes.truncate(self.cursor);
        self.strokes.push(stroke);
        self.cursor = self.strokes.len();

        if self.strokes.len() > self.capacity {
            let excess = self.strokes.len() - self.capacity;
            self.base.extend(self.strokes.drain(..excess));
            self.cursor -= excess;
        }
    }

    /// Step back one stroke. Returns `false` at the oldest state.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one stroke. Returns `false` at the newest state.
    pub fn redo(&mut self) -> bool {
        if self.cursor == self.strokes.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Drop every stroke, including the base layer and the redo buffer.
    pub fn clear(&mut self) {
        self.base.clear();
        self.strokes.clear();
        self.cursor = 0;
    }

    /// Strokes evicted from the undo range, oldest first. Drawn beneath
    /// [`Self::visible`].
    #[must_use]
    pub fn base(&self) -> &[StrokeRecord] {
        &self.base
    }

    /// Undoable strokes currently on screen, oldest first.
    #[must_use]
    pub fn visible(&self) -> &[StrokeRecord] {
        &self.strokes[..self.cursor]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.strokes.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Undoable strokes, redo buffer included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.strokes.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
