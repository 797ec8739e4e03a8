#![allow(clippy::float_cmp)]

use super::*;
use crate::stroke::{CompositeMode, Point};

fn stroke(tag: f64) -> StrokeRecord {
    let mut s = StrokeRecord::begin(Point::new(tag, 0.0), "#ff0000", 5.0, CompositeMode::Paint);
    s.extend_to(Point::new(tag, 10.0));
    s
}

fn tags(history: &AnnotationHistory) -> Vec<f64> {
    history.visible().iter().map(|s| s.points[0].x).collect()
}

// =============================================================
// Undo / redo
// =============================================================

#[test]
fn empty_history_cannot_move() {
    let mut history = AnnotationHistory::default();
    assert!(!history.undo());
    assert!(!history.redo());
    assert!(history.visible().is_empty());
    assert_eq!(history.capacity(), HISTORY_CAPACITY);
}

#[test]
fn undo_then_redo_restores() {
    let mut history = AnnotationHistory::default();
    history.commit(stroke(1.0));
    history.commit(stroke(2.0));
    assert!(history.undo());
    assert_eq!(tags(&history), vec![1.0]);
    assert!(history.can_redo());
    assert!(history.redo());
    assert_eq!(tags(&history), vec![1.0, 2.0]);
    assert!(!history.redo());
}

#[test]
fn undo_to_blank_canvas() {
    let mut history = AnnotationHistory::default();
    history.commit(stroke(1.0));
    assert!(history.undo());
    assert!(history.visible().is_empty());
    assert!(!history.undo());
}

#[test]
fn commit_after_undo_discards_redo() {
    let mut history = AnnotationHistory::default();
    history.commit(stroke(1.0));
    history.commit(stroke(2.0));
    history.undo();
    history.commit(stroke(3.0));
    assert_eq!(tags(&history), vec![1.0, 3.0]);
    assert!(!history.can_redo());
    assert_eq!(history.len(), 2);
}

// =============================================================
// Capacity
// =============================================================

#[test]
fn capacity_evicts_oldest() {
    let mut history = AnnotationHistory::with_capacity(3);
    for tag in 1..=5 {
        history.commit(stroke(f64::from(tag)));
    }
    assert_eq!(tags(&history), vec![3.0, 4.0, 5.0]);
    assert_eq!(history.cursor(), 3);
}

#[test]
fn evicted_strokes_stay_on_screen() {
    let mut history = AnnotationHistory::with_capacity(2);
    for tag in 1..=4 {
        history.commit(stroke(f64::from(tag)));
    }
    let base: Vec<f64> = history.base().iter().map(|s| s.points[0].x).collect();
    assert_eq!(base, vec![1.0, 2.0]);
    assert_eq!(tags(&history), vec![3.0, 4.0]);

    while history.undo() {}
    assert_eq!(history.base().len(), 2);
    assert!(!history.is_empty());
}

#[test]
fn clear_wipes_base_layer() {
    let mut history = AnnotationHistory::with_capacity(1);
    history.commit(stroke(1.0));
    history.commit(stroke(2.0));
    history.clear();
    assert!(history.base().is_empty());
    assert!(history.is_empty());
}

#[test]
fn eviction_keeps_remaining_strokes_undoable() {
    let mut history = AnnotationHistory::with_capacity(2);
    for tag in 1..=3 {
        history.commit(stroke(f64::from(tag)));
    }
    assert!(history.undo());
    assert!(history.undo());
    assert!(!history.undo());
    assert!(history.visible().is_empty());
    assert!(history.redo());
    assert_eq!(tags(&history), vec![2.0]);
}

#[test]
fn zero_capacity_is_raised_to_one() {
    let mut history = AnnotationHistory::with_capacity(0);
    history.commit(stroke(1.0));
    history.commit(stroke(2.0));
    assert_eq!(tags(&history), vec![2.0]);
}

#[test]
fn clear_drops_everything() {
    let mut history = AnnotationHistory::default();
    history.commit(stroke(1.0));
    history.undo();
    history.clear();
    assert!(history.is_empty());
    assert!(!history.can_redo());
}
