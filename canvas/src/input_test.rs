#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_toolbar() {
    let tools = ToolState::default();
    assert_eq!(tools.color, "#ff0000");
    assert_eq!(tools.width, 5.0);
    assert!(!tools.eraser);
    assert_eq!(tools.popup, Popup::None);
    assert_eq!(Mode::default(), Mode::Idle);
}

#[test]
fn eraser_selects_erase_compositing() {
    let mut tools = ToolState::default();
    assert_eq!(tools.composite_mode(), CompositeMode::Paint);
    tools.eraser = true;
    assert_eq!(tools.composite_mode(), CompositeMode::Erase);
}

#[test]
fn popups_are_mutually_exclusive() {
    let mut tools = ToolState::default();
    tools.toggle_popup(Popup::BrushSize);
    assert_eq!(tools.popup, Popup::BrushSize);
    tools.toggle_popup(Popup::Palette);
    assert_eq!(tools.popup, Popup::Palette);
    tools.toggle_popup(Popup::Palette);
    assert_eq!(tools.popup, Popup::None);
}

#[test]
fn brush_width_is_clamped() {
    assert_eq!(clamp_brush_width(0.0), Some(1.0));
    assert_eq!(clamp_brush_width(12.0), Some(12.0));
    assert_eq!(clamp_brush_width(500.0), Some(50.0));
    assert_eq!(clamp_brush_width(f64::NAN), None);
}

#[test]
fn persisted_preferences_skip_transient_fields() {
    let mut tools = ToolState { color: "#00cc44".into(), width: 9.0, ..ToolState::default() };
    tools.eraser = true;
    tools.popup = Popup::Palette;
    let json = serde_json::to_value(&tools).expect("json");
    assert_eq!(json, serde_json::json!({ "color": "#00cc44", "width": 9.0 }));

    let restored: ToolState = serde_json::from_str(r#"{"width": 7}"#).expect("parse");
    assert_eq!(restored.color, "#ff0000");
    assert_eq!(restored.width, 7.0);
}
