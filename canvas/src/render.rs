//! Rendering: draws strokes to the overlay's 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads stroke records and produces pixels; it never mutates engine state.
//!
//! Erase strokes use `destination-out`, which clears alpha instead of
//! painting a background colour, so the panorama under the overlay shows
//! through.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::ERASE_STYLE;
use crate::stroke::{CompositeMode, StrokeRecord};

/// Clear the surface and replay `base`, then `strokes` in order, then the
/// in-progress stroke on top.
///
/// `width` and `height` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn replay(
    ctx: &CanvasRenderingContext2d,
    base: &[StrokeRecord],
    strokes: &[StrokeRecord],
    in_progress: Option<&StrokeRecord>,
    width: f64,
    height: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_global_composite_operation(CompositeMode::Paint.operation())?;
    ctx.clear_rect(0.0, 0.0, width, height);

    for stroke in base.iter().chain(strokes).chain(in_progress) {
        draw_stroke(ctx, stroke)?;
    }
    Ok(())
}

/// Draw only the newest segment of `stroke`.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_latest_segment(ctx: &CanvasRenderingContext2d, stroke: &StrokeRecord, dpr: f64) -> Result<(), JsValue> {
    let Some((from, to)) = stroke.last_segment() else {
        return Ok(());
    };
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.save();
    apply_style(ctx, stroke)?;
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_stroke(ctx: &CanvasRenderingContext2d, stroke: &StrokeRecord) -> Result<(), JsValue> {
    let Some((first, rest)) = stroke.points.split_first() else {
        return Ok(());
    };
    if rest.is_empty() {
        return Ok(());
    }
    ctx.save();
    apply_style(ctx, stroke)?;
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn apply_style(ctx: &CanvasRenderingContext2d, stroke: &StrokeRecord) -> Result<(), JsValue> {
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_global_composite_operation(stroke.mode.operation())?;
    match stroke.mode {
        CompositeMode::Paint => ctx.set_stroke_style_str(&stroke.color),
        CompositeMode::Erase => ctx.set_stroke_style_str(ERASE_STYLE),
    }
    Ok(())
}
