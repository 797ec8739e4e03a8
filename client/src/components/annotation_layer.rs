//! Annotation overlay: the drawing canvas above the panorama and its toolbar.
//!
//! ARCHITECTURE
//! ============
//! `canvas::engine::Engine` owns strokes and tool state; the runtime carries
//! out the actions it returns. This component only maps DOM events to engine
//! calls and renders the toolbar from the `AnnotationState` snapshot.

use canvas::consts::PALETTE;
use canvas::engine::{Action, Engine};
use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::runtime::{RuntimeRef, ViewerHandle, with_runtime};
use crate::state::annotation::{AnnotationState, brush_range};
#[cfg(feature = "csr")]
use crate::util::ui_persistence::load_tool_prefs;

type OverlayOp = fn(&mut Engine) -> Vec<Action>;

/// Overlay canvas plus toolbar.
#[component]
pub fn AnnotationLayer() -> impl IntoView {
    let annotation = expect_context::<RwSignal<AnnotationState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    #[cfg(feature = "csr")]
    let runtime = expect_context::<RuntimeRef>();

    #[cfg(feature = "csr")]
    {
        let attached = StoredValue::new(false);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if attached.get_value() {
                return;
            }
            attached.set_value(true);
            with_runtime(runtime, |handle| handle.attach_overlay(canvas, load_tool_prefs()));
        });

        let resize = window_event_listener(leptos::ev::resize, move |_ev| {
            with_runtime(runtime, ViewerHandle::sync_surface);
        });
        on_cleanup(move || resize.remove());
    }

    #[cfg(feature = "csr")]
    let tool = move |op: OverlayOp| move |_ev: leptos::ev::MouseEvent| with_runtime(runtime, |h| h.with_overlay(op));
    #[cfg(not(feature = "csr"))]
    let tool = |_op: OverlayOp| |_ev: leptos::ev::MouseEvent| {};

    #[cfg(feature = "csr")]
    let swatch = move |color: &'static str| {
        move |_ev: leptos::ev::MouseEvent| with_runtime(runtime, |h| h.with_overlay(|engine| engine.select_color(color)))
    };
    #[cfg(not(feature = "csr"))]
    let swatch = |_color: &'static str| |_ev: leptos::ev::MouseEvent| {};

    let on_brush_input = move |ev: leptos::ev::Event| {
        let Ok(width) = event_target_value(&ev).parse::<f64>() else {
            return;
        };
        #[cfg(feature = "csr")]
        with_runtime(runtime, |h| h.with_overlay(|engine| engine.set_brush_width(width)));
        #[cfg(not(feature = "csr"))]
        let _ = width;
    };

    let pointer = move |kind: PointerKind| {
        move |ev: leptos::ev::PointerEvent| {
            ev.prevent_default();
            #[cfg(feature = "csr")]
            with_runtime(runtime, |h| match kind {
                PointerKind::Down => h.pointer_down(&ev),
                PointerKind::Move => h.pointer_move(&ev),
                PointerKind::Up => h.pointer_up(&ev),
                PointerKind::Leave => h.pointer_leave(&ev),
            });
            #[cfg(not(feature = "csr"))]
            let _ = kind;
        }
    };

    let drawing = move || annotation.with(|a| a.drawing);
    let (min_width, max_width) = brush_range();

    view! {
        <canvas
            class=move || annotation.with(AnnotationState::overlay_class)
            node_ref=canvas_ref
            style:pointer-events=move || if drawing() { "auto" } else { "none" }
            style:cursor=move || annotation.with(AnnotationState::cursor)
            style:touch-action="none"
            on:pointerdown=pointer(PointerKind::Down)
            on:pointermove=pointer(PointerKind::Move)
            on:pointerup=pointer(PointerKind::Up)
            on:pointerleave=pointer(PointerKind::Leave)
        ></canvas>
        <div class="annotation-toolbar">
            <button
                class="tool-button pencil"
                class:active=drawing
                title="Draw on the image"
                on:click=tool(Engine::toggle_drawing)
            >
                "✎"
            </button>
            <span class="lock-indicator" class:visible=drawing title="Auto-advance paused">
                "🔒"
            </span>
            <button
                class="tool-button eraser"
                class:active=move || annotation.with(|a| a.eraser)
                disabled=move || !drawing()
                title="Eraser"
                on:click=tool(Engine::toggle_eraser)
            >
                "⌫"
            </button>
            <div class="tool-group">
                <button class="tool-button brush-size" title="Brush size" on:click=tool(Engine::toggle_brush_popup)>
                    {move || annotation.with(AnnotationState::brush_label)}
                </button>
                <Show when=move || annotation.with(AnnotationState::brush_popup_open)>
                    <div class="tool-popup brush-popup">
                        <input
                            type="range"
                            min=min_width.to_string()
                            max=max_width.to_string()
                            step="1"
                            prop:value=move || annotation.with(|a| a.width.to_string())
                            on:input=on_brush_input
                        />
                    </div>
                </Show>
            </div>
            <div class="tool-group">
                <button
                    class="tool-button palette"
                    title="Colour"
                    style:background-color=move || annotation.with(|a| a.color.clone())
                    on:click=tool(Engine::toggle_palette)
                ></button>
                <Show when=move || annotation.with(AnnotationState::palette_open)>
                    <div class="tool-popup palette-popup">
                        {PALETTE
                            .iter()
                            .map(|&color| {
                                view! {
                                    <button
                                        class="swatch"
                                        class:selected=move || annotation.with(|a| a.color == color)
                                        style:background-color=color
                                        title=color
                                        on:click=swatch(color)
                                    ></button>
                                }
                            })
                            .collect_view()}
                    </div>
                </Show>
            </div>
            <button
                class="tool-button undo"
                disabled=move || !annotation.with(|a| a.can_undo)
                title="Undo"
                on:click=tool(Engine::undo)
            >
                "↶"
            </button>
            <button
                class="tool-button redo"
                disabled=move || !annotation.with(|a| a.can_redo)
                title="Redo"
                on:click=tool(Engine::redo)
            >
                "↷"
            </button>
            <button class="tool-button clear" title="Clear drawing" on:click=tool(Engine::clear)>
                "✕"
            </button>
        </div>
    }
}

#[derive(Clone, Copy)]
enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}
