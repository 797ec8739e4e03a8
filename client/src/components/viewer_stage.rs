//! The panorama stage: Pannellum container, cross-fade layer, badge, idle
//! cue and previous/next controls.
//!
//! Any pointer, wheel or key activity inside the stage counts as interaction
//! and restarts the idle timers.

use leptos::prelude::*;

use crate::components::annotation_layer::AnnotationLayer;
#[cfg(feature = "csr")]
use crate::runtime::{RuntimeRef, with_runtime};
use crate::state::viewer::ViewerState;
#[cfg(feature = "csr")]
use gallery::session::Navigation;

/// Viewer stage component.
///
/// On mount, hands its container to the runtime so scenes can be built
/// inside it.
#[component]
pub fn ViewerStage() -> impl IntoView {
    let viewer = expect_context::<RwSignal<ViewerState>>();
    let stage_ref = NodeRef::<leptos::html::Div>::new();
    #[cfg(feature = "csr")]
    let runtime = expect_context::<RuntimeRef>();

    #[cfg(feature = "csr")]
    {
        let attached = StoredValue::new(false);
        Effect::new(move || {
            let Some(container) = stage_ref.get() else {
                return;
            };
            if attached.get_value() {
                return;
            }
            attached.set_value(true);
            with_runtime(runtime, |handle| handle.attach_stage(container.into()));
        });
    }

    let on_activity = move || {
        #[cfg(feature = "csr")]
        with_runtime(runtime, crate::runtime::ViewerHandle::interaction);
    };

    let on_prev = move |_ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "csr")]
        with_runtime(runtime, |handle| handle.navigate(Navigation::Previous));
    };
    let on_next = move |_ev: leptos::ev::MouseEvent| {
        #[cfg(feature = "csr")]
        with_runtime(runtime, |handle| handle.navigate(Navigation::Next));
    };

    let opaque = move || viewer.with(|v| v.overlay_opaque);
    let loading = move || viewer.with(|v| v.loading);
    let cue_visible = move || viewer.with(|v| v.idle_cue);
    let can_navigate = move || viewer.with(ViewerState::can_navigate);

    view! {
        <section
            class="viewer-stage"
            tabindex="0"
            on:pointerdown=move |_ev: leptos::ev::PointerEvent| on_activity()
            on:wheel=move |_ev: leptos::ev::WheelEvent| on_activity()
            on:keydown=move |_ev: leptos::ev::KeyboardEvent| on_activity()
        >
            <div class="panorama" node_ref=stage_ref></div>
            <AnnotationLayer/>
            <div class="fade-layer" class:opaque=opaque></div>
            <Show when=loading>
                <div class="loading-indicator">"Loading…"</div>
            </Show>
            {move || {
                viewer.with(|v| v.badge).map(|label| view! { <span class="projection-badge">{label}</span> })
            }}
            <div class="idle-cue" class:visible=cue_visible>
                "Drag to look around"
            </div>
            <Show when=can_navigate>
                <button class="nav-button prev" title="Previous image" on:click=on_prev>
                    "‹"
                </button>
                <button class="nav-button next" title="Next image" on:click=on_next>
                    "›"
                </button>
            </Show>
            {move || viewer.with(|v| v.notice.clone()).map(|notice| view! { <p class="notice">{notice}</p> })}
        </section>
    }
}
