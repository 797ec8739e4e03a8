//! Thumbnail strip for direct selection.

use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::runtime::{RuntimeRef, with_runtime};
use crate::state::viewer::ViewerState;
#[cfg(feature = "csr")]
use gallery::session::Navigation;

#[component]
pub fn ThumbnailStrip() -> impl IntoView {
    let viewer = expect_context::<RwSignal<ViewerState>>();
    #[cfg(feature = "csr")]
    let runtime = expect_context::<RuntimeRef>();

    #[cfg(feature = "csr")]
    let select = move |index: usize| {
        move |_ev: leptos::ev::MouseEvent| with_runtime(runtime, |h| h.navigate(Navigation::Select(index)))
    };
    #[cfg(not(feature = "csr"))]
    let select = |_index: usize| |_ev: leptos::ev::MouseEvent| {};

    view! {
        <nav class="thumbnail-strip">
            {move || {
                viewer
                    .with(|v| v.thumbnails.clone())
                    .into_iter()
                    .map(|thumb| {
                        let index = thumb.index;
                        let title = thumb.label.clone();
                        view! {
                            <button
                                class="thumbnail"
                                class:active=move || viewer.with(|v| v.active_index == index)
                                title=title
                                on:click=select(index)
                            >
                                <img src=thumb.url alt=thumb.label loading="lazy"/>
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}
