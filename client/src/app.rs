//! Root component: builds the view models, starts the listing fetch and lays
//! out the page.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::thumbnail_strip::ThumbnailStrip;
use crate::components::viewer_stage::ViewerStage;
use crate::state::annotation::AnnotationState;
use crate::state::viewer::ViewerState;
use crate::util::page_config;
use crate::util::ui_persistence::load_tool_prefs;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = page_config::load();
    let viewer = RwSignal::new(ViewerState::default());
    let annotation = RwSignal::new(AnnotationState::from_tools(&load_tool_prefs()));
    provide_context(viewer);
    provide_context(annotation);

    #[cfg(feature = "csr")]
    {
        use gallery::listing::GalleryDataSource;

        use crate::net::api::fetch_listing;
        use crate::runtime::{ViewerHandle, provide_runtime};

        let handle = ViewerHandle::new(config.clone(), viewer, annotation);
        provide_runtime(handle.clone());
        let source = GalleryDataSource::new(config);
        leptos::task::spawn_local(async move {
            let listing = fetch_listing(&source.listing_url()).await;
            match source.resolve(listing) {
                Ok(resolution) => handle.load(resolution),
                Err(e) => handle.fail(&e),
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = config;

    view! {
        <Title text=move || viewer.with(ViewerState::title)/>
        <main class="panoview">
            <ViewerStage/>
            <ThumbnailStrip/>
        </main>
    }
}
