//! Browser viewer for the panorama gallery.
//!
//! Built with Leptos in client-side-rendering mode. Everything that touches
//! the DOM or the network is gated behind the `csr` feature, so the view
//! models and helpers build and test natively.
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Root component and start-up fetch |
//! | [`components`] | Stage, annotation overlay and thumbnail strip |
//! | [`net`] | Listing fetch |
//! | `runtime` | Effect and action routing (csr only) |
//! | [`state`] | Reactive view models |
//! | [`util`] | Storage, timers, preloading, page config, Pannellum bindings |

pub mod app;
pub mod components;
pub mod net;
#[cfg(feature = "csr")]
pub mod runtime;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
