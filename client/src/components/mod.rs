//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the viewer chrome and forward DOM events to the browser
//! runtime. They read view models from Leptos context and never touch the
//! session or the overlay engine directly.

pub mod annotation_layer;
pub mod thumbnail_strip;
pub mod viewer_stage;
