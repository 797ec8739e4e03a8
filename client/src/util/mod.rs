//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, timers, image loading,
//! the panorama library) from component logic.

pub mod page_config;
#[cfg(feature = "csr")]
pub mod panorama;
#[cfg(feature = "csr")]
pub mod preload;
pub mod timers;
pub mod ui_persistence;
