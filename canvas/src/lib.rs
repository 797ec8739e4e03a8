//! Annotation overlay engine for the panorama viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! freehand drawing layer that sits on top of the panorama: the Idle/Drawing
//! mode, brush and eraser settings, stroke capture, and the bounded undo/redo
//! history. The host component only wires DOM pointer events and toolbar
//! clicks to the engine and reacts to the [`engine::Action`]s it returns
//! (suspending idle playback, capturing pointers, scheduling a redraw).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`stroke`] | Points, compositing modes, and stroke records |
//! | [`history`] | Bounded undo/redo ledger replayed on redraw |
//! | [`input`] | Drawing mode, toolbar state, and the capture state machine |
//! | [`render`] | Stroke rendering to the 2D context |
//! | [`consts`] | Brush defaults, palette, and history capacity |

pub mod consts;
pub mod engine;
pub mod history;
pub mod input;
pub mod render;
pub mod stroke;
