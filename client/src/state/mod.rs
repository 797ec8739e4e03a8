//! Reactive view models shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both structs are plain data so they test natively. The browser runtime
//! writes them; components only read.

pub mod annotation;
pub mod viewer;
