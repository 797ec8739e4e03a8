//! Network access for the browser viewer.

pub mod api;
