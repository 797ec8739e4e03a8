//! Domain core for the panorama gallery viewer and its admin tooling.
//!
//! This crate owns every decision the viewer makes that does not need a
//! browser: which images are shown and in what order, how each image is
//! projected, when the idle cue and auto-advance fire, and how admin
//! mutations are sequenced against the remote file store. The `client` crate
//! maps DOM events and timers onto these types; the `cli` crate drives the
//! admin operations over HTTP.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Repository coordinates and playback tunables |
//! | [`error`] | Error taxonomy shared by every caller |
//! | [`naming`] | Hidden-prefix convention, extension filter, natural sort |
//! | [`listing`] | Resolves the ordered image list (remote or fallback) |
//! | [`projection`] | Aspect-ratio classification and scene configuration |
//! | [`idle`] | Attract / advance timer state machine |
//! | [`scene`] | Rendering-engine contract and commands |
//! | [`session`] | Viewer session: navigation, preload staleness, cross-fade |
//! | [`store`] | Remote file store contract and wire types |
//! | [`admin`] | Upload / rename / visibility / delete sequences |

pub mod admin;
pub mod config;
pub mod error;
pub mod idle;
pub mod listing;
pub mod naming;
pub mod projection;
pub mod scene;
pub mod session;
pub mod store;

pub use admin::AdminOps;
pub use config::{GalleryConfig, PlaybackConfig};
pub use error::{GalleryError, MutationStep};
pub use listing::{Audience, ImageEntry, ListingOrigin, Resolution};
pub use projection::{ProjectionKind, ViewerSceneConfig};
pub use session::{SessionEffect, ViewerSession};
