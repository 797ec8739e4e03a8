//! Presentational state of the viewer stage.
//!
//! DESIGN
//! ======
//! `ViewerSession` in the gallery crate owns navigation and timing. This
//! struct only mirrors what the page paints: the fade overlay, the projection
//! badge, the idle cue, the active thumbnail, and a status notice. The browser
//! runtime feeds every session effect through [`ViewerState::apply`] and only
//! notifies subscribers when something visible changed.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use gallery::{GalleryConfig, GalleryError, ImageEntry, ListingOrigin, SessionEffect};

/// Thumbnail edge requested from the resizing proxy.
pub const THUMBNAIL_WIDTH: u32 = 240;

/// One entry of the thumbnail strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub label: String,
    pub url: String,
}

/// What the viewer chrome currently shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerState {
    pub thumbnails: Vec<Thumbnail>,
    pub active_index: usize,
    /// The black cross-fade layer covers the panorama.
    pub overlay_opaque: bool,
    pub badge: Option<&'static str>,
    pub idle_cue: bool,
    /// Waiting for the listing or the first scene.
    pub loading: bool,
    pub notice: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            thumbnails: Vec::new(),
            active_index: 0,
            overlay_opaque: true,
            badge: None,
            idle_cue: false,
            loading: true,
            notice: None,
        }
    }
}

impl ViewerState {
    /// Replace the thumbnail strip after the listing resolved.
    pub fn set_gallery(&mut self, images: &[ImageEntry], origin: ListingOrigin, config: &GalleryConfig) {
        self.thumbnails = images
            .iter()
            .enumerate()
            .map(|(index, image)| Thumbnail {
                index,
                label: image.display_name(&config.hidden_prefix).to_owned(),
                url: image
                    .thumbnail_url(config, THUMBNAIL_WIDTH)
                    .unwrap_or_else(|_| image.source_url.clone()),
            })
            .collect();
        self.active_index = 0;
        self.notice = match origin {
            ListingOrigin::Remote => None,
            ListingOrigin::Fallback => Some("Gallery listing unavailable; showing the default set.".to_owned()),
        };
    }

    /// Mirror one session effect. Returns `true` when visible state changed.
    pub fn apply(&mut self, effect: &SessionEffect) -> bool {
        match effect {
            SessionEffect::FadeOut => replace(&mut self.overlay_opaque, true),
            SessionEffect::FadeIn => {
                let faded = replace(&mut self.overlay_opaque, false);
                replace(&mut self.loading, false) || faded
            }
            SessionEffect::ShowBadge(label) => replace(&mut self.badge, Some(*label)),
            SessionEffect::ActiveIndex(index) => replace(&mut self.active_index, *index),
            SessionEffect::ShowIdleCue => replace(&mut self.idle_cue, true),
            SessionEffect::HideIdleCue => replace(&mut self.idle_cue, false),
            SessionEffect::ReportEmpty => {
                self.loading = false;
                self.notice = Some("No images available.".to_owned());
                true
            }
            SessionEffect::ExitAnnotation
            | SessionEffect::Preload { .. }
            | SessionEffect::BuildScene(_)
            | SessionEffect::WarmCache(_)
            | SessionEffect::ScheduleTimer { .. }
            | SessionEffect::CancelTimers
            | SessionEffect::Scene(_) => false,
        }
    }

    /// Show a fatal error in place of the gallery.
    pub fn show_error(&mut self, error: &GalleryError) {
        self.loading = false;
        self.notice = Some(format!("{error} [{}]", error.error_code()));
    }

    /// Document title for the active image.
    #[must_use]
    pub fn title(&self) -> String {
        match self.thumbnails.get(self.active_index) {
            Some(thumb) => format!("{} ({}/{})", thumb.label, self.active_index + 1, self.thumbnails.len()),
            None => "Panorama Gallery".to_owned(),
        }
    }

    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.thumbnails.len() > 1
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
