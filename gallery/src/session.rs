//! Viewer session: the single owner of current-image, load-generation,
//! annotation-suspension and idle-timer state.
//!
//! ARCHITECTURE
//! ============
//! The session is a pure state machine. Every input (listing resolved, user
//! navigation, preload finished, scene loaded, timer elapsed, annotation mode
//! changed, pointer activity) returns an ordered list of [`SessionEffect`]s
//! for the host to apply. The host never mutates session state directly.
//!
//! An image switch runs as a cross-fade: the overlay goes opaque, the image is
//! preloaded after the fade delay to measure its dimensions, the scene is
//! rebuilt from the planned configuration, and only once the new scene
//! reports loaded does the overlay clear. Each switch bumps the load
//! generation; preload and scene completions tagged with an older generation
//! are discarded without touching the live scene.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::PlaybackConfig;
use crate::error::GalleryError;
use crate::idle::{IdleEffect, IdlePlaybackController, TimerToken};
use crate::listing::{ImageEntry, ListingOrigin, Resolution};
use crate::projection::{self, ViewerSceneConfig};
use crate::scene::{SceneBuild, SceneCommand};

/// A navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Select(usize),
}

/// Identifies one preload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub index: usize,
    pub url: String,
}

/// Side effects for the host to apply, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Leave Drawing mode and erase all strokes.
    ExitAnnotation,
    /// Make the cross-fade overlay opaque.
    FadeOut,
    /// Make the cross-fade overlay transparent.
    FadeIn,
    /// After `delay_ms`, fetch the image and report its natural dimensions.
    Preload { ticket: LoadTicket, delay_ms: u32 },
    /// Destroy the current scene and construct this one.
    BuildScene(SceneBuild),
    ShowBadge(&'static str),
    /// Highlight the active thumbnail.
    ActiveIndex(usize),
    /// Fetch a URL so the browser cache is warm for the next switch.
    WarmCache(String),
    ScheduleTimer { token: TimerToken, delay_ms: u32 },
    CancelTimers,
    ShowIdleCue,
    HideIdleCue,
    Scene(SceneCommand),
    /// Nothing to show; display the empty-state message.
    ReportEmpty,
}

#[derive(Debug, Clone)]
pub struct ViewerSession {
    playback: PlaybackConfig,
    images: Vec<ImageEntry>,
    origin: Option<ListingOrigin>,
    current: usize,
    generation: u64,
    scene: Option<ViewerSceneConfig>,
    annotating: bool,
    idle: IdlePlaybackController,
}

impl ViewerSession {
    #[must_use]
    pub fn new(playback: PlaybackConfig) -> Self {
        Self {
            playback,
            images: Vec::new(),
            origin: None,
            current: 0,
            generation: 0,
            scene: None,
            annotating: false,
            idle: IdlePlaybackController::new(playback),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    #[must_use]
    pub fn origin(&self) -> Option<ListingOrigin> {
        self.origin
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_image(&self) -> Option<&ImageEntry> {
        self.images.get(self.current)
    }

    /// Configuration of the scene built for the current generation.
    #[must_use]
    pub fn scene_config(&self) -> Option<&ViewerSceneConfig> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_annotating(&self) -> bool {
        self.annotating
    }

    #[must_use]
    pub fn idle(&self) -> &IdlePlaybackController {
        &self.idle
    }

    // --- Inputs ---

    /// Replace the image list and show the first image.
    pub fn load(&mut self, resolution: Resolution) -> Vec<SessionEffect> {
        self.images = resolution.entries;
        self.origin = Some(resolution.origin);
        self.scene = None;
        if self.images.is_empty() {
            return vec![SessionEffect::ReportEmpty];
        }
        self.show(0)
    }

    /// Move to another image.
    ///
    /// # Errors
    ///
    /// Returns `Precondition` if the list is empty or a selected index is out
    /// of range.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<Vec<SessionEffect>, GalleryError> {
        let len = self.images.len();
        if len == 0 {
            return Err(GalleryError::Precondition("no images to navigate".into()));
        }
        let target = match navigation {
            Navigation::Next => (self.current + 1) % len,
            Navigation::Previous => (self.current + len - 1) % len,
            Navigation::Select(index) if index < len => index,
            Navigation::Select(index) => {
                return Err(GalleryError::Precondition(format!("image index {index} out of range 0..{len}")));
            }
        };
        Ok(self.show(target))
    }

    /// A preload finished with the image's natural dimensions or an error.
    pub fn complete_preload(
        &mut self,
        ticket: &LoadTicket,
        dimensions: Result<(u32, u32), GalleryError>,
    ) -> Vec<SessionEffect> {
        if ticket.generation != self.generation {
            tracing::debug!(
                index = ticket.index,
                stale = ticket.generation,
                current = self.generation,
                "discarding stale preload"
            );
            return Vec::new();
        }

        let planned = dimensions
            .and_then(|(width, height)| projection::aspect_ratio(width, height))
            .and_then(projection::plan);
        match planned {
            Ok(config) => {
                self.scene = Some(config);
                vec![
                    SessionEffect::BuildScene(SceneBuild {
                        generation: ticket.generation,
                        index: ticket.index,
                        image_url: ticket.url.clone(),
                        config,
                    }),
                    SessionEffect::ShowBadge(config.badge_label()),
                ]
            }
            Err(e) => {
                tracing::warn!(url = %ticket.url, error = %e, "preload failed; keeping previous scene");
                vec![SessionEffect::FadeIn]
            }
        }
    }

    /// The scene for `generation` finished its initial load.
    pub fn scene_loaded(&mut self, generation: u64) -> Vec<SessionEffect> {
        if generation != self.generation {
            return Vec::new();
        }
        let mut effects = vec![SessionEffect::FadeIn];
        if self.images.len() > 1 {
            let next = (self.current + 1) % self.images.len();
            effects.push(SessionEffect::WarmCache(self.images[next].source_url.clone()));
        }
        effects
    }

    /// The engine could not construct the scene for `generation`.
    pub fn scene_failed(&mut self, generation: u64, reason: &str) -> Vec<SessionEffect> {
        if generation != self.generation {
            return Vec::new();
        }
        tracing::warn!(generation, reason, "scene construction failed");
        self.scene = None;
        vec![SessionEffect::FadeIn]
    }

    /// Pointer or touch activity on the viewer surface.
    pub fn interaction(&mut self) -> Vec<SessionEffect> {
        lift(self.idle.restart())
    }

    /// An idle timer elapsed.
    pub fn on_timer(&mut self, token: TimerToken) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        for effect in self.idle.on_timer(token) {
            if effect == IdleEffect::Advance {
                match self.navigate(Navigation::Next) {
                    Ok(next) => effects.extend(next),
                    Err(e) => tracing::warn!(error = %e, "idle advance skipped"),
                }
            } else {
                effects.extend(lift(vec![effect]));
            }
        }
        effects
    }

    /// The annotation canvas entered or left Drawing mode.
    pub fn set_annotating(&mut self, active: bool) -> Vec<SessionEffect> {
        if active == self.annotating {
            return Vec::new();
        }
        self.annotating = active;
        if active {
            let mut effects = lift(self.idle.suspend());
            effects.push(SessionEffect::Scene(SceneCommand::StopAutoRotate));
            effects
        } else {
            lift(self.idle.resume())
        }
    }

    fn show(&mut self, index: usize) -> Vec<SessionEffect> {
        self.generation += 1;
        self.current = index;
        let url = self.images[index].source_url.clone();

        let mut effects = vec![SessionEffect::ExitAnnotation, SessionEffect::ActiveIndex(index), SessionEffect::FadeOut];
        let idle = if self.annotating {
            self.annotating = false;
            self.idle.resume()
        } else {
            self.idle.restart()
        };
        effects.extend(lift(idle));
        effects.push(SessionEffect::Preload {
            ticket: LoadTicket { generation: self.generation, index, url },
            delay_ms: self.playback.fade_delay_ms,
        });
        effects
    }
}

fn lift(effects: Vec<IdleEffect>) -> Vec<SessionEffect> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            IdleEffect::Schedule { token, delay_ms } => Some(SessionEffect::ScheduleTimer { token, delay_ms }),
            IdleEffect::CancelTimers => Some(SessionEffect::CancelTimers),
            IdleEffect::ShowIdleCue => Some(SessionEffect::ShowIdleCue),
            IdleEffect::HideIdleCue => Some(SessionEffect::HideIdleCue),
            IdleEffect::Scene(command) => Some(SessionEffect::Scene(command)),
            IdleEffect::Advance => None,
        })
        .collect()
}
