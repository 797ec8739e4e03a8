//! Rendering-engine contract.
//!
//! The panorama engine is a black box: it is created from a typed
//! configuration, accepts a handful of orientation commands, and is torn down
//! on every image switch. [`SceneSlot`] owns the single live instance so the
//! previous scene is always destroyed before the next is created.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;

use crate::projection::ViewerSceneConfig;

/// Everything needed to construct one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBuild {
    /// Load generation this scene belongs to.
    pub generation: u64,
    pub index: usize,
    pub image_url: String,
    pub config: ViewerSceneConfig,
}

impl SceneBuild {
    /// Options in the engine's native key names.
    #[must_use]
    pub fn renderer_options(&self) -> RendererOptions {
        let config = &self.config;
        RendererOptions {
            kind: "equirectangular",
            panorama: self.image_url.clone(),
            auto_load: true,
            show_controls: false,
            cross_origin: "anonymous",
            haov: config.horizontal_aov,
            vaov: config.vertical_aov,
            v_offset: 0.0,
            hfov: config.field_of_view,
            min_hfov: config.min_field_of_view,
            max_hfov: config.max_field_of_view,
            min_yaw: config.yaw_bounds.map(|b| b.min),
            max_yaw: config.yaw_bounds.map(|b| b.max),
            min_pitch: config.pitch_bounds.map(|b| b.min),
            max_pitch: config.pitch_bounds.map(|b| b.max),
        }
    }
}

/// Serialized form handed to the engine constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RendererOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub panorama: String,
    pub auto_load: bool,
    pub show_controls: bool,
    pub cross_origin: &'static str,
    pub haov: f64,
    pub vaov: f64,
    pub v_offset: f64,
    pub hfov: f64,
    pub min_hfov: f64,
    pub max_hfov: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_yaw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_yaw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pitch: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pitch: Option<f64>,
}

/// Orientation commands issued to a live scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// Zoom to the instance's maximum field of view.
    ZoomOutFully { transition_ms: u32 },
    SetPitch { degrees: f64, transition_ms: u32 },
    StartAutoRotate { speed: f64 },
    StopAutoRotate,
}

/// A live panorama instance.
pub trait PanoramaInstance {
    fn destroy(self);
    fn set_field_of_view(&mut self, degrees: f64, transition_ms: u32);
    fn set_pitch(&mut self, degrees: f64, transition_ms: u32);
    fn start_auto_rotate(&mut self, speed: f64);
    fn stop_auto_rotate(&mut self);
    /// `(min, max)` zoom bounds in degrees.
    fn field_of_view_bounds(&self) -> (f64, f64);
}

/// Creates panorama instances inside the host container.
pub trait PanoramaEngine {
    type Instance: PanoramaInstance;
    type Error: std::fmt::Display;

    /// # Errors
    ///
    /// Returns the engine's error if construction fails.
    fn create(&self, build: &SceneBuild) -> Result<Self::Instance, Self::Error>;
}

/// Holds at most one live instance.
pub struct SceneSlot<E: PanoramaEngine> {
    engine: E,
    live: Option<(u64, E::Instance)>,
}

impl<E: PanoramaEngine> SceneSlot<E> {
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self { engine, live: None }
    }

    /// Generation of the live scene, if any.
    #[must_use]
    pub fn live_generation(&self) -> Option<u64> {
        self.live.as_ref().map(|(generation, _)| *generation)
    }

    /// Destroy the current instance and construct a new one.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the slot is left empty in that case.
    pub fn rebuild(&mut self, build: &SceneBuild) -> Result<(), E::Error> {
        self.teardown();
        let instance = self.engine.create(build)?;
        self.live = Some((build.generation, instance));
        Ok(())
    }

    pub fn teardown(&mut self) {
        if let Some((_, instance)) = self.live.take() {
            instance.destroy();
        }
    }

    /// Apply a command to the live instance. No-op when empty.
    pub fn apply(&mut self, command: SceneCommand) {
        let Some((_, instance)) = self.live.as_mut() else {
            return;
        };
        match command {
            SceneCommand::ZoomOutFully { transition_ms } => {
                let (_, max) = instance.field_of_view_bounds();
                instance.set_field_of_view(max, transition_ms);
            }
            SceneCommand::SetPitch { degrees, transition_ms } => instance.set_pitch(degrees, transition_ms),
            SceneCommand::StartAutoRotate { speed } => instance.start_auto_rotate(speed),
            SceneCommand::StopAutoRotate => instance.stop_auto_rotate(),
        }
    }
}
