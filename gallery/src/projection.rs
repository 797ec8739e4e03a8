//! Projection detection: classifies an image by aspect ratio and derives the
//! full viewer configuration.
//!
//! DESIGN
//! ======
//! Two terminal outcomes. A ratio within `[1.9, 2.1]` is an equirectangular
//! full sphere with free look direction. Anything else is a partial panorama
//! assumed to span a 60° vertical frame; its horizontal extent follows from
//! the ratio and both axes are clamped so the view never leaves the image.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

pub const FULL_SPHERE_MIN_RATIO: f64 = 1.9;
pub const FULL_SPHERE_MAX_RATIO: f64 = 2.1;

pub const MAX_HORIZONTAL_AOV_DEG: f64 = 360.0;
pub const MAX_VERTICAL_AOV_DEG: f64 = 180.0;

/// Vertical angle of view assumed for a handheld partial panorama.
pub const PARTIAL_VERTICAL_AOV_DEG: f64 = 60.0;
pub const PARTIAL_MIN_FOV_DEG: f64 = 30.0;
/// Added to the vertical angle of view to get the partial zoom-out limit.
pub const PARTIAL_FOV_HEADROOM_DEG: f64 = 20.0;

pub const SPHERE_FOV_DEG: f64 = 100.0;
pub const SPHERE_MIN_FOV_DEG: f64 = 30.0;
pub const SPHERE_MAX_FOV_DEG: f64 = 120.0;

/// How the image maps onto the viewing sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionKind {
    FullSphere,
    PartialPanorama,
}

impl ProjectionKind {
    /// Badge shown next to the active image.
    #[must_use]
    pub fn badge_label(self) -> &'static str {
        match self {
            Self::FullSphere => "360° Sphere",
            Self::PartialPanorama => "Panorama",
        }
    }
}

/// A symmetric clamp around zero, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleBounds {
    pub min: f64,
    pub max: f64,
}

impl AngleBounds {
    #[must_use]
    pub fn symmetric(half_width: f64) -> Self {
        Self { min: -half_width, max: half_width }
    }
}

/// Typed configuration for one scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewerSceneConfig {
    pub projection_kind: ProjectionKind,
    pub horizontal_aov: f64,
    pub vertical_aov: f64,
    pub field_of_view: f64,
    pub min_field_of_view: f64,
    pub max_field_of_view: f64,
    /// Absent means unrestricted.
    pub yaw_bounds: Option<AngleBounds>,
    /// Absent means unrestricted.
    pub pitch_bounds: Option<AngleBounds>,
}

impl ViewerSceneConfig {
    #[must_use]
    pub fn badge_label(&self) -> &'static str {
        self.projection_kind.badge_label()
    }
}

/// Width over height.
///
/// # Errors
///
/// Returns `Precondition` if either dimension is zero.
pub fn aspect_ratio(width: u32, height: u32) -> Result<f64, GalleryError> {
    if width == 0 || height == 0 {
        return Err(GalleryError::Precondition(format!("image dimensions {width}x{height} are degenerate")));
    }
    Ok(f64::from(width) / f64::from(height))
}

/// Classify an aspect ratio and derive the scene configuration.
///
/// # Errors
///
/// Returns `Precondition` for a ratio that is not a positive finite number.
pub fn plan(aspect_ratio: f64) -> Result<ViewerSceneConfig, GalleryError> {
    if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return Err(GalleryError::Precondition(format!("aspect ratio must be positive, got {aspect_ratio}")));
    }

    if (FULL_SPHERE_MIN_RATIO..=FULL_SPHERE_MAX_RATIO).contains(&aspect_ratio) {
        return Ok(ViewerSceneConfig {
            projection_kind: ProjectionKind::FullSphere,
            horizontal_aov: MAX_HORIZONTAL_AOV_DEG,
            vertical_aov: MAX_VERTICAL_AOV_DEG,
            field_of_view: SPHERE_FOV_DEG,
            min_field_of_view: SPHERE_MIN_FOV_DEG,
            max_field_of_view: SPHERE_MAX_FOV_DEG,
            yaw_bounds: None,
            pitch_bounds: None,
        });
    }

    let vertical_aov = PARTIAL_VERTICAL_AOV_DEG;
    let horizontal_aov = (vertical_aov * aspect_ratio).min(MAX_HORIZONTAL_AOV_DEG);
    // A wrap-around image has no edge to clamp against.
    let yaw_bounds = (horizontal_aov < MAX_HORIZONTAL_AOV_DEG).then(|| AngleBounds::symmetric(horizontal_aov / 2.0));

    Ok(ViewerSceneConfig {
        projection_kind: ProjectionKind::PartialPanorama,
        horizontal_aov,
        vertical_aov,
        field_of_view: vertical_aov,
        min_field_of_view: PARTIAL_MIN_FOV_DEG,
        max_field_of_view: vertical_aov + PARTIAL_FOV_HEADROOM_DEG,
        yaw_bounds,
        pitch_bounds: Some(AngleBounds::symmetric(vertical_aov / 2.0)),
    })
}
