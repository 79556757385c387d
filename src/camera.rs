#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// View zoom applied by the host.
///
/// Pointer coordinates reach the core already in logical canvas space, so the
/// only thing the core needs from the view is the scale factor used to turn a
/// screen-space distance (the hit tolerance band) into world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Scale factor (1.0 = no zoom).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl Camera {
    /// Camera at the given zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Non-finite input falls back to 1.0.
    #[must_use]
    pub fn with_zoom(zoom: f64) -> Self {
        if !zoom.is_finite() {
            return Self::default();
        }
        Self { zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM) }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
