#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Camera defaults
// =============================================================

#[test]
fn default_zoom_is_one() {
    assert_eq!(Camera::default().zoom, 1.0);
}

#[test]
fn identity_zoom_preserves_distance() {
    let cam = Camera::default();
    assert_eq!(cam.screen_dist_to_world(10.0), 10.0);
}

// =============================================================
// with_zoom
// =============================================================

#[test]
fn zoom_in_shrinks_world_distance() {
    let cam = Camera::with_zoom(2.0);
    assert_eq!(cam.screen_dist_to_world(10.0), 5.0);
}

#[test]
fn zoom_out_grows_world_distance() {
    let cam = Camera::with_zoom(0.5);
    assert_eq!(cam.screen_dist_to_world(10.0), 20.0);
}

#[test]
fn zoom_clamps_to_limits() {
    assert_eq!(Camera::with_zoom(100.0).zoom, MAX_ZOOM);
    assert_eq!(Camera::with_zoom(0.0).zoom, MIN_ZOOM);
    assert_eq!(Camera::with_zoom(-3.0).zoom, MIN_ZOOM);
}

#[test]
fn non_finite_zoom_falls_back_to_identity() {
    assert_eq!(Camera::with_zoom(f64::NAN).zoom, 1.0);
    assert_eq!(Camera::with_zoom(f64::INFINITY).zoom, 1.0);
}
