//! Shared numeric constants for the sketchboard crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Default width of the tolerance band around shape outlines, in pixels.
pub const HIT_TOLERANCE_PX: f64 = 10.0;

/// Width/height magnitude below which a freshly drawn box shape counts as a
/// stray click and is discarded on release.
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// Segments shorter than this are treated as a single point.
pub const MIN_SEGMENT_LEN_SQ: f64 = 1e-12;

// ── Camera ──────────────────────────────────────────────────────

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 10.0;
