//! Geometry kernel: point math, rotation, bounds, and per-kind shape tests.
//!
//! Every function here is pure. Shape tests first inverse-rotate the query
//! point into the shape's unrotated local frame around [`Shape::center`] and
//! then apply the axis-aligned test for that kind, so no rotated-ellipse or
//! rotated-rhombus formula is needed.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SEGMENT_LEN_SQ;
use crate::doc::{Shape, ShapeKind};

/// A point (or displacement) in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotate this point around `center` by `angle` radians.
    #[must_use]
    pub fn rotate_around(self, center: Self, angle: f64) -> Self {
        if angle.abs() < f64::EPSILON {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        let d = self - center;
        Self {
            x: center.x + d.x * cos - d.y * sin,
            y: center.y + d.x * sin + d.y * cos,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Canonical axis-aligned box with `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Box spanning two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Zero-size box at `p`.
    #[must_use]
    pub fn point(p: Point) -> Self {
        Self::from_corners(p, p)
    }

    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::point(*first), |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) * 0.5, (self.min_y + self.max_y) * 0.5)
    }

    /// Corners in clockwise order starting at the top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x, self.min_y),
            Point::new(self.max_x, self.min_y),
            Point::new(self.max_x, self.max_y),
            Point::new(self.min_x, self.max_y),
        ]
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Inclusive overlap; boxes that only touch count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x <= other.max_x && other.min_x <= self.max_x && self.min_y <= other.max_y && other.min_y <= self.max_y
    }

    /// Euclidean distance from `p` to the box; zero inside or on the border.
    #[must_use]
    pub fn distance_to(&self, p: Point) -> f64 {
        let dx = (self.min_x - p.x).max(p.x - self.max_x).max(0.0);
        let dy = (self.min_y - p.y).max(p.y - self.max_y).max(0.0);
        dx.hypot(dy)
    }
}

/// How a shape relates to a rubber-band region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOverlap {
    /// The shape's rotated bounding box misses the region.
    None,
    /// The rotated bounding box overlaps the region but sticks out of it.
    Partial,
    /// Every rotated corner lies inside the region.
    Full,
}

/// Distance from `p` to the segment `a`–`b`, clamped to the endpoints.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < MIN_SEGMENT_LEN_SQ {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + ab.x * t, a.y + ab.y * t))
}

/// Distance from `p` to the nearest segment of an open polyline.
///
/// A single vertex degenerates to point distance; an empty polyline is
/// infinitely far away.
#[must_use]
pub fn distance_to_polyline(p: Point, vertices: &[Point]) -> f64 {
    match vertices {
        [] => f64::INFINITY,
        [only] => p.distance(*only),
        _ => vertices
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Corners of the shape's unrotated box, rotated into world space.
#[must_use]
pub fn rotated_corners(shape: &Shape) -> [Point; 4] {
    let bounds = shape.normalized_bounds();
    let center = bounds.center();
    bounds.corners().map(|c| c.rotate_around(center, shape.rotation))
}

/// Axis-aligned box enclosing the shape after rotation.
#[must_use]
pub fn axis_aligned_bounds(shape: &Shape) -> Bounds {
    let corners = rotated_corners(shape);
    Bounds::from_points(&corners).unwrap_or_else(|| Bounds::point(shape.origin()))
}

/// Exact point-in-shape test with a tolerance band of `tolerance` world units.
///
/// Selection markers never match.
#[must_use]
pub fn contains_point(shape: &Shape, point: Point, tolerance: f64) -> bool {
    let bounds = shape.normalized_bounds();
    let center = bounds.center();
    let local = point.rotate_around(center, -shape.rotation);

    match shape.kind {
        ShapeKind::Rectangle => bounds.distance_to(local) <= tolerance,
        ShapeKind::Diamond => diamond_contains(&bounds, local, tolerance),
        ShapeKind::Ellipse => ellipse_contains(&bounds, local, tolerance),
        ShapeKind::Line | ShapeKind::Arrow | ShapeKind::Freehand => {
            distance_to_polyline(local, &shape.polyline()) <= tolerance
        }
        ShapeKind::Selection => false,
    }
}

/// Rhombus with vertices at the edge midpoints of `bounds`.
///
/// With half-extents `a`, `b` and local offsets `dx`, `dy`, the four edge
/// half-planes fold into `b|dx| + a|dy| <= ab`. Offsetting each edge outward
/// by `tolerance` adds `tolerance * |(a, b)|` to the right-hand side. The
/// band is also capped at `tolerance` from the box, which trims the miter
/// spikes at the vertices and keeps a zero-width diamond a plain segment.
fn diamond_contains(bounds: &Bounds, local: Point, tolerance: f64) -> bool {
    let center = bounds.center();
    let a = bounds.width() * 0.5;
    let b = bounds.height() * 0.5;
    let dx = (local.x - center.x).abs();
    let dy = (local.y - center.y).abs();
    b * dx + a * dy <= a * b + tolerance * a.hypot(b) && bounds.distance_to(local) <= tolerance
}

/// Ellipse inscribed in `bounds`, radii grown by `tolerance`.
fn ellipse_contains(bounds: &Bounds, local: Point, tolerance: f64) -> bool {
    let center = bounds.center();
    let rx = bounds.width() * 0.5 + tolerance;
    let ry = bounds.height() * 0.5 + tolerance;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = (local.x - center.x) / rx;
    let ny = (local.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Classify the shape's rotated bounding box against `region`.
///
/// Region selection uses the bounding box for every kind, not the exact
/// outline.
#[must_use]
pub fn intersects_region(shape: &Shape, region: &Bounds) -> RegionOverlap {
    let corners = rotated_corners(shape);
    if corners.iter().all(|c| region.contains(*c)) {
        return RegionOverlap::Full;
    }
    let aabb = Bounds::from_points(&corners).unwrap_or_else(|| Bounds::point(shape.origin()));
    if aabb.overlaps(region) {
        RegionOverlap::Partial
    } else {
        RegionOverlap::None
    }
}
