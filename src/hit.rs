//! Hit-test resolver: topmost shape under a point, shapes inside a region.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::doc::{SceneStore, ShapeId};
use crate::geom::{self, Bounds, Point, RegionOverlap};

/// Which region overlaps count as "selected" during a rubber-band drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionPolicy {
    /// Only shapes whose rotated bounding box lies entirely inside the region.
    #[default]
    Full,
    /// Any shape whose rotated bounding box touches the region.
    Partial,
}

impl RegionPolicy {
    /// Whether an overlap classification satisfies this policy.
    #[must_use]
    pub fn accepts(self, overlap: RegionOverlap) -> bool {
        match self {
            Self::Full => overlap == RegionOverlap::Full,
            Self::Partial => overlap != RegionOverlap::None,
        }
    }
}

/// Topmost shape whose outline contains `point`, walking the scene from the
/// top of the z-order down. `tolerance` is in world units.
#[must_use]
pub fn pick_topmost(scene: &SceneStore, point: Point, tolerance: f64) -> Option<ShapeId> {
    scene
        .iter()
        .rev()
        .find(|shape| geom::contains_point(shape, point, tolerance))
        .map(|shape| shape.id)
}

/// Every shape whose relation to `region` satisfies `policy`.
#[must_use]
pub fn pick_region(scene: &SceneStore, region: &Bounds, policy: RegionPolicy) -> HashSet<ShapeId> {
    scene
        .iter()
        .filter(|shape| policy.accepts(geom::intersects_region(shape, region)))
        .map(|shape| shape.id)
        .collect()
}
