//! Document model: shapes, their kinds, and the ordered scene store.
//!
//! This module defines what is on the canvas (`Shape`, `ShapeKind`) and the
//! runtime store that owns every persisted shape together with the current
//! selection set (`SceneStore`). The store's sequence order is z-order: later
//! shapes render on top and win hit tests.
//!
//! The ephemeral rubber-band marker is a `Shape` of kind
//! [`ShapeKind::Selection`] but is never admitted into the store; the gesture
//! state machine holds it on the side while a region drag is active.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::geom::{Bounds, Point};

/// Unique identifier for a shape. Never reused, even after removal.
pub type ShapeId = Uuid;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangle filling the bounding box.
    Rectangle,
    /// Rhombus with vertices at the bounding-box edge midpoints.
    Diamond,
    /// Ellipse inscribed in the bounding box.
    Ellipse,
    /// Open polyline starting at the origin.
    Line,
    /// Polyline with an arrowhead at its last point.
    Arrow,
    /// Densely sampled freehand stroke.
    Freehand,
    /// Ephemeral rubber-band region. Never persisted.
    Selection,
}

impl ShapeKind {
    /// Whether shapes of this kind may live in the scene store.
    #[must_use]
    pub fn is_persistable(self) -> bool {
        !matches!(self, Self::Selection)
    }

    /// Whether the geometry of this kind is a polyline (origin + points)
    /// rather than a filled box.
    #[must_use]
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Line | Self::Arrow | Self::Freehand)
    }
}

/// A drawable entity.
///
/// `width` and `height` are signed: a negative value means the shape grew
/// leftward/upward from its origin. Consumers needing a canonical box use
/// [`Shape::normalized_bounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Unique identifier, assigned at creation.
    pub id: ShapeId,
    /// Geometry variant.
    pub kind: ShapeKind,
    /// Origin x in logical canvas coordinates.
    pub x: f64,
    /// Origin y in logical canvas coordinates.
    pub y: f64,
    /// Signed horizontal extent from the origin.
    pub width: f64,
    /// Signed vertical extent from the origin.
    pub height: f64,
    /// Rotation in radians around [`Shape::center`].
    pub rotation: f64,
    /// Polyline points relative to the origin (linear kinds only). The origin
    /// itself is the implicit first vertex.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    /// Opaque style attributes (stroke, fill, opacity, ...). Not interpreted here.
    #[serde(default)]
    pub style: serde_json::Value,
}

impl Shape {
    /// Create a zero-size shape of `kind` at `origin` with a fresh identifier.
    ///
    /// Line and arrow shapes start with a single terminal point sitting on the
    /// origin; freehand paths start with no samples.
    #[must_use]
    pub fn new(kind: ShapeKind, origin: Point) -> Self {
        let points = match kind {
            ShapeKind::Line | ShapeKind::Arrow => vec![Point::new(0.0, 0.0)],
            _ => Vec::new(),
        };
        Self {
            id: Uuid::new_v4(),
            kind,
            x: origin.x,
            y: origin.y,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            points,
            style: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    /// Origin point.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Absolute polyline vertices, origin first.
    #[must_use]
    pub fn polyline(&self) -> Vec<Point> {
        let origin = self.origin();
        std::iter::once(origin)
            .chain(self.points.iter().map(|p| origin + *p))
            .collect()
    }

    /// Canonical non-negative box of the unrotated geometry.
    ///
    /// Box kinds derive it from the signed width/height; linear kinds from
    /// the extent of their polyline.
    #[must_use]
    pub fn normalized_bounds(&self) -> Bounds {
        if self.kind.is_linear() {
            return Bounds::from_points(&self.polyline()).unwrap_or_else(|| Bounds::point(self.origin()));
        }
        Bounds::from_corners(self.origin(), Point::new(self.x + self.width, self.y + self.height))
    }

    /// Rotation pivot: the center of [`Shape::normalized_bounds`].
    #[must_use]
    pub fn center(&self) -> Point {
        self.normalized_bounds().center()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("shape kind {0:?} is not valid here")]
    InvalidShapeKind(ShapeKind),
    #[error("selection references unknown shape: {0}")]
    UnknownSelectionId(ShapeId),
    #[error("shape id already issued: {0}")]
    DuplicateId(ShapeId),
}

impl SceneError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidShapeKind(_) => "E_INVALID_SHAPE_KIND",
            Self::UnknownSelectionId(_) => "E_UNKNOWN_SELECTION_ID",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
        }
    }
}

/// Ordered store of persisted shapes plus the current selection set.
///
/// Invariants:
/// - no shape of kind [`ShapeKind::Selection`] is ever stored;
/// - an id, once stored, is never accepted again after removal;
/// - the selection set only names shapes currently stored.
#[derive(Debug, Default)]
pub struct SceneStore {
    shapes: Vec<Shape>,
    selected: HashSet<ShapeId>,
    retired: HashSet<ShapeId>,
    unacknowledged: HashSet<ShapeId>,
}

impl SceneStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Scene ---

    /// Append a shape on top of the z-order.
    ///
    /// # Errors
    ///
    /// `InvalidShapeKind` for a selection marker, `DuplicateId` if the id is
    /// already stored or belonged to a removed shape.
    pub fn append(&mut self, shape: Shape) -> Result<(), SceneError> {
        if !shape.kind.is_persistable() {
            return Err(SceneError::InvalidShapeKind(shape.kind));
        }
        if self.retired.contains(&shape.id) || self.contains(&shape.id) {
            return Err(SceneError::DuplicateId(shape.id));
        }
        self.shapes.push(shape);
        Ok(())
    }

    /// Apply `f` to the most recently appended shape. Returns false when the
    /// store is empty.
    pub fn mutate_last<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut Shape),
    {
        let Some(shape) = self.shapes.last_mut() else {
            return false;
        };
        f(shape);
        true
    }

    /// Apply `f` to the shape with `id`. Returns false if it doesn't exist.
    pub fn mutate<F>(&mut self, id: &ShapeId, f: F) -> bool
    where
        F: FnOnce(&mut Shape),
    {
        let Some(shape) = self.shapes.iter_mut().find(|s| s.id == *id) else {
            return false;
        };
        f(shape);
        true
    }

    /// Remove and return the most recently appended shape.
    pub fn remove_last(&mut self) -> Option<Shape> {
        let shape = self.shapes.pop()?;
        self.retire(shape.id);
        Some(shape)
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == *id)?;
        let shape = self.shapes.remove(idx);
        self.retire(shape.id);
        Some(shape)
    }

    fn retire(&mut self, id: ShapeId) {
        self.retired.insert(id);
        self.unacknowledged.insert(id);
        self.selected.remove(&id);
    }

    /// Shapes in z-order, bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes in z-order as a slice.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == *id)
    }

    /// The topmost shape.
    #[must_use]
    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    /// Whether a shape with `id` is currently stored.
    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.iter().any(|s| s.id == *id)
    }

    /// Whether `id` belonged to a shape that has since been removed.
    #[must_use]
    pub fn was_removed(&self, id: &ShapeId) -> bool {
        self.retired.contains(id)
    }

    /// Mark the removal of `id` as handled. Returns true only the first time
    /// for each removed id.
    pub fn acknowledge_removal(&mut self, id: &ShapeId) -> bool {
        self.unacknowledged.remove(id)
    }

    /// Number of stored shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    // --- Selection ---

    /// Replace the selection set with `ids`.
    ///
    /// # Errors
    ///
    /// `UnknownSelectionId` if any id is not stored; the selection is left
    /// unchanged in that case.
    pub fn select(&mut self, ids: HashSet<ShapeId>) -> Result<(), SceneError> {
        if let Some(missing) = ids.iter().find(|id| !self.contains(id)) {
            return Err(SceneError::UnknownSelectionId(*missing));
        }
        self.selected = ids;
        Ok(())
    }

    /// Add one id to the selection set.
    ///
    /// # Errors
    ///
    /// `UnknownSelectionId` if the id is not stored.
    pub fn add_to_selection(&mut self, id: ShapeId) -> Result<(), SceneError> {
        if !self.contains(&id) {
            return Err(SceneError::UnknownSelectionId(id));
        }
        self.selected.insert(id);
        Ok(())
    }

    /// Remove one id from the selection set. Returns whether it was selected.
    pub fn deselect(&mut self, id: &ShapeId) -> bool {
        self.selected.remove(id)
    }

    /// Empty the selection set. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    /// The current selection set.
    #[must_use]
    pub fn selected(&self) -> &HashSet<ShapeId> {
        &self.selected
    }

    /// Whether `id` is in the selection set.
    #[must_use]
    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected.contains(id)
    }

    /// Drop selection entries that no longer reference a stored shape.
    /// Returns the pruned ids.
    pub fn prune_selection(&mut self) -> Vec<ShapeId> {
        let stale: Vec<ShapeId> = self
            .selected
            .iter()
            .filter(|id| !self.shapes.iter().any(|s| s.id == **id))
            .copied()
            .collect();
        for id in &stale {
            let err = SceneError::UnknownSelectionId(*id);
            warn!(%id, code = err.error_code(), "pruned stale selection id");
            self.selected.remove(id);
        }
        stale
    }
}
