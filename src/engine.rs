//! Gesture state machine.
//!
//! `EngineCore` is the single owner of the scene store, the selection set, the
//! active tool, and the in-flight gesture. Every input handler runs to
//! completion and returns the [`Action`]s the host should process. A handler
//! that changes anything observable returns exactly one
//! [`Action::RenderNeeded`], always last; a handler that changes nothing
//! returns an empty list. Out-of-order events (a move or release while idle,
//! a second press mid-gesture) are ignored.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::camera::Camera;
use crate::config::{EngineConfig, ToleranceSpace};
use crate::doc::{SceneStore, Shape, ShapeId, ShapeKind};
use crate::geom::Point;
use crate::hit;
use crate::input::{InputState, Key, Modifiers, Tool};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A newly drawn shape was kept on release.
    ShapeCommitted(ShapeId),
    /// A newly drawn shape was too small and has been removed.
    ShapeDiscarded(ShapeId),
    /// A drag finished with these shapes at new positions.
    ShapesMoved(Vec<ShapeId>),
    /// Scene, selection, marker, tool, or zoom changed; the host should redraw.
    RenderNeeded,
}

/// Core engine state. Owns everything the gesture handlers mutate.
#[derive(Debug, Default)]
pub struct EngineCore {
    pub scene: SceneStore,
    pub camera: Camera,
    pub tool: Tool,
    pub input: InputState,
    pub config: EngineConfig,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config, ..Self::default() }
    }

    // --- Tool / view ---

    /// Set the active tool. It is read at the next pointer-down.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        if self.tool == tool {
            return Vec::new();
        }
        self.tool = tool;
        vec![Action::RenderNeeded]
    }

    /// Set the view zoom (clamped). Affects the world-space hit tolerance.
    pub fn set_zoom(&mut self, zoom: f64) -> Vec<Action> {
        let camera = Camera::with_zoom(zoom);
        if camera == self.camera {
            return Vec::new();
        }
        self.camera = camera;
        vec![Action::RenderNeeded]
    }

    /// Hit tolerance in world units for the current zoom.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        match self.config.tolerance_space {
            ToleranceSpace::Screen => self.camera.screen_dist_to_world(self.config.hit_tolerance_px),
            ToleranceSpace::World => self.config.hit_tolerance_px,
        }
    }

    // --- Pointer events ---

    /// Begin a gesture at `pt` according to the active tool and what lies
    /// under the pointer.
    pub fn on_pointer_down(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!(state = ?self.input, "pointer-down ignored during active gesture");
            return Vec::new();
        }
        if let Some(kind) = self.tool.shape_kind() {
            return self.begin_drawing(kind, pt);
        }
        match hit::pick_topmost(&self.scene, pt, self.tolerance()) {
            Some(id) => self.begin_drag(id, pt, modifiers),
            None => self.begin_region(pt, modifiers),
        }
    }

    /// Advance the active gesture to `pt`.
    pub fn on_pointer_move(&mut self, pt: Point) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::DrawingNewShape { id, .. } => {
                let id = *id;
                if self.scene.last().is_none_or(|s| s.id != id) {
                    warn!(%id, "shape being drawn is gone; dropping gesture");
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                self.scene.mutate_last(|shape| extend_to(shape, pt));
                vec![Action::RenderNeeded]
            }
            InputState::DraggingSelectionRegion { marker, base } => {
                marker.width = pt.x - marker.x;
                marker.height = pt.y - marker.y;
                let region = marker.normalized_bounds();
                let mut picked = hit::pick_region(&self.scene, &region, self.config.region_policy);
                picked.extend(base.iter().filter(|id| self.scene.contains(id)).copied());
                debug!(count = picked.len(), "region selection updated");
                if let Err(e) = self.scene.select(picked) {
                    warn!(error = %e, code = e.error_code(), "region selection rejected");
                }
                vec![Action::RenderNeeded]
            }
            InputState::DraggingSelectedShapes { anchor, originals } => {
                let delta = pt - *anchor;
                for (id, orig) in originals.iter() {
                    self.scene.mutate(id, |shape| {
                        shape.x = orig.x + delta.x;
                        shape.y = orig.y + delta.y;
                    });
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Finish the active gesture.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::DrawingNewShape { id, kind } => self.finish_drawing(id, kind),
            InputState::DraggingSelectionRegion { .. } => {
                debug!(count = self.scene.selected().len(), "region selection finished");
                vec![Action::RenderNeeded]
            }
            InputState::DraggingSelectedShapes { originals, .. } => {
                let moved: Vec<ShapeId> = originals
                    .iter()
                    .filter(|(id, orig)| self.scene.get(id).is_some_and(|s| s.origin() != *orig))
                    .map(|(id, _)| *id)
                    .collect();
                let mut actions = Vec::new();
                if !moved.is_empty() {
                    debug!(count = moved.len(), "drag committed");
                    actions.push(Action::ShapesMoved(moved));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    // --- Keyboard ---

    /// Handle a key press.
    ///
    /// - `Escape` mid-gesture finishes the gesture exactly as pointer-up would.
    /// - `Escape` while idle clears the selection and returns to the selection tool.
    /// - `Ctrl`/`Meta` + `a` while idle selects every shape.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_escape() {
            if !self.input.is_idle() {
                return self.on_pointer_up();
            }
            let cleared = self.scene.clear_selection();
            let tool_reset = self.tool != Tool::Selection;
            self.tool = Tool::Selection;
            return render_if(cleared || tool_reset);
        }
        if (modifiers.ctrl || modifiers.meta) && key.0.eq_ignore_ascii_case("a") && self.input.is_idle() {
            return self.select_all();
        }
        Vec::new()
    }

    // --- Collaborator hooks ---

    /// Remove a shape on behalf of an external command (e.g. delete) and keep
    /// the selection and any in-flight gesture consistent.
    pub fn remove_shape(&mut self, id: &ShapeId) -> Vec<Action> {
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        self.scene.acknowledge_removal(id);
        self.forget(id);
        vec![Action::RenderNeeded]
    }

    /// Notification that a collaborator already removed `id` from the scene
    /// store. Prunes it from the selection and from any in-flight gesture.
    /// The first notice for a removed id yields a render request; repeats
    /// and ids the store never held yield none.
    pub fn on_shape_removed(&mut self, id: &ShapeId) -> Vec<Action> {
        if self.scene.contains(id) {
            warn!(%id, "removal notice for a shape that is still present");
            return Vec::new();
        }
        let fresh = self.scene.acknowledge_removal(id);
        let changed = self.forget(id);
        render_if(changed || fresh)
    }

    // --- Queries ---

    /// The current selection set.
    #[must_use]
    pub fn selection(&self) -> &HashSet<ShapeId> {
        self.scene.selected()
    }

    /// The in-progress rubber-band marker, if a region drag is active.
    #[must_use]
    pub fn selection_marker(&self) -> Option<&Shape> {
        match &self.input {
            InputState::DraggingSelectionRegion { marker, .. } => Some(marker),
            _ => None,
        }
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.scene.get(id)
    }

    // --- Gesture starts ---

    fn begin_drawing(&mut self, kind: ShapeKind, pt: Point) -> Vec<Action> {
        let shape = Shape::new(kind, pt);
        let id = shape.id;
        if let Err(e) = self.scene.append(shape) {
            warn!(error = %e, code = e.error_code(), "could not start drawing");
            return Vec::new();
        }
        if let Err(e) = self.scene.select(HashSet::from([id])) {
            warn!(error = %e, code = e.error_code(), "could not select new shape");
        }
        debug!(%id, ?kind, "drawing started");
        self.input = InputState::DrawingNewShape { id, kind };
        vec![Action::RenderNeeded]
    }

    fn begin_drag(&mut self, id: ShapeId, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.shift {
            if self.scene.deselect(&id) {
                return vec![Action::RenderNeeded];
            }
            if let Err(e) = self.scene.add_to_selection(id) {
                warn!(error = %e, code = e.error_code(), "could not extend selection");
                return Vec::new();
            }
        } else if !self.scene.is_selected(&id) {
            if let Err(e) = self.scene.select(HashSet::from([id])) {
                warn!(error = %e, code = e.error_code(), "could not select hit shape");
                return Vec::new();
            }
        }
        let selected = self.scene.selected();
        let originals = self
            .scene
            .iter()
            .filter(|s| selected.contains(&s.id))
            .map(|s| (s.id, s.origin()))
            .collect();
        self.input = InputState::DraggingSelectedShapes { anchor: pt, originals };
        vec![Action::RenderNeeded]
    }

    fn begin_region(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let base = if modifiers.shift {
            self.scene.selected().clone()
        } else {
            self.scene.clear_selection();
            HashSet::new()
        };
        let marker = Shape::new(ShapeKind::Selection, pt);
        self.input = InputState::DraggingSelectionRegion { marker, base };
        vec![Action::RenderNeeded]
    }

    // --- Gesture ends ---

    fn finish_drawing(&mut self, id: ShapeId, kind: ShapeKind) -> Vec<Action> {
        let eps = self.config.degenerate_epsilon;
        let Some(shape) = self.scene.last().filter(|s| s.id == id) else {
            warn!(%id, "shape being drawn is gone at release");
            return Vec::new();
        };
        let degenerate = !kind.is_linear() && shape.width.abs() <= eps && shape.height.abs() <= eps;
        if degenerate {
            self.scene.remove_last();
            self.scene.acknowledge_removal(&id);
            self.scene.clear_selection();
            debug!(%id, ?kind, "discarded degenerate shape");
            return vec![Action::ShapeDiscarded(id), Action::RenderNeeded];
        }
        debug!(%id, ?kind, "shape committed");
        vec![Action::ShapeCommitted(id), Action::RenderNeeded]
    }

    fn select_all(&mut self) -> Vec<Action> {
        let all: HashSet<ShapeId> = self.scene.iter().map(|s| s.id).collect();
        if &all == self.scene.selected() {
            return Vec::new();
        }
        if let Err(e) = self.scene.select(all) {
            warn!(error = %e, code = e.error_code(), "select all rejected");
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    /// Drop every reference to a removed shape. Returns whether anything
    /// observable changed.
    fn forget(&mut self, id: &ShapeId) -> bool {
        let mut changed = self.scene.deselect(id);
        changed |= !self.scene.prune_selection().is_empty();
        match &mut self.input {
            InputState::DrawingNewShape { id: drawing, .. } if drawing == id => {
                self.input = InputState::Idle;
                changed = true;
            }
            InputState::DraggingSelectedShapes { originals, .. } => {
                originals.retain(|(dragged, _)| dragged != id);
            }
            InputState::DraggingSelectionRegion { base, .. } => {
                base.remove(id);
            }
            _ => {}
        }
        changed
    }
}

/// Stretch a shape being drawn so its far corner (or last point) sits at `pt`.
///
/// Width and height stay signed. Lines and arrows move their terminal point;
/// freehand paths append a sample.
fn extend_to(shape: &mut Shape, pt: Point) {
    let d = pt - shape.origin();
    shape.width = d.x;
    shape.height = d.y;
    match shape.kind {
        ShapeKind::Line | ShapeKind::Arrow => match shape.points.last_mut() {
            Some(last) => *last = d,
            None => shape.points.push(d),
        },
        ShapeKind::Freehand => {
            if shape.points.last() != Some(&d) {
                shape.points.push(d);
            }
        }
        ShapeKind::Rectangle | ShapeKind::Diamond | ShapeKind::Ellipse | ShapeKind::Selection => {}
    }
}

fn render_if(changed: bool) -> Vec<Action> {
    if changed { vec![Action::RenderNeeded] } else { Vec::new() }
}
