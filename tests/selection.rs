//! End-to-end selection scenarios driven through the public engine API.
//!
//! `Surface` plays the host: it feeds pointer and key events into an
//! [`EngineCore`] and counts every `RenderNeeded` the way a renderer hook
//! would be counted.

#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use sketchboard::doc::{ShapeId, ShapeKind};
use sketchboard::engine::{Action, EngineCore};
use sketchboard::geom::Point;
use sketchboard::input::{Key, Modifiers, Tool};

// =============================================================
// Harness
// =============================================================

#[derive(Default)]
struct Surface {
    core: EngineCore,
    renders: usize,
}

impl Surface {
    fn record(&mut self, actions: &[Action]) {
        self.renders += actions.iter().filter(|a| matches!(a, Action::RenderNeeded)).count();
    }

    fn tool(&mut self, tool: Tool) {
        let actions = self.core.set_tool(tool);
        self.record(&actions);
    }

    fn down(&mut self, x: f64, y: f64) {
        let actions = self.core.on_pointer_down(Point::new(x, y), Modifiers::default());
        self.record(&actions);
    }

    fn moved(&mut self, x: f64, y: f64) {
        let actions = self.core.on_pointer_move(Point::new(x, y));
        self.record(&actions);
    }

    fn up(&mut self) {
        let actions = self.core.on_pointer_up();
        self.record(&actions);
    }

    fn escape(&mut self) {
        let actions = self.core.on_key_down(&Key("Escape".into()), Modifiers::default());
        self.record(&actions);
    }

    fn draw(&mut self, tool: Tool, from: (f64, f64), to: (f64, f64)) -> ShapeId {
        self.tool(tool);
        self.down(from.0, from.1);
        self.moved(to.0, to.1);
        self.up();
        let id = self.core.scene.last().map(|s| s.id).unwrap();
        self.escape();
        id
    }

    fn selected_kinds(&self) -> Vec<ShapeKind> {
        self.core
            .scene
            .iter()
            .filter(|s| self.core.selection().contains(&s.id))
            .map(|s| s.kind)
            .collect()
    }
}

fn three_in_a_row(surface: &mut Surface) -> [ShapeId; 3] {
    [
        surface.draw(Tool::Rectangle, (30.0, 30.0), (40.0, 40.0)),
        surface.draw(Tool::Diamond, (40.0, 40.0), (50.0, 50.0)),
        surface.draw(Tool::Ellipse, (50.0, 50.0), (60.0, 60.0)),
    ]
}

// =============================================================
// Selection marker
// =============================================================

#[test]
fn marker_created_on_pointer_down() {
    let mut s = Surface::default();
    s.tool(Tool::Selection);
    s.down(60.0, 100.0);

    assert_eq!(s.renders, 1);
    let marker = s.core.selection_marker().unwrap();
    assert_eq!(marker.kind, ShapeKind::Selection);
    assert_eq!((marker.x, marker.y), (60.0, 100.0));
    assert_eq!((marker.width, marker.height), (0.0, 0.0));
    s.up();
}

#[test]
fn marker_resized_on_pointer_move() {
    let mut s = Surface::default();
    s.tool(Tool::Selection);
    s.down(60.0, 100.0);
    s.moved(150.0, 30.0);

    assert_eq!(s.renders, 2);
    let b = s.core.selection_marker().unwrap().normalized_bounds();
    assert_eq!((b.min_x, b.min_y), (60.0, 30.0));
    assert_eq!((b.width(), b.height()), (90.0, 70.0));
    s.up();
}

#[test]
fn marker_removed_on_pointer_up() {
    let mut s = Surface::default();
    s.tool(Tool::Selection);
    s.down(60.0, 100.0);
    s.moved(150.0, 30.0);
    s.up();

    assert_eq!(s.renders, 3);
    assert!(s.core.selection_marker().is_none());
    assert!(s.core.scene.is_empty());
}

// =============================================================
// Select a single shape by clicking its outline
// =============================================================

fn click_selects_single(tool: Tool, click: (f64, f64)) {
    let mut s = Surface::default();
    let id = s.draw(tool, (30.0, 20.0), (60.0, 70.0));

    s.tool(Tool::Selection);
    s.down(click.0, click.1);
    s.up();

    assert_eq!(s.renders, 7, "{tool:?}");
    assert!(s.core.selection_marker().is_none());
    assert_eq!(s.core.scene.len(), 1);
    assert_eq!(s.core.selection(), &HashSet::from([id]));
}

#[test]
fn select_rectangle_by_top_edge() {
    click_selects_single(Tool::Rectangle, (45.0, 20.0));
}

#[test]
fn select_diamond_by_top_vertex() {
    click_selects_single(Tool::Diamond, (45.0, 20.0));
}

#[test]
fn select_ellipse_by_top_edge() {
    click_selects_single(Tool::Ellipse, (45.0, 20.0));
}

#[test]
fn select_arrow_near_its_shaft() {
    click_selects_single(Tool::Arrow, (40.0, 40.0));
}

#[test]
fn select_line_near_its_segment() {
    click_selects_single(Tool::Line, (40.0, 40.0));
}

// =============================================================
// Rubber-band over several shapes
// =============================================================

#[test]
fn region_selects_all_enclosed() {
    let mut s = Surface::default();
    let ids = three_in_a_row(&mut s);

    s.tool(Tool::Selection);
    s.down(20.0, 20.0);
    s.moved(70.0, 70.0);
    s.up();

    assert_eq!(s.renders, 18);
    assert!(s.core.selection_marker().is_none());
    assert_eq!(s.core.scene.len(), 3);
    assert_eq!(s.core.selection(), &HashSet::from(ids));
}

#[test]
fn region_skips_partial_overlaps() {
    let mut s = Surface::default();
    three_in_a_row(&mut s);

    s.tool(Tool::Selection);
    s.down(55.0, 35.0);
    s.moved(35.0, 55.0);
    s.up();

    assert_eq!(s.renders, 18);
    assert!(s.core.selection_marker().is_none());
    assert_eq!(s.core.scene.len(), 3);
    assert_eq!(s.selected_kinds(), vec![ShapeKind::Diamond]);
}

// =============================================================
// Properties
// =============================================================

#[test]
fn drawn_shape_matches_pointer_path() {
    for tool in [Tool::Rectangle, Tool::Diamond, Tool::Ellipse, Tool::Line, Tool::Arrow, Tool::Freehand] {
        let mut s = Surface::default();
        s.draw(tool, (80.0, 15.0), (20.0, 95.0));
        let shape = &s.core.scene.shapes()[0];
        assert_eq!(Some(shape.kind), tool.shape_kind());
        assert_eq!((shape.x, shape.y), (80.0, 15.0));
        assert_eq!((shape.width, shape.height), (-60.0, 80.0), "{tool:?}");
    }
}

#[test]
fn click_without_drag_leaves_scene_unchanged() {
    for tool in [Tool::Rectangle, Tool::Diamond, Tool::Ellipse] {
        let mut s = Surface::default();
        s.tool(tool);
        s.down(10.0, 10.0);
        s.up();
        assert!(s.core.scene.is_empty(), "{tool:?}");
        assert!(s.core.selection().is_empty());
    }
}

#[test]
fn overlapping_click_picks_topmost() {
    let mut s = Surface::default();
    s.draw(Tool::Rectangle, (0.0, 0.0), (100.0, 100.0));
    let top = s.draw(Tool::Ellipse, (25.0, 25.0), (75.0, 75.0));

    s.down(50.0, 50.0);
    s.up();
    assert_eq!(s.core.selection(), &HashSet::from([top]));
}

#[test]
fn reclicking_selected_shape_keeps_selection() {
    let mut s = Surface::default();
    let id = s.draw(Tool::Rectangle, (0.0, 0.0), (50.0, 50.0));

    for _ in 0..2 {
        s.down(25.0, 25.0);
        s.up();
        assert_eq!(s.core.selection(), &HashSet::from([id]));
    }
}

#[test]
fn deleting_selected_shape_prunes_selection() {
    let mut s = Surface::default();
    let a = s.draw(Tool::Rectangle, (0.0, 0.0), (50.0, 50.0));
    let b = s.draw(Tool::Ellipse, (100.0, 100.0), (150.0, 150.0));
    s.core.scene.select(HashSet::from([a, b])).unwrap();

    s.core.scene.remove(&a);
    let actions = s.core.on_shape_removed(&a);
    assert_eq!(actions, vec![Action::RenderNeeded]);
    assert_eq!(s.core.selection(), &HashSet::from([b]));
}

#[test]
fn drag_moves_selected_shape() {
    let mut s = Surface::default();
    let id = s.draw(Tool::Rectangle, (0.0, 0.0), (50.0, 50.0));

    s.down(25.0, 25.0);
    s.moved(35.0, 45.0);
    s.moved(125.0, 75.0);
    s.up();

    let shape = s.core.shape(&id).unwrap();
    assert_eq!((shape.x, shape.y), (100.0, 50.0));
    assert_eq!((shape.width, shape.height), (50.0, 50.0));
}
