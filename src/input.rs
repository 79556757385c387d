//! Input model: tools, modifier keys, and the gesture state machine's states.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up, carrying the context needed to apply moves without drift and to
//! finish the gesture on release or Escape.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::doc::{Shape, ShapeId, ShapeKind};
use crate::geom::Point;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick, drag, and rubber-band select existing shapes (default).
    #[default]
    Selection,
    /// Draw a rectangle.
    Rectangle,
    /// Draw a diamond.
    Diamond,
    /// Draw an ellipse.
    Ellipse,
    /// Draw a straight line.
    Line,
    /// Draw an arrow.
    Arrow,
    /// Draw a freehand path.
    Freehand,
}

impl Tool {
    /// The shape kind this tool draws, or `None` for the selection tool.
    #[must_use]
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Self::Selection => None,
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Diamond => Some(ShapeKind::Diamond),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Line => Some(ShapeKind::Line),
            Self::Arrow => Some(ShapeKind::Arrow),
            Self::Freehand => Some(ShapeKind::Freehand),
        }
    }

    /// Whether this tool creates shapes.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        self.shape_kind().is_some()
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// A keyboard key as reported by the host (e.g. `"Escape"`, `"a"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the Escape key.
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Active gesture. Exactly one variant is live at a time.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A freshly created shape is being sized. It is already the top of the
    /// scene store.
    DrawingNewShape {
        /// Id of the shape being drawn.
        id: ShapeId,
        /// Kind of the shape being drawn.
        kind: ShapeKind,
    },
    /// A rubber-band region is being dragged from empty space.
    DraggingSelectionRegion {
        /// The ephemeral marker; never enters the scene store.
        marker: Shape,
        /// Selection kept underneath the region (shift-drag), otherwise empty.
        base: HashSet<ShapeId>,
    },
    /// The selected shapes are being moved.
    DraggingSelectedShapes {
        /// Pointer position at pointer-down.
        anchor: Point,
        /// Each dragged shape's origin at pointer-down.
        originals: Vec<(ShapeId, Point)>,
    },
}

impl InputState {
    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
