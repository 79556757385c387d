//! Scripted gesture playback.
//!
//! A script is a JSON array of input events applied in order to a fresh
//! [`EngineCore`]. Shapes are addressed by their index in scene order since
//! identifiers are generated at draw time.
//!
//! ```json
//! [
//!   { "event": "tool", "tool": "rectangle" },
//!   { "event": "down", "x": 30, "y": 20 },
//!   { "event": "move", "x": 60, "y": 70 },
//!   { "event": "up" },
//!   { "event": "key", "key": "Escape" }
//! ]
//! ```

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::doc::Shape;
use crate::engine::{Action, EngineCore};
use crate::geom::{Bounds, Point};
use crate::input::{Key, Modifiers, Tool};

// =============================================================================
// SCRIPT
// =============================================================================

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum ScriptEvent {
    Tool {
        tool: Tool,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Zoom {
        zoom: f64,
    },
    /// Remove the shape at `index` in scene order.
    Remove {
        index: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {event}: no shape at index {index}")]
    Scene { event: usize, index: usize },
}

impl ReplayError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_REPLAY_IO",
            Self::Json(_) => "E_REPLAY_JSON",
            Self::Scene { .. } => "E_REPLAY_SCENE",
        }
    }
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns `ReplayError::Io` if the file cannot be read and
/// `ReplayError::Json` if it is not a valid event array.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, ReplayError> {
    let raw = std::fs::read_to_string(path)?;
    parse_script(&raw)
}

/// Parse a script from a JSON string.
///
/// # Errors
///
/// Returns `ReplayError::Json` if `raw` is not a valid event array.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

// =============================================================================
// PLAYBACK
// =============================================================================

/// Final state after a script has been played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Persisted shapes in z-order.
    pub shapes: Vec<Shape>,
    /// Scene indices of the selected shapes, ascending.
    pub selected: Vec<usize>,
    /// Normalized rubber-band box if the script ended mid region drag.
    pub marker: Option<MarkerBox>,
    /// Number of `RenderNeeded` actions emitted over the whole script.
    pub render_count: usize,
    pub committed: usize,
    pub discarded: usize,
}

/// Canonical rubber-band rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<Bounds> for MarkerBox {
    fn from(b: Bounds) -> Self {
        Self { x: b.min_x, y: b.min_y, width: b.width(), height: b.height() }
    }
}

#[derive(Debug, Default)]
struct Tally {
    renders: usize,
    committed: usize,
    discarded: usize,
}

impl Tally {
    fn record(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::RenderNeeded => self.renders += 1,
                Action::ShapeCommitted(_) => self.committed += 1,
                Action::ShapeDiscarded(_) => self.discarded += 1,
                Action::ShapesMoved(_) => {}
            }
        }
    }
}

/// Play `events` against a fresh engine built from `config`.
///
/// # Errors
///
/// Returns `ReplayError::Scene` when a `remove` event names an index past the
/// end of the scene.
pub fn run(events: &[ScriptEvent], config: EngineConfig) -> Result<ReplaySummary, ReplayError> {
    let mut core = EngineCore::with_config(config);
    let mut tally = Tally::default();

    for (n, event) in events.iter().enumerate() {
        debug!(n, ?event, "replay event");
        let actions = apply(&mut core, n, event)?;
        tally.record(&actions);
    }

    let selected = core
        .scene
        .iter()
        .enumerate()
        .filter(|(_, s)| core.scene.is_selected(&s.id))
        .map(|(i, _)| i)
        .collect();
    let summary = ReplaySummary {
        shapes: core.scene.shapes().to_vec(),
        selected,
        marker: core.selection_marker().map(|m| MarkerBox::from(m.normalized_bounds())),
        render_count: tally.renders,
        committed: tally.committed,
        discarded: tally.discarded,
    };
    info!(
        events = events.len(),
        shapes = summary.shapes.len(),
        renders = summary.render_count,
        "replay finished"
    );
    Ok(summary)
}

fn apply(core: &mut EngineCore, n: usize, event: &ScriptEvent) -> Result<Vec<Action>, ReplayError> {
    let actions = match event {
        ScriptEvent::Tool { tool } => core.set_tool(*tool),
        ScriptEvent::Down { x, y, modifiers } => core.on_pointer_down(Point::new(*x, *y), *modifiers),
        ScriptEvent::Move { x, y } => core.on_pointer_move(Point::new(*x, *y)),
        ScriptEvent::Up => core.on_pointer_up(),
        ScriptEvent::Key { key, modifiers } => core.on_key_down(&Key(key.clone()), *modifiers),
        ScriptEvent::Zoom { zoom } => core.set_zoom(*zoom),
        ScriptEvent::Remove { index } => {
            let Some(id) = core.scene.shapes().get(*index).map(|s| s.id) else {
                return Err(ReplayError::Scene { event: n, index: *index });
            };
            core.remove_shape(&id)
        }
    };
    Ok(actions)
}
