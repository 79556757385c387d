//! Selection and hit-testing core for an interactive vector-drawing surface.
//!
//! This crate owns the part of the drawing surface that turns pointer gestures
//! into scene mutations: creating new shapes, dragging a rubber-band selection
//! region, picking and moving existing shapes, and keeping the selection set
//! consistent as the scene changes. Rendering, persistence, and platform event
//! capture live outside; the host wires normalized pointer coordinates in and
//! reacts to the returned [`engine::Action`]s (most importantly
//! [`engine::Action::RenderNeeded`]).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Gesture state machine driven through [`engine::EngineCore`] |
//! | [`doc`] | Shape types and the ordered scene store with its selection set |
//! | [`geom`] | Point math, rotation, bounds, and per-kind containment tests |
//! | [`hit`] | Topmost-point and rubber-band region resolution |
//! | [`input`] | Tools, modifier keys, and the gesture state enum |
//! | [`camera`] | Zoom used to express the hit tolerance in screen pixels |
//! | [`config`] | Engine tuning loaded from the environment |
//! | [`replay`] | Scripted gesture playback used by the CLI |
//! | [`consts`] | Shared numeric constants (tolerances, zoom limits) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod replay;
