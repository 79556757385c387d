use super::*;

// =============================================================
// Tool
// =============================================================

#[test]
fn tool_default_is_selection() {
    assert_eq!(Tool::default(), Tool::Selection);
}

#[test]
fn tool_shape_kinds() {
    assert_eq!(Tool::Selection.shape_kind(), None);
    assert_eq!(Tool::Rectangle.shape_kind(), Some(ShapeKind::Rectangle));
    assert_eq!(Tool::Diamond.shape_kind(), Some(ShapeKind::Diamond));
    assert_eq!(Tool::Ellipse.shape_kind(), Some(ShapeKind::Ellipse));
    assert_eq!(Tool::Line.shape_kind(), Some(ShapeKind::Line));
    assert_eq!(Tool::Arrow.shape_kind(), Some(ShapeKind::Arrow));
    assert_eq!(Tool::Freehand.shape_kind(), Some(ShapeKind::Freehand));
}

#[test]
fn no_tool_draws_a_selection_marker() {
    for tool in [
        Tool::Selection,
        Tool::Rectangle,
        Tool::Diamond,
        Tool::Ellipse,
        Tool::Line,
        Tool::Arrow,
        Tool::Freehand,
    ] {
        assert_ne!(tool.shape_kind(), Some(ShapeKind::Selection), "{tool:?}");
    }
}

#[test]
fn tool_is_drawing() {
    assert!(!Tool::Selection.is_drawing());
    assert!(Tool::Freehand.is_drawing());
}

#[test]
fn tool_serde_lowercase() {
    let t: Tool = serde_json::from_str("\"ellipse\"").unwrap();
    assert_eq!(t, Tool::Ellipse);
    assert_eq!(serde_json::to_string(&Tool::Selection).unwrap(), "\"selection\"");
}

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn modifiers_deserialize_partial() {
    let m: Modifiers = serde_json::from_str(r#"{"shift": true}"#).unwrap();
    assert_eq!(m, Modifiers { shift: true, ..Default::default() });
}

#[test]
fn key_escape_detection() {
    assert!(Key("Escape".into()).is_escape());
    assert!(!Key("Enter".into()).is_escape());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn drawing_state_is_not_idle() {
    let state = InputState::DrawingNewShape { id: uuid::Uuid::new_v4(), kind: ShapeKind::Rectangle };
    assert!(!state.is_idle());
}
