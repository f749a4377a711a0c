#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// LineTool / Background parsing
// =============================================================

#[test]
fn line_tool_parse_known_names() {
    assert_eq!(LineTool::parse("pen"), LineTool::Pen);
    assert_eq!(LineTool::parse("Highlighter"), LineTool::Highlighter);
    assert_eq!(LineTool::parse("eraser"), LineTool::Eraser);
}

#[test]
fn line_tool_parse_legacy_and_unknown() {
    assert_eq!(LineTool::parse("pencil"), LineTool::Pen);
    assert_eq!(LineTool::parse("crayon"), LineTool::Pen);
    assert_eq!(LineTool::parse(""), LineTool::Pen);
}

#[test]
fn line_tool_serde_lowercase() {
    assert_eq!(serde_json::to_string(&LineTool::Highlighter).unwrap(), "\"highlighter\"");
    let back: LineTool = serde_json::from_str("\"pen\"").unwrap();
    assert_eq!(back, LineTool::Pen);
}

#[test]
fn background_parse() {
    assert_eq!(Background::parse("grid"), Background::Grid);
    assert_eq!(Background::parse("ruled"), Background::Ruled);
    assert_eq!(Background::parse("dotted"), Background::Dotted);
    assert_eq!(Background::parse("plain"), Background::Plain);
    assert_eq!(Background::parse("none"), Background::Plain);
    assert_eq!(Background::parse(""), Background::Plain);
}

#[test]
fn background_as_str_round_trips() {
    for bg in [Background::Plain, Background::Grid, Background::Ruled, Background::Dotted] {
        assert_eq!(Background::parse(bg.as_str()), bg);
    }
}

// =============================================================
// Line
// =============================================================

#[test]
fn new_lines_get_distinct_ids() {
    let a = Line::new(vec![pt(0.0, 0.0)], LineTool::Pen, "#000000", 2.0);
    let b = Line::new(vec![pt(0.0, 0.0)], LineTool::Pen, "#000000", 2.0);
    assert_ne!(a.id, b.id);
}

#[test]
fn line_bounds() {
    let line = Line::new(vec![pt(10.0, 20.0), pt(30.0, 5.0)], LineTool::Pen, "#000000", 2.0);
    assert_eq!(line.bounds(), Some(Bounds::new(10.0, 5.0, 20.0, 15.0)));
}

#[test]
fn empty_line_has_no_bounds() {
    let line = Line::new(Vec::new(), LineTool::Pen, "#000000", 2.0);
    assert_eq!(line.bounds(), None);
}

#[test]
fn with_points_keeps_identity_and_style() {
    let line = Line::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)], LineTool::Highlighter, "#ff0", 8.0);
    let moved = line.with_points(vec![pt(5.0, 5.0), pt(6.0, 6.0)]);
    assert_eq!(moved.id, line.id);
    assert_eq!(moved.tool, LineTool::Highlighter);
    assert_eq!(moved.color, "#ff0");
    assert_eq!(moved.size, 8.0);
    assert_eq!(moved.points, vec![pt(5.0, 5.0), pt(6.0, 6.0)]);
}

// =============================================================
// CanvasState
// =============================================================

#[test]
fn new_state_is_empty() {
    let state = CanvasState::new(400.0, Background::Grid);
    assert!(state.is_empty());
    assert_eq!(state.len(), 0);
    assert_eq!(state.height, 400.0);
    assert_eq!(state.background, Background::Grid);
}

#[test]
fn grow_for_inside_margin() {
    let mut state = CanvasState::new(400.0, Background::Plain);
    assert!(state.grow_for(380.0, 50.0, 100.0));
    assert_eq!(state.height, 500.0);
}

#[test]
fn grow_for_outside_margin() {
    let mut state = CanvasState::new(400.0, Background::Plain);
    assert!(!state.grow_for(350.0, 50.0, 100.0));
    assert_eq!(state.height, 400.0);
}

#[test]
fn get_finds_line_by_id() {
    let mut state = CanvasState::new(400.0, Background::Plain);
    let line = Line::new(vec![pt(0.0, 0.0), pt(1.0, 1.0)], LineTool::Pen, "#000000", 2.0);
    let id = line.id;
    state.lines.push(line);
    assert!(state.get(&id).is_some());
    assert!(state.get(&LineId::new_v4()).is_none());
}

#[test]
fn content_bounds_skips_empty_lines() {
    let mut state = CanvasState::new(400.0, Background::Plain);
    assert_eq!(state.content_bounds(), None);
    state.lines.push(Line::new(vec![pt(10.0, 10.0), pt(20.0, 20.0)], LineTool::Pen, "#000000", 2.0));
    state.lines.push(Line::new(Vec::new(), LineTool::Pen, "#000000", 2.0));
    state.lines.push(Line::new(vec![pt(50.0, 0.0)], LineTool::Pen, "#000000", 2.0));
    assert_eq!(state.content_bounds(), Some(Bounds::new(10.0, 0.0, 40.0, 20.0)));
}
