//! End-to-end gesture scenarios driven through the public engine API.
#![allow(clippy::float_cmp)]

use paperblock::doc::LineTool;
use paperblock::geometry::Point;
use paperblock::input::PointerEvent;
use paperblock::persist::BlockUpdate;
use paperblock::tools::Tool;
use paperblock::{Action, EngineCore};
use serde_json::json;

fn stroke(engine: &mut EngineCore, points: &[(f64, f64)]) -> Vec<Action> {
    let mut actions = Vec::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        let event = PointerEvent::mouse(x, y);
        actions.extend(if i == 0 { engine.on_pointer_down(event) } else { engine.on_pointer_move(event) });
    }
    let &(x, y) = points.last().unwrap();
    actions.extend(engine.on_pointer_up(PointerEvent::mouse(x, y)));
    actions
}

fn last_persist(actions: &[Action]) -> Option<&BlockUpdate> {
    actions.iter().rev().find_map(|a| match a {
        Action::Persist(update) => Some(update),
        _ => None,
    })
}

#[test]
fn draw_grow_erase_undo() {
    let mut engine = EngineCore::default();
    assert_eq!(engine.height(), 400.0);

    let drawn = stroke(&mut engine, &[(100.0, 300.0), (100.0, 320.0), (100.0, 340.0), (100.0, 360.0), (100.0, 380.0)]);
    assert_eq!(engine.height(), 500.0);
    assert_eq!(engine.lines().len(), 1);
    assert_eq!(engine.history.undo_len(), 1);
    let update = last_persist(&drawn).unwrap();
    assert_eq!(update.height, 500.0);
    assert_eq!(update.lines.len(), 1);

    engine.set_tool(Tool::Eraser).unwrap();
    let erased = stroke(&mut engine, &[(60.0, 340.0), (100.0, 340.0), (140.0, 340.0)]);
    assert!(engine.lines().is_empty());
    assert!(last_persist(&erased).unwrap().lines.is_empty());

    engine.undo();
    assert_eq!(engine.lines().len(), 1);
    engine.undo();
    assert!(engine.lines().is_empty());
    assert!(!engine.can_undo());
    assert_eq!(engine.height(), 500.0);
}

#[test]
fn undo_redo_restores_exact_documents() {
    let mut engine = EngineCore::default();
    stroke(&mut engine, &[(10.0, 10.0), (40.0, 30.0)]);
    stroke(&mut engine, &[(50.0, 50.0), (90.0, 70.0)]);
    let after_two = engine.lines().to_vec();

    engine.undo();
    engine.undo();
    assert!(engine.lines().is_empty());
    engine.redo();
    engine.redo();
    assert_eq!(engine.lines(), after_two.as_slice());
}

#[test]
fn single_point_tap_commits_nothing() {
    let mut engine = EngineCore::default();
    let actions = stroke(&mut engine, &[(10.0, 10.0)]);
    assert!(last_persist(&actions).is_none());
    assert!(engine.lines().is_empty());
    assert!(!engine.can_undo());
}

#[test]
fn move_there_and_back_restores_points() {
    let mut engine = EngineCore::default();
    stroke(&mut engine, &[(10.0, 10.0), (60.0, 40.0), (110.0, 110.0)]);
    let original = engine.lines()[0].points.clone();

    engine.set_tool(Tool::Select).unwrap();
    stroke(&mut engine, &[(0.0, 0.0), (150.0, 150.0)]);
    stroke(&mut engine, &[(60.0, 60.0), (90.0, 100.0)]);
    stroke(&mut engine, &[(90.0, 100.0), (60.0, 60.0)]);

    let moved_back = &engine.lines()[0].points;
    for (a, b) in original.iter().zip(moved_back) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
    }
    assert_eq!(engine.history.undo_len(), 3);
}

#[test]
fn resize_keeps_opposite_corner_fixed() {
    let mut engine = EngineCore::default();
    stroke(&mut engine, &[(20.0, 20.0), (70.0, 50.0), (120.0, 120.0)]);
    engine.set_tool(Tool::Select).unwrap();
    stroke(&mut engine, &[(0.0, 0.0), (150.0, 150.0)]);

    // Drag the north-west handle outward.
    stroke(&mut engine, &[(20.0, 20.0), (0.0, -30.0)]);
    let sel = engine.selection().unwrap();
    assert_eq!((sel.bounds.right(), sel.bounds.bottom()), (120.0, 120.0));
    assert_eq!((sel.bounds.width, sel.bounds.height), (120.0, 150.0));

    let points = &engine.lines()[0].points;
    assert!((points[2].x - 120.0).abs() < 1e-9 && (points[2].y - 120.0).abs() < 1e-9);
    assert!((points[0].x - 0.0).abs() < 1e-9 && (points[0].y + 30.0).abs() < 1e-9);
}

#[test]
fn persisted_block_reloads_identically() {
    let mut engine = EngineCore::default();
    engine.set_tool(Tool::Highlighter).unwrap();
    engine.set_color("#ffee00");
    stroke(&mut engine, &[(10.0, 10.0), (20.0, 25.0), (35.0, 30.0)]);

    let update = serde_json::to_value(engine.update()).unwrap();
    let record = &update["lines"][0];
    assert_eq!(record["tool"], "highlighter");
    assert!(record["path"].as_str().unwrap().starts_with("M10,10"));
    assert_eq!(record["path"], record["d"]);

    let mut reloaded = EngineCore::default();
    reloaded.load_value(&update);
    assert_eq!(reloaded.lines().len(), 1);
    assert_eq!(reloaded.lines()[0].points, engine.lines()[0].points);
    assert_eq!(reloaded.lines()[0].color, "#ffee00");
    assert_eq!(reloaded.lines()[0].tool, LineTool::Highlighter);
}

#[test]
fn legacy_path_only_records_hydrate() {
    let mut engine = EngineCore::default();
    engine.load_value(&json!({
        "lines": [{ "tool": "pen", "color": "#ff0000", "size": 2, "path": "M10,10L20,20L30,30" }],
        "height": 450
    }));
    let line = &engine.lines()[0];
    assert_eq!(line.points, vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0), Point::new(30.0, 30.0)]);
    assert_eq!(engine.height(), 450.0);
    assert_eq!(engine.scene().stats().strokes, 1);
}

#[test]
fn long_session_undoes_back_to_empty() {
    let mut engine = EngineCore::default();
    for i in 0..300 {
        let y = f64::from(i % 30) * 10.0 + 5.0;
        stroke(&mut engine, &[(10.0, y), (60.0, y + 2.0)]);
    }
    assert_eq!(engine.lines().len(), 300);
    while engine.can_undo() {
        engine.undo();
    }
    assert!(engine.lines().is_empty());
}
