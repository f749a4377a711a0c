#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// extract_points
// =============================================================

#[test]
fn extract_pairs_in_order() {
    assert_eq!(extract_points("M10,20L30.5,-40"), vec![pt(10.0, 20.0), pt(30.5, -40.0)]);
}

#[test]
fn extract_drops_trailing_token() {
    assert_eq!(extract_points("M1 2 3"), vec![pt(1.0, 2.0)]);
}

#[test]
fn extract_leading_dot_numbers() {
    assert_eq!(extract_points("M.5-.5"), vec![pt(0.5, -0.5)]);
}

#[test]
fn extract_splits_repeated_dots() {
    // "1.5.25" scans as 1.5 then .25.
    assert_eq!(extract_points("M1.5.25"), vec![pt(1.5, 0.25)]);
}

#[test]
fn extract_ignores_trailing_dot_and_lone_minus() {
    assert_eq!(extract_points("M12. - 4"), vec![pt(12.0, 4.0)]);
}

#[test]
fn extract_nothing_from_garbage() {
    assert!(extract_points("").is_empty());
    assert!(extract_points("not a path").is_empty());
}

// =============================================================
// legacy_path
// =============================================================

#[test]
fn legacy_path_empty_is_none() {
    assert_eq!(legacy_path(&[]), None);
}

#[test]
fn legacy_path_single_point_closes() {
    assert_eq!(legacy_path(&[pt(3.0, 4.0)]).as_deref(), Some("M3,4Z"));
}

#[test]
fn legacy_path_two_points_is_a_segment() {
    assert_eq!(legacy_path(&[pt(0.0, 0.0), pt(10.0, 10.0)]).as_deref(), Some("M0,0L10,10"));
}

#[test]
fn legacy_path_three_points_uses_basis_curves() {
    let d = legacy_path(&[pt(0.0, 0.0), pt(6.0, 0.0), pt(12.0, 6.0)]);
    assert_eq!(d.as_deref(), Some("M0,0L1,0C2,0,4,0,6,1C8,2,10,4,11,5L12,6"));
}

#[test]
fn legacy_path_starts_and_ends_on_the_stroke() {
    let points = vec![pt(1.0, 1.0), pt(20.0, 5.0), pt(40.0, 30.0), pt(60.0, 10.0), pt(80.0, 80.0)];
    let d = legacy_path(&points).unwrap();
    assert!(d.starts_with("M1,1L"));
    assert!(d.ends_with("L80,80"));
    assert_eq!(d.matches('C').count(), 4);
}

#[test]
fn legacy_path_writes_negative_zero_as_zero() {
    assert_eq!(legacy_path(&[pt(-0.0, 1.0)]).as_deref(), Some("M0,1Z"));
}

#[test]
fn legacy_path_uses_shortest_decimals() {
    let d = legacy_path(&[pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0)]).unwrap();
    assert!(d.starts_with("M0,0L0.16666666666666666,0C"));
}

// =============================================================
// Hydration
// =============================================================

#[test]
fn hydrate_points_as_pairs() {
    let line = hydrate_line(&json!({
        "tool": "highlighter", "color": "#ff0", "size": 8, "points": [[1, 2], [3, 4]]
    }));
    assert_eq!(line.points, vec![pt(1.0, 2.0), pt(3.0, 4.0)]);
    assert_eq!(line.tool, LineTool::Highlighter);
    assert_eq!(line.color, "#ff0");
    assert_eq!(line.size, 8.0);
}

#[test]
fn hydrate_points_as_objects() {
    let line = hydrate_line(&json!({ "points": [{ "x": 1.5, "y": 2 }, { "x": 3, "y": 4 }] }));
    assert_eq!(line.points, vec![pt(1.5, 2.0), pt(3.0, 4.0)]);
}

#[test]
fn hydrate_skips_malformed_points() {
    let line = hydrate_line(&json!({ "points": [[1, 2], "x", [3], { "x": 1 }, [5, 6]] }));
    assert_eq!(line.points, vec![pt(1.0, 2.0), pt(5.0, 6.0)]);
}

#[test]
fn points_array_wins_over_path() {
    let line = hydrate_line(&json!({ "points": [[1, 1]], "path": "M9,9L8,8" }));
    assert_eq!(line.points, vec![pt(1.0, 1.0)]);
}

#[test]
fn hydrate_legacy_path_record() {
    let line = hydrate_line(&json!({ "tool": "pencil", "path": "M10,20L30,40" }));
    assert_eq!(line.points, vec![pt(10.0, 20.0), pt(30.0, 40.0)]);
    assert_eq!(line.tool, LineTool::Pen);
    assert_eq!(line.color, DEFAULT_COLOR);
    assert_eq!(line.size, DEFAULT_SIZE);
}

#[test]
fn hydrate_legacy_d_record() {
    let line = hydrate_line(&json!({ "d": "M1,2L3,4" }));
    assert_eq!(line.points, vec![pt(1.0, 2.0), pt(3.0, 4.0)]);
}

#[test]
fn hydrate_drops_far_coordinates() {
    let line = hydrate_line(&json!({ "path": "M0,0L1000000000000,0L20,5" }));
    assert_eq!(line.points, vec![pt(0.0, 0.0), pt(20.0, 5.0)]);

    let line = hydrate_line(&json!({ "points": [[1, 2], [-2e6, 3], [4, 1e300]] }));
    assert_eq!(line.points, vec![pt(1.0, 2.0)]);
}

#[test]
fn hydrate_drops_overflowing_path_numbers() {
    let huge = "9".repeat(400);
    let line = hydrate_line(&json!({ "path": format!("M{huge},1L2,3") }));
    assert_eq!(line.points, vec![pt(2.0, 3.0)]);
}

#[test]
fn unparseable_path_keeps_empty_line() {
    let line = hydrate_line(&json!({ "path": "garbage", "color": "#f00" }));
    assert!(line.points.is_empty());
    assert_eq!(line.color, "#f00");
}

#[test]
fn zero_size_and_empty_color_default() {
    let line = hydrate_line(&json!({ "size": 0, "color": "", "points": [] }));
    assert_eq!(line.size, DEFAULT_SIZE);
    assert_eq!(line.color, DEFAULT_COLOR);
}

#[test]
fn non_object_record_hydrates_as_empty_pen_line() {
    let line = hydrate_line(&json!(42));
    assert!(line.points.is_empty());
    assert_eq!(line.tool, LineTool::Pen);
}

#[test]
fn hydrate_lines_non_array_is_empty() {
    assert!(hydrate_lines(&json!({ "oops": true })).is_empty());
    assert!(hydrate_lines(&json!("lines")).is_empty());
    assert!(hydrate_lines(&Value::Null).is_empty());
}

// =============================================================
// BlockAttrs
// =============================================================

#[test]
fn attrs_from_value() {
    let attrs = BlockAttrs::from_value(&json!({
        "lines": [{ "points": [[0, 0], [1, 1]] }],
        "height": 600,
        "paperType": "grid"
    }));
    assert_eq!(attrs.lines.len(), 1);
    assert_eq!(attrs.height, Some(600.0));
    assert_eq!(attrs.background, Background::Grid);
}

#[test]
fn attrs_defaults() {
    let attrs = BlockAttrs::from_value(&json!({}));
    assert!(attrs.lines.is_empty());
    assert_eq!(attrs.height, None);
    assert_eq!(attrs.background, Background::Plain);
}

#[test]
fn attrs_reject_bad_height() {
    assert_eq!(BlockAttrs::from_value(&json!({ "height": 0 })).height, None);
    assert_eq!(BlockAttrs::from_value(&json!({ "height": -5 })).height, None);
    assert_eq!(BlockAttrs::from_value(&json!({ "height": "tall" })).height, None);
}

#[test]
fn attrs_corrupt_shape_loads_empty() {
    let attrs = BlockAttrs::from_value(&json!([1, 2, 3]));
    assert_eq!(attrs, BlockAttrs::default());
}

#[test]
fn attrs_from_json_text() {
    let attrs = BlockAttrs::from_json(r#"{"lines":[],"paperType":"dotted"}"#).unwrap();
    assert_eq!(attrs.background, Background::Dotted);
    assert!(matches!(BlockAttrs::from_json("{not json"), Err(PersistError::InvalidJson(_))));
}

// =============================================================
// Records
// =============================================================

#[test]
fn record_carries_points_and_paths() {
    let line = Line::new(vec![pt(0.0, 0.0), pt(10.0, 10.0)], LineTool::Pen, "#000000", 2.0);
    let rec = to_record(&line);
    assert_eq!(rec.points, vec![[0.0, 0.0], [10.0, 10.0]]);
    assert_eq!(rec.path.as_deref(), Some("M0,0L10,10"));
    assert_eq!(rec.path, rec.d);
}

#[test]
fn record_for_empty_line_omits_paths() {
    let line = Line::new(Vec::new(), LineTool::Pen, "#000000", 2.0);
    let value = serde_json::to_value(to_record(&line)).unwrap();
    assert_eq!(value, json!({ "tool": "pen", "color": "#000000", "size": 2.0, "points": [] }));
}

#[test]
fn dual_format_fidelity() {
    let line = Line::new(vec![pt(1.0, 2.0), pt(3.5, 4.0), pt(7.0, 1.0)], LineTool::Highlighter, "#ff0", 8.0);
    let value = serde_json::to_value(to_record(&line)).unwrap();
    assert!(value.get("path").and_then(Value::as_str).is_some());
    assert_eq!(value.get("path"), value.get("d"));

    let back = hydrate_line(&value);
    assert_eq!(back.points, line.points);
    assert_eq!(back.tool, line.tool);
    assert_eq!(back.color, line.color);
    assert_eq!(back.size, line.size);
}

#[test]
fn block_update_serializes() {
    let line = Line::new(vec![pt(1.0, 2.0), pt(3.0, 4.0)], LineTool::Pen, "#000000", 2.0);
    let update = BlockUpdate::new(&[line], 500.0);
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value["height"], json!(500.0));
    assert_eq!(value["lines"][0]["points"], json!([[1.0, 2.0], [3.0, 4.0]]));
    assert_eq!(value["lines"][0]["d"], json!("M1,2L3,4"));
}
