use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn sel() -> Bounds {
    Bounds::new(100.0, 100.0, 200.0, 100.0)
}

// =============================================================
// ResizeAnchor
// =============================================================

#[test]
fn resize_anchor_all_variants_distinct() {
    for (i, a) in ResizeAnchor::ALL.iter().enumerate() {
        for (j, b) in ResizeAnchor::ALL.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

#[test]
fn anchor_positions() {
    let b = sel();
    assert_eq!(ResizeAnchor::Nw.position(&b), pt(100.0, 100.0));
    assert_eq!(ResizeAnchor::N.position(&b), pt(200.0, 100.0));
    assert_eq!(ResizeAnchor::Ne.position(&b), pt(300.0, 100.0));
    assert_eq!(ResizeAnchor::E.position(&b), pt(300.0, 150.0));
    assert_eq!(ResizeAnchor::Se.position(&b), pt(300.0, 200.0));
    assert_eq!(ResizeAnchor::S.position(&b), pt(200.0, 200.0));
    assert_eq!(ResizeAnchor::Sw.position(&b), pt(100.0, 200.0));
    assert_eq!(ResizeAnchor::W.position(&b), pt(100.0, 150.0));
}

#[test]
fn anchor_edges_compose() {
    assert!(ResizeAnchor::Nw.moves_left() && ResizeAnchor::Nw.moves_top());
    assert!(!ResizeAnchor::Nw.moves_right() && !ResizeAnchor::Nw.moves_bottom());
    assert!(ResizeAnchor::E.moves_right());
    assert!(!ResizeAnchor::E.moves_top() && !ResizeAnchor::E.moves_bottom());
    assert!(ResizeAnchor::S.moves_bottom());
    assert!(!ResizeAnchor::S.moves_left() && !ResizeAnchor::S.moves_right());
}

#[test]
fn anchor_cursors() {
    assert_eq!(ResizeAnchor::Se.cursor(), "se-resize");
    assert_eq!(ResizeAnchor::N.cursor(), "n-resize");
    for anchor in ResizeAnchor::ALL {
        assert_eq!(anchor.cursor(), format!("{}-resize", anchor.as_str()));
    }
}

// =============================================================
// hit_selection
// =============================================================

#[test]
fn hit_corner_handle() {
    assert_eq!(hit_selection(pt(302.0, 198.0), &sel(), 8.0), Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
}

#[test]
fn hit_edge_handle() {
    assert_eq!(hit_selection(pt(200.0, 95.0), &sel(), 8.0), Some(HitPart::ResizeHandle(ResizeAnchor::N)));
}

#[test]
fn handle_outside_bounds_still_hits() {
    assert_eq!(hit_selection(pt(94.0, 94.0), &sel(), 8.0), Some(HitPart::ResizeHandle(ResizeAnchor::Nw)));
}

#[test]
fn handles_take_priority_over_body() {
    // Inside the body but within reach of the west handle.
    assert_eq!(hit_selection(pt(104.0, 150.0), &sel(), 8.0), Some(HitPart::ResizeHandle(ResizeAnchor::W)));
}

#[test]
fn nearest_handle_wins_on_tiny_selection() {
    let tiny = Bounds::new(0.0, 0.0, 4.0, 4.0);
    assert_eq!(hit_selection(pt(4.0, 4.0), &tiny, 8.0), Some(HitPart::ResizeHandle(ResizeAnchor::Se)));
}

#[test]
fn hit_body() {
    assert_eq!(hit_selection(pt(200.0, 150.0), &sel(), 8.0), Some(HitPart::Body));
    assert_eq!(HitPart::Body.cursor(), "move");
}

#[test]
fn miss_outside() {
    assert_eq!(hit_selection(pt(50.0, 50.0), &sel(), 8.0), None);
    assert_eq!(hit_selection(pt(320.0, 150.0), &sel(), 8.0), None);
}
