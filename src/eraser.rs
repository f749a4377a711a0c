//! Whole-stroke eraser.
//!
//! The recent tail of the erase path is outlined at the eraser width. A line is
//! removed when any point of its own outline comes strictly within the eraser
//! size of any footprint point. Line outlines are cached per gesture since
//! lines do not change while erasing.

#[cfg(test)]
#[path = "eraser_test.rs"]
mod eraser_test;

use std::collections::HashMap;

use tracing::debug;

use crate::doc::{Line, LineId, LineTool};
use crate::geometry::{Bounds, Point};
use crate::outline::{Polygon, StrokeShape, dot, stroke_outline};

/// Erase footprint and line outline tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserParams {
    /// Eraser width; also the proximity threshold.
    pub size: f64,
    /// Trailing path points outlined per query.
    pub tail: usize,
    /// Densify gap used for every outline.
    pub densify_gap: f64,
}

/// Outline of a persisted line as drawn. A single point gives a dot; no points
/// give an empty polygon.
#[must_use]
pub fn line_outline(line: &Line, densify_gap: f64) -> Polygon {
    match line.points.as_slice() {
        [] => Polygon::default(),
        [p] => dot(*p, line.size * 0.5),
        points => stroke_outline(points, &StrokeShape::for_tool(line.tool, line.size).with_densify_gap(densify_gap)),
    }
}

/// Outline of the erase path's tail.
#[must_use]
pub fn footprint(path: &[Point], params: &EraserParams) -> Polygon {
    let start = path.len().saturating_sub(params.tail.max(1));
    match &path[start..] {
        [] => Polygon::default(),
        [p] => dot(*p, params.size * 0.5),
        tail => stroke_outline(tail, &StrokeShape::for_tool(LineTool::Eraser, params.size).with_densify_gap(params.densify_gap)),
    }
}

/// Whether any outline point lies strictly within `reach` of any footprint point.
#[must_use]
pub fn touches(outline: &Polygon, outline_bounds: Option<&Bounds>, footprint: &Polygon, footprint_bounds: &Bounds, reach: f64) -> bool {
    let Some(ob) = outline_bounds else {
        return false;
    };
    if !ob.expand(reach).overlaps(footprint_bounds) {
        return false;
    }
    outline
        .points
        .iter()
        .any(|p| footprint.points.iter().any(|e| p.distance(*e) < reach))
}

/// Gesture state for one continuous erase.
#[derive(Debug, Clone, PartialEq)]
pub struct EraseSession {
    /// Erase path so far, in canvas coordinates.
    pub path: Vec<Point>,
    /// Lines as they were when the gesture began.
    pub before: Vec<Line>,
    /// Lines removed so far in this gesture.
    pub removed: usize,
    outlines: HashMap<LineId, (Polygon, Option<Bounds>)>,
}

impl EraseSession {
    /// Start a gesture at `start`, snapshotting `lines` for undo.
    #[must_use]
    pub fn begin(lines: &[Line], start: Point) -> Self {
        Self {
            path: vec![start],
            before: lines.to_vec(),
            removed: 0,
            outlines: HashMap::new(),
        }
    }

    pub fn extend(&mut self, p: Point) {
        self.path.push(p);
    }

    /// Whether any line has been removed in this gesture.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.removed > 0
    }

    /// Remove every line the current footprint touches. Returns how many were
    /// removed by this call.
    pub fn sweep(&mut self, lines: &mut Vec<Line>, params: &EraserParams) -> usize {
        if lines.is_empty() {
            return 0;
        }
        let fp = footprint(&self.path, params);
        let Some(fp_bounds) = fp.bounds() else {
            return 0;
        };

        let outlines = &mut self.outlines;
        let before = lines.len();
        lines.retain(|line| {
            let (outline, bounds) = outlines
                .entry(line.id)
                .or_insert_with(|| {
                    let outline = line_outline(line, params.densify_gap);
                    let bounds = outline.bounds();
                    (outline, bounds)
                });
            !touches(outline, bounds.as_ref(), &fp, &fp_bounds, params.size)
        });

        let removed = before - lines.len();
        if removed > 0 {
            self.removed += removed;
            debug!(removed, total = self.removed, "eraser removed lines");
        }
        removed
    }
}
