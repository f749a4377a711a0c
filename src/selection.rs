//! Marquee selection and group transforms.
//!
//! A selection is a set of line ids plus the union of their bounds. Moving or
//! resizing edits only the selection bounds while the pointer is down; the
//! member points are remapped from the original bounds to the final bounds
//! once, on release.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::consts::MIN_REMAP_EXTENT;
use crate::doc::{Line, LineId};
use crate::geometry::{Bounds, Point};
use crate::hit::{HitPart, ResizeAnchor};

/// Rubber-band rectangle dragged out by the select tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    pub start: Point,
    pub current: Point,
}

impl Marquee {
    #[must_use]
    pub fn new(start: Point) -> Self {
        Self { start, current: start }
    }

    /// Normalized rectangle between the two corners.
    #[must_use]
    pub fn rect(&self) -> Bounds {
        Bounds::from_corners(self.start, self.current)
    }
}

/// A group of selected lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub members: Vec<LineId>,
    /// Union of the members' bounds, or the live bounds while transforming.
    pub bounds: Bounds,
}

impl Selection {
    #[must_use]
    pub fn contains(&self, id: &LineId) -> bool {
        self.members.contains(id)
    }
}

/// Lines whose bounds strictly overlap `rect`, as a selection. Marquees not
/// larger than `min_marquee` on either axis, and marquees that catch nothing,
/// select nothing.
#[must_use]
pub fn select(lines: &[Line], rect: &Bounds, min_marquee: f64) -> Option<Selection> {
    if rect.width <= min_marquee || rect.height <= min_marquee {
        return None;
    }

    let mut members = Vec::new();
    let mut bounds: Option<Bounds> = None;
    for line in lines {
        let Some(b) = line.bounds() else { continue };
        if b.overlaps(rect) {
            members.push(line.id);
            bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
        }
    }

    bounds.map(|bounds| Selection { members, bounds })
}

/// Union of the bounds of the listed lines that still exist.
#[must_use]
pub fn members_bounds(lines: &[Line], members: &[LineId]) -> Option<Bounds> {
    lines
        .iter()
        .filter(|l| members.contains(&l.id))
        .filter_map(Line::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// What a transform gesture does to the selection bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Move,
    Resize(ResizeAnchor),
}

impl From<HitPart> for TransformKind {
    fn from(part: HitPart) -> Self {
        match part {
            HitPart::Body => Self::Move,
            HitPart::ResizeHandle(anchor) => Self::Resize(anchor),
        }
    }
}

impl TransformKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Resize(anchor) => anchor.as_str(),
        }
    }
}

/// Live selection bounds for a drag of `delta` since the gesture started.
///
/// Drags shorter than `threshold` on both axes leave `current` untouched. A
/// resize that would make an axis not larger than `min_size` keeps that axis
/// as it is in `current`.
#[must_use]
pub fn drag_bounds(current: &Bounds, original: &Bounds, kind: TransformKind, delta: Point, threshold: f64, min_size: f64) -> Bounds {
    if delta.x.abs() < threshold && delta.y.abs() < threshold {
        return *current;
    }

    let anchor = match kind {
        TransformKind::Move => {
            return Bounds { x: original.x + delta.x, y: original.y + delta.y, ..*original };
        }
        TransformKind::Resize(anchor) => anchor,
    };

    let mut next = *current;
    if anchor.moves_top() {
        let height = original.height - delta.y;
        if height > min_size {
            next.y = original.y + delta.y;
            next.height = height;
        }
    }
    if anchor.moves_bottom() {
        let height = original.height + delta.y;
        if height > min_size {
            next.height = height;
        }
    }
    if anchor.moves_left() {
        let width = original.width - delta.x;
        if width > min_size {
            next.x = original.x + delta.x;
            next.width = width;
        }
    }
    if anchor.moves_right() {
        let width = original.width + delta.x;
        if width > min_size {
            next.width = width;
        }
    }
    next
}

/// Map one point from `from` to `to`.
///
/// A move translates by the change in origin. A resize keeps the point's
/// position relative to the box; degenerate axes divide by at least one unit.
#[must_use]
pub fn remap_point(p: Point, from: &Bounds, to: &Bounds, kind: TransformKind) -> Point {
    match kind {
        TransformKind::Move => Point::new(p.x + (to.x - from.x), p.y + (to.y - from.y)),
        TransformKind::Resize(_) => {
            let rel_x = (p.x - from.x) / from.width.max(MIN_REMAP_EXTENT);
            let rel_y = (p.y - from.y) / from.height.max(MIN_REMAP_EXTENT);
            Point::new(to.x + rel_x * to.width, to.y + rel_y * to.height)
        }
    }
}

#[must_use]
pub fn remap_points(points: &[Point], from: &Bounds, to: &Bounds, kind: TransformKind) -> Vec<Point> {
    points.iter().map(|p| remap_point(*p, from, to, kind)).collect()
}

/// Copy of `lines` with every member remapped from `from` to `to`. Paint order
/// and identities are preserved.
#[must_use]
pub fn apply_transform(lines: &[Line], members: &[LineId], from: &Bounds, to: &Bounds, kind: TransformKind) -> Vec<Line> {
    lines
        .iter()
        .map(|line| {
            if members.contains(&line.id) {
                line.with_points(remap_points(&line.points, from, to, kind))
            } else {
                line.clone()
            }
        })
        .collect()
}
