//! Geometry primitives: points, axis-aligned bounds, and the mapping between
//! the rendering surface on screen and the logical canvas.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_WIDTH, DEFAULT_HEIGHT, MAX_DENSIFY_STEPS};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(average(self.x, other.x), average(self.y, other.y))
    }
}

/// Axis-aligned bounding box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized box spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Strict AABB overlap: touching edges do not count.
    #[must_use]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right() && self.right() > other.x && self.y < other.bottom() && self.bottom() > other.y
    }

    /// Smallest box enclosing both.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Grow the box by `margin` on every side.
    #[must_use]
    pub fn expand(&self, margin: f64) -> Bounds {
        Bounds {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }
}

/// Bounding box of a point set. A single point yields a zero-sized box; an
/// empty set has no box.
#[must_use]
pub fn bounding_box(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Arithmetic mean of two values.
#[must_use]
pub fn average(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Insert evenly spaced points so no two neighbours are more than `max_gap`
/// apart, inserting at most [`MAX_DENSIFY_STEPS`] per segment. Consecutive
/// duplicates are dropped.
#[must_use]
pub fn densify(points: &[Point], max_gap: f64) -> Vec<Point> {
    if points.len() < 2 || max_gap <= 0.0 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dist = a.distance(b);
        if dist == 0.0 {
            continue;
        }
        // Saturating cast; the cap bounds far or infinite segments.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let steps = ((dist / max_gap).ceil() as usize).min(MAX_DENSIFY_STEPS);
        for j in 1..steps {
            #[allow(clippy::cast_precision_loss)]
            let t = j as f64 / steps as f64;
            out.push(a.lerp(b, t));
        }
        out.push(b);
    }
    out
}

/// Map `value` from the range `from` onto the range `to`, optionally clamping
/// the result into `to`.
#[must_use]
pub fn modulate(value: f64, from: (f64, f64), to: (f64, f64), clamp: bool) -> f64 {
    let (from_low, from_high) = from;
    let (to_low, to_high) = to;
    if from_high == from_low {
        return to_low;
    }
    let result = to_low + (value - from_low) / (from_high - from_low) * (to_high - to_low);
    if !clamp {
        return result;
    }
    if to_low < to_high {
        result.clamp(to_low, to_high)
    } else {
        result.clamp(to_high, to_low)
    }
}

/// Placement of the rendering surface on screen.
///
/// The logical canvas (`canvas_width` × `canvas_height`) is fit into the
/// displayed box with uniform scaling and centered, the way an SVG viewBox with
/// `xMidYMid meet` is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    /// Screen x of the displayed box's left edge.
    pub left: f64,
    /// Screen y of the displayed box's top edge.
    pub top: f64,
    /// Displayed width in screen pixels.
    pub display_width: f64,
    /// Displayed height in screen pixels.
    pub display_height: f64,
    /// Intrinsic canvas width.
    pub canvas_width: f64,
    /// Intrinsic canvas height.
    pub canvas_height: f64,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::identity(CANVAS_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SurfaceTransform {
    /// A surface displayed at its intrinsic size at the screen origin.
    #[must_use]
    pub fn identity(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: canvas_width,
            display_height: canvas_height,
            canvas_width,
            canvas_height,
        }
    }

    /// Uniform scale and the screen position of the canvas origin.
    fn fit(&self) -> (f64, f64, f64) {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 || self.display_width <= 0.0 || self.display_height <= 0.0 {
            return (1.0, self.left, self.top);
        }
        let scale = (self.display_width / self.canvas_width).min(self.display_height / self.canvas_height);
        let origin_x = self.left + (self.display_width - self.canvas_width * scale) * 0.5;
        let origin_y = self.top + (self.display_height - self.canvas_height * scale) * 0.5;
        (scale, origin_x, origin_y)
    }

    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, screen: Point) -> Point {
        let (scale, ox, oy) = self.fit();
        Point::new((screen.x - ox) / scale, (screen.y - oy) / scale)
    }

    /// Convert a canvas point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, canvas: Point) -> Point {
        let (scale, ox, oy) = self.fit();
        Point::new(canvas.x * scale + ox, canvas.y * scale + oy)
    }

    /// Convert a screen-space distance to a canvas distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.fit().0
    }

    /// Extend the canvas downward by `step` units, growing the displayed box so
    /// the current scale and origin are preserved.
    pub fn grow(&mut self, step: f64) {
        let (scale, _, _) = self.fit();
        self.canvas_height += step;
        self.display_height += step * scale;
    }
}
