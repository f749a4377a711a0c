//! Stroke outlines: turns a centerline into a closed, fillable polygon that
//! approximates a variable-width pen stroke.
//!
//! The pipeline is densify → streamline → neighbour smoothing → per-point
//! radius (simulated pressure, tapers) → left/right offsets joined by round
//! caps. Every step is a pure function of its inputs, so identical points and
//! shape parameters always produce an identical polygon. The eraser relies on
//! that to test proximity symmetrically.

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::consts::{CAP_SEGMENTS, DENSIFY_GAP, DOT_SEGMENTS};
use crate::doc::LineTool;
use crate::geometry::{Bounds, Point, bounding_box, densify, modulate};

/// Smallest radius an outline point may have.
const MIN_RADIUS: f64 = 0.01;

/// How quickly simulated pressure follows pointer speed.
const PRESSURE_RATE: f64 = 0.275;

/// Points closer than this are treated as coincident.
const COINCIDENT: f64 = 1e-6;

/// Shaping parameters for one stroke outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeShape {
    /// Nominal stroke width.
    pub size: f64,
    /// How strongly simulated pressure narrows or widens the stroke, `0..=1`.
    pub thinning: f64,
    /// Lag applied to the centerline to damp jitter, `0..=1`.
    pub streamline: f64,
    /// Weight of neighbour averaging on the centerline, `0..=1`.
    pub smoothing: f64,
    /// Derive pressure from pointer speed (fast = thin).
    pub simulate_pressure: bool,
    /// Length over which the start narrows to a point. `0` disables.
    pub taper_start: f64,
    /// Length over which the end narrows to a point. `0` disables.
    pub taper_end: f64,
    /// Maximum spacing of centerline samples.
    pub densify_gap: f64,
}

impl StrokeShape {
    /// Shaping used to render a line drawn with `tool` at `size`.
    #[must_use]
    pub fn for_tool(tool: LineTool, size: f64) -> Self {
        match tool {
            LineTool::Pen => Self {
                size,
                thinning: 0.5,
                streamline: 0.5,
                smoothing: 0.5,
                simulate_pressure: true,
                taper_start: 0.0,
                taper_end: 0.0,
                densify_gap: DENSIFY_GAP,
            },
            LineTool::Highlighter => Self {
                size,
                thinning: 0.0,
                streamline: modulate(size, (9.0, 16.0), (0.64, 0.74), true),
                smoothing: 0.62,
                simulate_pressure: false,
                taper_start: 0.0,
                taper_end: 0.0,
                densify_gap: DENSIFY_GAP,
            },
            LineTool::Eraser => Self {
                size,
                thinning: 0.0,
                streamline: 0.5,
                smoothing: 0.5,
                simulate_pressure: false,
                taper_start: 0.0,
                taper_end: 0.0,
                densify_gap: DENSIFY_GAP,
            },
        }
    }

    #[must_use]
    pub fn with_tapers(mut self, start: f64, end: f64) -> Self {
        self.taper_start = start.max(0.0);
        self.taper_end = end.max(0.0);
        self
    }

    #[must_use]
    pub fn with_densify_gap(mut self, gap: f64) -> Self {
        self.densify_gap = gap;
        self
    }
}

/// A closed polygon. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.points)
    }

    /// SVG path data that rounds the polygon's corners with quadratic curves
    /// through edge midpoints. Empty polygons give an empty string.
    #[must_use]
    pub fn to_svg_path(&self) -> String {
        let pts = &self.points;
        let n = pts.len();
        if n == 0 {
            return String::new();
        }
        if n < 3 {
            let mut d = format!("M{:.2},{:.2}", pts[0].x, pts[0].y);
            for p in &pts[1..] {
                write_pair(&mut d, " L", *p);
            }
            d.push_str(" Z");
            return d;
        }

        let start = pts[n - 1].midpoint(pts[0]);
        let mut d = format!("M{:.2},{:.2}", start.x, start.y);
        for i in 0..n {
            let ctrl = pts[i];
            let end = ctrl.midpoint(pts[(i + 1) % n]);
            write_pair(&mut d, " Q", ctrl);
            write_pair(&mut d, " ", end);
        }
        d.push_str(" Z");
        d
    }
}

fn write_pair(d: &mut String, prefix: &str, p: Point) {
    d.push_str(&format!("{prefix}{:.2},{:.2}", p.x, p.y));
}

/// Outline of a stroke along `points`. Fewer than two points yield an empty
/// polygon; two or more points that all coincide yield a round dot.
#[must_use]
pub fn stroke_outline(points: &[Point], shape: &StrokeShape) -> Polygon {
    if points.len() < 2 {
        return Polygon::default();
    }

    let spine = centerline(points, shape);
    if spine.len() < 2 {
        return dot(points[0], shape.size * 0.5);
    }

    let radii = radii(&spine, shape);
    assemble(&spine, &radii)
}

/// A filled circle approximated by a regular polygon.
#[must_use]
pub fn dot(center: Point, radius: f64) -> Polygon {
    let r = radius.max(MIN_RADIUS);
    let points = (0..DOT_SEGMENTS)
        .map(|k| {
            let theta = TAU * index_f64(k) / index_f64(DOT_SEGMENTS);
            Point::new(center.x + r * theta.cos(), center.y + r * theta.sin())
        })
        .collect();
    Polygon { points }
}

#[allow(clippy::cast_precision_loss)]
fn index_f64(i: usize) -> f64 {
    i as f64
}

/// Densified, streamlined and smoothed centerline with coincident samples
/// removed. Endpoints stay anchored to the input.
fn centerline(points: &[Point], shape: &StrokeShape) -> Vec<Point> {
    let dense = densify(points, shape.densify_gap);
    let Some((&first, rest)) = dense.split_first() else {
        return Vec::new();
    };

    let t = 0.15 + (1.0 - shape.streamline.clamp(0.0, 1.0)) * 0.85;
    let mut spine = vec![first];
    let mut prev = first;
    for &p in rest {
        let next = prev.lerp(p, t);
        if next.distance(prev) > COINCIDENT {
            spine.push(next);
            prev = next;
        }
    }
    if let Some(&last) = dense.last() {
        if last.distance(prev) > COINCIDENT {
            spine.push(last);
        }
    }

    let weight = shape.smoothing.clamp(0.0, 1.0) * 0.5;
    if weight > 0.0 && spine.len() > 2 {
        let src = spine.clone();
        for i in 1..src.len() - 1 {
            let avg = src[i - 1].midpoint(src[i + 1]);
            spine[i] = src[i].lerp(avg, weight);
        }
    }
    spine
}

/// Per-sample outline radius.
fn radii(spine: &[Point], shape: &StrokeShape) -> Vec<f64> {
    let total: f64 = spine.windows(2).map(|w| w[0].distance(w[1])).sum();
    let half = shape.size * 0.5;
    let thinning = shape.thinning.clamp(0.0, 1.0);

    let mut out = Vec::with_capacity(spine.len());
    let mut run = 0.0;
    let mut pressure = 0.5;
    for (i, p) in spine.iter().enumerate() {
        if i > 0 {
            let step = spine[i - 1].distance(*p);
            run += step;
            if shape.simulate_pressure && shape.size > 0.0 {
                let speed = (step / shape.size).min(1.0);
                pressure += ((1.0 - speed) - pressure) * PRESSURE_RATE;
            }
        }

        let mut r = if shape.simulate_pressure {
            shape.size * (0.5 - thinning * (0.5 - pressure))
        } else {
            half
        };
        if shape.taper_start > 0.0 && run < shape.taper_start {
            r *= ease(run / shape.taper_start);
        }
        let remaining = total - run;
        if shape.taper_end > 0.0 && remaining < shape.taper_end {
            r *= ease(remaining / shape.taper_end);
        }
        out.push(r.max(MIN_RADIUS));
    }
    out
}

fn ease(t: f64) -> f64 {
    (t.clamp(0.0, 1.0) * FRAC_PI_2).sin()
}

/// Offset the spine to both sides and join the sides with round caps.
fn assemble(spine: &[Point], radii: &[f64]) -> Polygon {
    let n = spine.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let mut dirs = Vec::with_capacity(n);

    for i in 0..n {
        let prev = spine[i.saturating_sub(1)];
        let next = spine[(i + 1).min(n - 1)];
        let dir = unit(next.x - prev.x, next.y - prev.y);
        let normal = Point::new(-dir.y, dir.x);
        let (p, r) = (spine[i], radii[i]);
        left.push(Point::new(p.x + normal.x * r, p.y + normal.y * r));
        right.push(Point::new(p.x - normal.x * r, p.y - normal.y * r));
        dirs.push(dir);
    }

    let mut points = Vec::with_capacity(n * 2 + CAP_SEGMENTS * 2);
    points.extend_from_slice(&left);
    points.extend(cap(spine[n - 1], dirs[n - 1], radii[n - 1], 1.0));
    points.extend(right.iter().rev());
    points.extend(cap(spine[0], dirs[0], radii[0], -1.0));
    Polygon { points }
}

/// Interior points of a half circle around `center`. With `sign = 1` it runs
/// from the left side, around the front, to the right side; with `sign = -1`
/// from the right side, around the back, to the left side.
fn cap(center: Point, dir: Point, r: f64, sign: f64) -> impl Iterator<Item = Point> {
    let normal = Point::new(-dir.y, dir.x);
    (1..CAP_SEGMENTS).map(move |k| {
        let theta = PI * index_f64(k) / index_f64(CAP_SEGMENTS);
        let (s, c) = theta.sin_cos();
        Point::new(
            center.x + sign * r * (normal.x * c + dir.x * s),
            center.y + sign * r * (normal.y * c + dir.y * s),
        )
    })
}

fn unit(dx: f64, dy: f64) -> Point {
    let len = dx.hypot(dy);
    if len <= COINCIDENT {
        Point::new(1.0, 0.0)
    } else {
        Point::new(dx / len, dy / len)
    }
}
