//! Persisted block attributes and the legacy path format.
//!
//! Blocks store `{ lines, height, paperType }`. Current records carry an
//! explicit `points` array; older records carry only an SVG `path` (or `d`)
//! string. Every save writes both, so older readers keep working.
//!
//! Hydration is lenient: missing or malformed fields fall back to defaults and
//! a corrupt `lines` value hydrates as no lines. Nothing here fails except
//! parsing text that is not JSON at all.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::consts::MAX_COORDINATE;
use crate::doc::{Background, Line, LineTool};
use crate::error::PersistError;
use crate::geometry::Point;

/// Color used when a record has none.
pub const DEFAULT_COLOR: &str = "#000000";

/// Size used when a record has none (or zero).
pub const DEFAULT_SIZE: f64 = 2.0;

// =============================================================
// Records
// =============================================================

/// One line as persisted in the block's `lines` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub tool: LineTool,
    pub color: String,
    pub size: f64,
    pub points: Vec<[f64; 2]>,
    /// Legacy curve-basis path through `points`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Same as `path`; older readers look here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

/// Attribute update emitted after every committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockUpdate {
    pub lines: Vec<LineRecord>,
    pub height: f64,
}

impl BlockUpdate {
    /// Build the update for the current lines and height.
    #[must_use]
    pub fn new(lines: &[Line], height: f64) -> Self {
        Self { lines: lines.iter().map(to_record).collect(), height }
    }
}

/// Block attributes as loaded from the host document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockAttrs {
    pub lines: Vec<Line>,
    /// `None` when absent, zero or not a number.
    pub height: Option<f64>,
    pub background: Background,
}

impl BlockAttrs {
    /// Interpret an attributes object leniently.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() && !value.is_null() {
            warn!(kind = json_kind(value), "block attributes are not an object; loading empty");
        }
        let height = value
            .get("height")
            .and_then(Value::as_f64)
            .filter(|h| h.is_finite() && *h > 0.0);
        let background = value
            .get("paperType")
            .and_then(Value::as_str)
            .map(Background::parse)
            .unwrap_or_default();
        let lines = value.get("lines").map(hydrate_lines).unwrap_or_default();
        Self { lines, height, background }
    }

    /// Parse attributes from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::InvalidJson`] when `text` is not valid JSON.
    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }
}

// =============================================================
// Hydration
// =============================================================

/// Typed, defaulting access to one persisted line record.
struct RecordView<'a> {
    value: &'a Value,
}

impl<'a> RecordView<'a> {
    fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn tool(&self) -> LineTool {
        self.value
            .get("tool")
            .and_then(Value::as_str)
            .map_or(LineTool::Pen, LineTool::parse)
    }

    fn color(&self) -> &'a str {
        self.value
            .get("color")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR)
    }

    fn size(&self) -> f64 {
        self.value
            .get("size")
            .and_then(Value::as_f64)
            .filter(|s| s.is_finite() && *s != 0.0)
            .unwrap_or(DEFAULT_SIZE)
    }

    /// Explicit point array, if the record has one.
    fn points(&self) -> Option<Vec<Point>> {
        let items = self.value.get("points")?.as_array()?;
        Some(items.iter().filter_map(point_from_value).collect())
    }

    /// Legacy path string, preferring `path` over `d`.
    fn legacy_path(&self) -> Option<&'a str> {
        ["path", "d"]
            .into_iter()
            .filter_map(|key| self.value.get(key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
    }
}

/// A point stored as `[x, y]` or `{ "x": x, "y": y }`.
fn point_from_value(value: &Value) -> Option<Point> {
    match value {
        Value::Array(pair) => {
            let x = pair.first()?.as_f64()?;
            let y = pair.get(1)?.as_f64()?;
            Some(Point::new(x, y))
        }
        Value::Object(map) => {
            let x = map.get("x")?.as_f64()?;
            let y = map.get("y")?.as_f64()?;
            Some(Point::new(x, y))
        }
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Hydrate one record. Records with a `points` array keep it; otherwise points
/// are recovered from the legacy path string. Non-finite points and points
/// beyond [`MAX_COORDINATE`] are dropped.
#[must_use]
pub fn hydrate_line(value: &Value) -> Line {
    let view = RecordView::new(value);
    let points = view
        .points()
        .or_else(|| view.legacy_path().map(extract_points))
        .unwrap_or_default();
    Line::new(in_range(points), view.tool(), view.color(), view.size())
}

fn in_range(points: Vec<Point>) -> Vec<Point> {
    let total = points.len();
    let kept: Vec<Point> = points
        .into_iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite() && p.x.abs() <= MAX_COORDINATE && p.y.abs() <= MAX_COORDINATE)
        .collect();
    if kept.len() < total {
        warn!(dropped = total - kept.len(), kept = kept.len(), "dropped out-of-range points");
    }
    kept
}

/// Hydrate the `lines` attribute. Anything other than an array hydrates as no
/// lines.
#[must_use]
pub fn hydrate_lines(value: &Value) -> Vec<Line> {
    match value {
        Value::Array(items) => items.iter().map(hydrate_line).collect(),
        Value::Null => Vec::new(),
        other => {
            warn!(kind = json_kind(other), "lines attribute is not an array; loading no lines");
            Vec::new()
        }
    }
}

// =============================================================
// Legacy path codec
// =============================================================

/// Recover points from a legacy path by scanning its numeric tokens and
/// pairing them in order. A trailing unpaired token is dropped.
#[must_use]
pub fn extract_points(path: &str) -> Vec<Point> {
    let numbers = numeric_tokens(path);
    numbers.chunks_exact(2).map(|pair| Point::new(pair[0], pair[1])).collect()
}

/// Numeric tokens of the form `-?\d*\.?\d+`, scanned left to right.
fn numeric_tokens(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let int_start = if bytes[i] == b'-' { i + 1 } else { i };
        let int_end = digits_from(int_start);

        let end = if int_end < bytes.len() && bytes[int_end] == b'.' && digits_from(int_end + 1) > int_end + 1 {
            digits_from(int_end + 1)
        } else if int_end > int_start {
            int_end
        } else {
            i += 1;
            continue;
        };

        if let Ok(n) = text[start..end].parse::<f64>() {
            out.push(n);
        }
        i = end;
    }
    out
}

/// Legacy path through `points`: a uniform cubic B-spline that starts at the
/// first point and ends at the last. `None` for no points; a single point
/// gives a closed zero-length path.
#[must_use]
pub fn legacy_path(points: &[Point]) -> Option<String> {
    let first = points.first()?;
    let mut d = String::new();
    // `p0` and `p1` trail the incoming point by two and one.
    let (mut p0, mut p1) = (*first, *first);
    let mut seen = 0usize;

    for &p in points {
        match seen {
            0 => d.push_str(&format!("M{},{}", num(p.x), num(p.y))),
            1 => {}
            2 => {
                d.push_str(&format!("L{},{}", num((5.0 * p0.x + p1.x) / 6.0), num((5.0 * p0.y + p1.y) / 6.0)));
                push_basis(&mut d, p0, p1, p);
            }
            _ => push_basis(&mut d, p0, p1, p),
        }
        seen += 1;
        p0 = p1;
        p1 = p;
    }

    match seen {
        1 => d.push('Z'),
        2 => d.push_str(&format!("L{},{}", num(p1.x), num(p1.y))),
        _ => {
            push_basis(&mut d, p0, p1, p1);
            d.push_str(&format!("L{},{}", num(p1.x), num(p1.y)));
        }
    }
    Some(d)
}

fn push_basis(d: &mut String, p0: Point, p1: Point, p: Point) {
    d.push_str(&format!(
        "C{},{},{},{},{},{}",
        num((2.0 * p0.x + p1.x) / 3.0),
        num((2.0 * p0.y + p1.y) / 3.0),
        num((p0.x + 2.0 * p1.x) / 3.0),
        num((p0.y + 2.0 * p1.y) / 3.0),
        num((p0.x + 4.0 * p1.x + p.x) / 6.0),
        num((p0.y + 4.0 * p1.y + p.y) / 6.0),
    ));
}

/// Shortest decimal form, with negative zero written as `0`.
fn num(v: f64) -> String {
    if v == 0.0 { "0".to_owned() } else { format!("{v}") }
}

/// Persisted form of a line: points plus the recomputed legacy path.
#[must_use]
pub fn to_record(line: &Line) -> LineRecord {
    let path = legacy_path(&line.points);
    LineRecord {
        tool: line.tool,
        color: line.color.clone(),
        size: line.size,
        points: line.points.iter().map(|p| [p.x, p.y]).collect(),
        d: path.clone(),
        path,
    }
}
