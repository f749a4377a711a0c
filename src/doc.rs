//! Document model: strokes, the background pattern, and the canvas state that
//! owns them.
//!
//! `CanvasState` is the stroke store. It is mutated only by the engine's gesture
//! handlers and the history manager; the renderer reads it.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Bounds, Point, bounding_box};

/// Process-local identity of a line. Not persisted.
pub type LineId = Uuid;

/// The tool a line was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTool {
    #[default]
    Pen,
    Highlighter,
    Eraser,
}

impl LineTool {
    /// Lenient parse of a persisted tool name. `pencil` is the name older
    /// blocks used for the pen; anything unknown is read as a pen.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "highlighter" => Self::Highlighter,
            "eraser" => Self::Eraser,
            _ => Self::Pen,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlighter => "highlighter",
            Self::Eraser => "eraser",
        }
    }
}

/// Background pattern drawn behind the strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Plain,
    Grid,
    Ruled,
    Dotted,
}

impl Background {
    /// Lenient parse of a persisted `paperType`. Empty, `none` and unknown
    /// values fall back to plain paper.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "grid" => Self::Grid,
            "ruled" => Self::Ruled,
            "dotted" => Self::Dotted,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Grid => "grid",
            Self::Ruled => "ruled",
            Self::Dotted => "dotted",
        }
    }
}

/// One committed freehand stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    /// Centerline in input order.
    pub points: Vec<Point>,
    pub tool: LineTool,
    /// CSS color string.
    pub color: String,
    /// Stroke width in canvas units.
    pub size: f64,
}

impl Line {
    /// Create a line with a fresh id.
    #[must_use]
    pub fn new(points: Vec<Point>, tool: LineTool, color: impl Into<String>, size: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            tool,
            color: color.into(),
            size,
        }
    }

    /// Bounding box of the centerline. `None` for a line without points.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        bounding_box(&self.points)
    }

    /// Same style and identity, different geometry.
    #[must_use]
    pub fn with_points(&self, points: Vec<Point>) -> Self {
        Self {
            id: self.id,
            points,
            tool: self.tool,
            color: self.color.clone(),
            size: self.size,
        }
    }
}

/// The stroke store for one drawing block.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasState {
    /// Lines in paint order; later lines paint over earlier ones.
    pub lines: Vec<Line>,
    /// Current canvas height. Grows monotonically while drawing.
    pub height: f64,
    pub background: Background,
}

impl CanvasState {
    #[must_use]
    pub fn new(height: f64, background: Background) -> Self {
        Self { lines: Vec::new(), height, background }
    }

    /// Look up a line by id.
    #[must_use]
    pub fn get(&self, id: &LineId) -> Option<&Line> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Grow the canvas by `step` if `y` lies within `margin` of the bottom edge.
    /// Returns `true` if the height changed.
    pub fn grow_for(&mut self, y: f64, margin: f64, step: f64) -> bool {
        if step > 0.0 && y > self.height - margin {
            self.height += step;
            true
        } else {
            false
        }
    }

    /// Bounds enclosing every line that has points.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.lines
            .iter()
            .filter_map(Line::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
