//! Input model: pointer events and the gesture state machine.
//!
//! `PointerEvent` is what the host forwards from the DOM. `InputState` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the
//! context needed to emit the final document mutation on release. Exactly one
//! gesture is active at a time; it belongs to the pointer that started it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::LineTool;
use crate::eraser::EraseSession;
use crate::geometry::{Bounds, Point};
use crate::selection::{Marquee, Selection, TransformKind};

/// Host-assigned pointer identifier.
pub type PointerId = i32;

/// The device behind a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Parse a DOM `pointerType`. Unknown types are treated as a mouse.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name {
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Mouse,
        }
    }
}

/// One pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    /// Client-space position.
    pub screen: Point,
    /// Contact geometry as reported for touch input; zero when unknown.
    pub contact_width: f64,
    pub contact_height: f64,
}

impl PointerEvent {
    #[must_use]
    pub fn new(pointer_id: PointerId, kind: PointerKind, screen: Point) -> Self {
        Self { pointer_id, kind, screen, contact_width: 0.0, contact_height: 0.0 }
    }

    /// Primary mouse pointer at `(x, y)`.
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::new(1, PointerKind::Mouse, Point::new(x, y))
    }

    #[must_use]
    pub fn with_contact(mut self, width: f64, height: f64) -> Self {
        self.contact_width = width;
        self.contact_height = height;
        self
    }

    /// Whether this is a touch large enough to be a resting palm.
    #[must_use]
    pub fn is_palm(&self, min_size: f64) -> bool {
        self.kind == PointerKind::Touch && (self.contact_width >= min_size || self.contact_height >= min_size)
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// The active selection, if any. Its bounds follow a transform live.
    pub selection: Option<Selection>,
    /// Last cursor requested from the host.
    pub cursor: Option<&'static str>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Laying down a pen or highlighter stroke.
    Drawing {
        pointer: PointerId,
        tool: LineTool,
        color: String,
        size: f64,
        /// Centerline so far, in canvas coordinates.
        points: Vec<Point>,
    },
    /// Dragging the eraser; lines are removed as it touches them.
    Erasing { pointer: PointerId, session: EraseSession },
    /// Dragging out a marquee.
    Selecting { pointer: PointerId, marquee: Marquee },
    /// Moving or resizing the selection.
    Transforming {
        pointer: PointerId,
        kind: TransformKind,
        /// Canvas position of the pointer-down.
        start: Point,
        /// Selection bounds when the gesture began.
        original: Bounds,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The pointer that owns the active gesture.
    #[must_use]
    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            Self::Idle => None,
            Self::Drawing { pointer, .. }
            | Self::Erasing { pointer, .. }
            | Self::Selecting { pointer, .. }
            | Self::Transforming { pointer, .. } => Some(*pointer),
        }
    }

    /// Short gesture name for logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing { .. } => "drawing",
            Self::Erasing { .. } => "erasing",
            Self::Selecting { .. } => "selecting",
            Self::Transforming { .. } => "transforming",
        }
    }
}
