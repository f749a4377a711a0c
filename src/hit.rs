//! Hit-testing against the active selection: resize handles first, then the
//! selection body.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::{Bounds, Point};

/// Which part of the selection was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

impl HitPart {
    /// CSS cursor shown while hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "move",
            Self::ResizeHandle(anchor) => anchor.cursor(),
        }
    }
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Every handle, in hit-test priority order (corners before edges).
    pub const ALL: [Self; 8] = [Self::Nw, Self::Ne, Self::Sw, Self::Se, Self::N, Self::E, Self::S, Self::W];

    /// Location of this handle on `bounds`.
    #[must_use]
    pub fn position(self, bounds: &Bounds) -> Point {
        let Point { x: cx, y: cy } = bounds.center();
        let (x, y) = match self {
            Self::N => (cx, bounds.y),
            Self::Ne => (bounds.right(), bounds.y),
            Self::E => (bounds.right(), cy),
            Self::Se => (bounds.right(), bounds.bottom()),
            Self::S => (cx, bounds.bottom()),
            Self::Sw => (bounds.x, bounds.bottom()),
            Self::W => (bounds.x, cy),
            Self::Nw => (bounds.x, bounds.y),
        };
        Point::new(x, y)
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N => "n-resize",
            Self::Ne => "ne-resize",
            Self::E => "e-resize",
            Self::Se => "se-resize",
            Self::S => "s-resize",
            Self::Sw => "sw-resize",
            Self::W => "w-resize",
            Self::Nw => "nw-resize",
        }
    }

    /// Whether dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }

    /// Lowercase compass name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::Ne => "ne",
            Self::E => "e",
            Self::Se => "se",
            Self::S => "s",
            Self::Sw => "sw",
            Self::W => "w",
            Self::Nw => "nw",
        }
    }
}

/// Test `pt` against a selection box. Handles within `handle_radius` (canvas
/// units) win over the body; the body test is inclusive of the edges.
#[must_use]
pub fn hit_selection(pt: Point, bounds: &Bounds, handle_radius: f64) -> Option<HitPart> {
    let handle = ResizeAnchor::ALL
        .into_iter()
        .map(|anchor| (anchor, anchor.position(bounds).distance(pt)))
        .filter(|(_, d)| *d <= handle_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(anchor, _)| HitPart::ResizeHandle(anchor));

    if handle.is_some() {
        return handle;
    }
    bounds.contains(pt).then_some(HitPart::Body)
}
