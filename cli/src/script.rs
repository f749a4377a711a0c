//! Gesture scripts: a JSON array of steps replayed against an engine.
//!
//! ```json
//! [
//!   { "step": "tool", "tool": "pen" },
//!   { "step": "down", "x": 10, "y": 10 },
//!   { "step": "move", "x": 40, "y": 25 },
//!   { "step": "up", "x": 40, "y": 25 },
//!   { "step": "undo" }
//! ]
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use paperblock::doc::Background;
use paperblock::geometry::Point;
use paperblock::input::{PointerEvent, PointerId, PointerKind};
use paperblock::persist::BlockUpdate;
use paperblock::tools::Tool;
use paperblock::{Action, EngineCore, EngineError};
use serde::Deserialize;

fn primary_pointer() -> PointerId {
    1
}

/// One pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointerStep {
    pub x: f64,
    pub y: f64,
    #[serde(default = "primary_pointer")]
    pub pointer: PointerId,
    #[serde(default)]
    pub kind: PointerKind,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl PointerStep {
    fn event(self) -> PointerEvent {
        PointerEvent::new(self.pointer, self.kind, Point::new(self.x, self.y)).with_contact(self.width, self.height)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: Tool },
    Color { color: String },
    Size { size: f64 },
    Background {
        #[serde(alias = "paperType")]
        paper_type: Background,
    },
    Down(PointerStep),
    Move(PointerStep),
    Up(PointerStep),
    Leave(PointerStep),
    Cancel(PointerStep),
    Undo,
    Redo,
}

/// Outcome of a replay.
#[derive(Debug, Default)]
pub struct Replay {
    /// The last `Persist` payload emitted, if any step produced one.
    pub last_update: Option<BlockUpdate>,
    /// Total actions emitted across all steps.
    pub actions: usize,
}

/// Run `steps` in order.
///
/// # Errors
///
/// Fails on a tool change while a gesture is still in progress.
pub fn replay(engine: &mut EngineCore, steps: &[Step]) -> Result<Replay, EngineError> {
    let mut out = Replay::default();
    for (index, step) in steps.iter().enumerate() {
        let actions = match step {
            Step::Tool { tool } => engine.set_tool(*tool)?,
            Step::Color { color } => {
                engine.set_color(color);
                Vec::new()
            }
            Step::Size { size } => {
                engine.set_size(*size);
                Vec::new()
            }
            Step::Background { paper_type } => engine.set_background(*paper_type),
            Step::Down(p) => engine.on_pointer_down(p.event()),
            Step::Move(p) => engine.on_pointer_move(p.event()),
            Step::Up(p) => engine.on_pointer_up(p.event()),
            Step::Leave(p) => engine.on_pointer_leave(p.event()),
            Step::Cancel(p) => engine.on_pointer_cancel(p.event()),
            Step::Undo => engine.undo(),
            Step::Redo => engine.redo(),
        };
        tracing::debug!(index, ?step, emitted = actions.len(), "replayed step");
        out.actions += actions.len();
        for action in actions {
            if let Action::Persist(update) = action {
                out.last_update = Some(update);
            }
        }
    }
    Ok(out)
}
