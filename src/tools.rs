//! Tool controller: the active tool and the per-tool stroke settings.

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::doc::LineTool;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand pen (default).
    #[default]
    Pen,
    /// Wide translucent marker.
    Highlighter,
    /// Removes whole strokes it touches.
    Eraser,
    /// Marquee selection, move and resize.
    Select,
}

impl Tool {
    /// The persisted tool tag for strokes drawn with this tool.
    #[must_use]
    pub fn line_tool(self) -> Option<LineTool> {
        match self {
            Self::Pen => Some(LineTool::Pen),
            Self::Highlighter => Some(LineTool::Highlighter),
            Self::Eraser | Self::Select => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlighter => "highlighter",
            Self::Eraser => "eraser",
            Self::Select => "select",
        }
    }
}

/// Color and width applied to new strokes of one tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    /// CSS color string.
    pub color: String,
    /// Stroke width in canvas units.
    pub size: f64,
}

impl StyleSettings {
    #[must_use]
    pub fn new(color: impl Into<String>, size: f64) -> Self {
        Self { color: color.into(), size }
    }
}

/// Current tool plus the settings each tool draws with.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolController {
    pub tool: Tool,
    pub pen: StyleSettings,
    pub highlighter: StyleSettings,
    pub eraser_size: f64,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ToolController {
    /// Pen active, settings taken from `config`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            tool: Tool::Pen,
            pen: config.pen.clone(),
            highlighter: config.highlighter.clone(),
            eraser_size: config.eraser_size,
        }
    }

    /// Settings new strokes are drawn with. `None` for tools that do not ink.
    #[must_use]
    pub fn style(&self) -> Option<&StyleSettings> {
        match self.tool {
            Tool::Pen => Some(&self.pen),
            Tool::Highlighter => Some(&self.highlighter),
            Tool::Eraser | Tool::Select => None,
        }
    }

    /// Set the active tool's color. No effect for the eraser or select tool.
    pub fn set_color(&mut self, color: impl Into<String>) {
        match self.tool {
            Tool::Pen => self.pen.color = color.into(),
            Tool::Highlighter => self.highlighter.color = color.into(),
            Tool::Eraser | Tool::Select => {}
        }
    }

    /// Set the active tool's size. Non-positive or non-finite sizes are
    /// ignored; the select tool has no size.
    pub fn set_size(&mut self, size: f64) {
        if !size.is_finite() || size <= 0.0 {
            return;
        }
        match self.tool {
            Tool::Pen => self.pen.size = size,
            Tool::Highlighter => self.highlighter.size = size,
            Tool::Eraser => self.eraser_size = size,
            Tool::Select => {}
        }
    }
}
