//! Freehand drawing engine for inline note blocks.
//!
//! The engine owns the full lifecycle of one drawing block: translating raw
//! pointer events into strokes, erasing and transforming them, keeping undo
//! history, and deriving a drawable [`render::Scene`]. The host note editor is
//! responsible only for wiring pointer events to the engine and persisting the
//! [`engine::Action::Persist`] updates it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] and the actions it emits |
//! | [`doc`] | Lines, background pattern and the canvas state |
//! | [`geometry`] | Points, bounds, surface transform, densify |
//! | [`outline`] | Variable-width stroke outlines |
//! | [`tools`] | Active tool and per-tool settings |
//! | [`input`] | Pointer event types and the gesture state machine |
//! | [`hit`] | Hit-testing against the selection box and handles |
//! | [`selection`] | Marquee membership and move/resize remapping |
//! | [`eraser`] | Whole-stroke proximity erasing |
//! | [`history`] | Snapshot undo/redo stacks |
//! | [`persist`] | Persisted records and the legacy path format |
//! | [`render`] | Pure scene derivation |
//! | [`config`] | Engine configuration |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod eraser;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod history;
pub mod input;
pub mod outline;
pub mod persist;
pub mod render;
pub mod selection;
pub mod tools;

#[cfg(feature = "web")]
pub mod web;

pub use config::EngineConfig;
pub use engine::{Action, EngineCore};
pub use error::{EngineError, PersistError};
