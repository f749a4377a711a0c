//! Error types surfaced by the engine's public API.
//!
//! The engine itself fails closed: malformed strokes and corrupt block data are
//! recovered from (and logged) rather than reported. These errors cover only
//! misuse of the API by the host and text that is not JSON at all.

/// Errors from engine operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot switch tools while a {gesture} gesture is active")]
    GestureInProgress { gesture: &'static str },
}

/// Errors from parsing persisted block data.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
