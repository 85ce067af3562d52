//! Drawing surface abstraction for overlays.
//!
//! This module provides:
//! - The backend-agnostic [`DrawContext`] trait overlay renderers draw through
//! - A Canvas 2D implementation (wasm only)
//! - A recording implementation for tests and headless replay
//! - Shared decorations (content clipping, selection frame, handles)

pub mod context;
pub mod decorations;
pub mod recording;

#[cfg(target_arch = "wasm32")]
mod canvas2d;

pub use context::DrawContext;
pub use decorations::{draw_ghost_outline, draw_selection_frame, with_content_clip};
pub use recording::{DrawCommand, RecordingContext};
