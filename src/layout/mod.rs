//! Coordinate helper layer.
//!
//! This module handles:
//! - Sparse per-axis line sizing (defaults, overrides, hidden lines)
//! - Merged cell spans
//! - Viewport state (scroll position, header gutters)
//! - Pixel <-> cell conversion through [`GridSnapshot`]

mod axis;
mod coords;
mod dimensions;
mod viewport;

pub use axis::LineAxis;
pub use coords::GridSnapshot;
pub use dimensions::{GridDimensions, MergeInfo};
pub use viewport::Viewport;
