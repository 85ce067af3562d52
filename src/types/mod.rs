//! Data types for the overlay layer.

mod event;
mod geometry;
mod region;

pub use event::*;
pub use geometry::*;
pub use region::*;
