//! Pointer-driven move and resize gestures.

mod controller;
pub mod drag_move;
pub mod drag_resize;

pub use controller::{DragState, InteractionController};
pub use drag_move::{MoveDrag, MovePhase};
pub use drag_resize::{resize_cells, resize_floating, ResizeDrag};

use crate::overlay::Corner;

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing under the pointer, or no gesture to forward to
    Ignored,
    /// A region claimed the press but no gesture was armed
    Claimed,
    MoveArmed,
    ResizeArmed,
    /// The active gesture tracked a move
    Dragged,
    /// The active gesture ended; `committed` if a complete notification fired
    Released { committed: bool },
}

impl PointerOutcome {
    /// True when the host should stop default grid handling (cell selection)
    pub fn is_consumed(self) -> bool {
        !matches!(self, PointerOutcome::Ignored)
    }
}

/// Cursor feedback for hover and active gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Pointer,
    Move,
    NwseResize,
    NeswResize,
}

impl CursorHint {
    pub fn for_corner(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft | Corner::BottomRight => CursorHint::NwseResize,
            Corner::TopRight | Corner::BottomLeft => CursorHint::NeswResize,
        }
    }

    /// CSS `cursor` value
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Pointer => "pointer",
            CursorHint::Move => "move",
            CursorHint::NwseResize => "nwse-resize",
            CursorHint::NeswResize => "nesw-resize",
        }
    }
}
