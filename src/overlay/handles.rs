//! Resize handle geometry.
//!
//! Cell-anchored regions expose a single bottom-right handle; floating regions
//! expose all four corners.

use crate::layout::GridSnapshot;
use crate::types::{GridRegion, Placement};

/// A region corner that can be grabbed for resizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Dragging this corner moves the left edge (x changes, right edge fixed)
    pub fn moves_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Dragging this corner moves the top edge (y changes, bottom edge fixed)
    pub fn moves_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// A handle's center in canvas-local screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub corner: Corner,
    pub x: f32,
    pub y: f32,
}

impl Handle {
    /// Square hit area: within `radius` of the center on both axes
    pub fn contains(&self, x: f32, y: f32, radius: f32) -> bool {
        (x - self.x).abs() <= radius && (y - self.y).abs() <= radius
    }
}

/// Resize handles of a region, empty when the region has no usable geometry
pub fn region_handles(region: &GridRegion, grid: &GridSnapshot<'_>) -> Vec<Handle> {
    let Some(rect) = grid.region_rect(region) else {
        return Vec::new();
    };
    match region.placement() {
        Placement::CellAnchored(_) => vec![Handle {
            corner: Corner::BottomRight,
            x: rect.right(),
            y: rect.bottom(),
        }],
        Placement::Floating(_) => Corner::ALL
            .iter()
            .map(|&corner| Handle {
                corner,
                x: if corner.moves_left() { rect.x } else { rect.right() },
                y: if corner.moves_top() { rect.y } else { rect.bottom() },
            })
            .collect(),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::layout::{GridDimensions, Viewport};
    use crate::types::{CellRange, FloatingRect};

    #[test]
    fn test_cell_region_has_single_bottom_right_handle() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region = GridRegion::cells("t", "table", CellRange::new(0, 0, 1, 1));

        let handles = region_handles(&region, &grid);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].corner, Corner::BottomRight);
        assert_eq!(handles[0].x, 40.0 + 128.0);
        assert_eq!(handles[0].y, 20.0 + 40.0);
    }

    #[test]
    fn test_floating_region_has_four_corners() {
        let config = OverlayConfig::default();
        let viewport = Viewport::new();
        let dims = GridDimensions::default();
        let grid = GridSnapshot::new(&config, &viewport, &dims);
        let region =
            GridRegion::floating("c", "chart", FloatingRect::new(100.0, 50.0, 200.0, 80.0));

        let handles = region_handles(&region, &grid);
        assert_eq!(handles.len(), 4);
        let tl = handles.iter().find(|h| h.corner == Corner::TopLeft).unwrap();
        assert_eq!((tl.x, tl.y), (140.0, 70.0));
        let br = handles
            .iter()
            .find(|h| h.corner == Corner::BottomRight)
            .unwrap();
        assert_eq!((br.x, br.y), (340.0, 150.0));
    }

    #[test]
    fn test_handle_hit_radius() {
        let handle = Handle {
            corner: Corner::BottomRight,
            x: 100.0,
            y: 100.0,
        };
        assert!(handle.contains(110.0, 90.0, 10.0));
        assert!(!handle.contains(110.5, 100.0, 10.0));
    }
}
