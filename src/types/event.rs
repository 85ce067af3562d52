//! Notification payloads emitted by the interaction state machines.

use serde::Serialize;

use super::{CellRange, FloatingRect, GridRegion, RegionData};

/// A region was pressed and armed for interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSelected {
    pub region_id: String,
    pub region_type: String,
    pub data: RegionData,
}

/// Candidate (preview) or final (complete) position of a floating region move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveEvent {
    pub region_id: String,
    pub region_type: String,
    pub data: RegionData,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Geometry carried by a resize notification, per placement model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResizeGeometry {
    Cells(CellRange),
    Floating(FloatingRect),
}

/// Candidate (preview) or final (complete) bounds of a region resize
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeEvent {
    pub region_id: String,
    pub region_type: String,
    pub data: RegionData,
    #[serde(flatten)]
    pub geometry: ResizeGeometry,
}

/// Discriminant of an [`OverlayEvent`], used for per-kind subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RegionSelected,
    MovePreview,
    MoveComplete,
    ResizePreview,
    ResizeComplete,
}

/// Every notification the overlay layer can emit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OverlayEvent {
    RegionSelected(RegionSelected),
    MovePreview(MoveEvent),
    MoveComplete(MoveEvent),
    ResizePreview(ResizeEvent),
    ResizeComplete(ResizeEvent),
}

impl OverlayEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RegionSelected(_) => EventKind::RegionSelected,
            Self::MovePreview(_) => EventKind::MovePreview,
            Self::MoveComplete(_) => EventKind::MoveComplete,
            Self::ResizePreview(_) => EventKind::ResizePreview,
            Self::ResizeComplete(_) => EventKind::ResizeComplete,
        }
    }

    pub fn region_id(&self) -> &str {
        match self {
            Self::RegionSelected(e) => &e.region_id,
            Self::MovePreview(e) | Self::MoveComplete(e) => &e.region_id,
            Self::ResizePreview(e) | Self::ResizeComplete(e) => &e.region_id,
        }
    }
}

impl RegionSelected {
    pub(crate) fn for_region(region: &GridRegion) -> Self {
        Self {
            region_id: region.id.clone(),
            region_type: region.region_type.clone(),
            data: region.data.clone(),
        }
    }
}

impl MoveEvent {
    pub(crate) fn for_region(region: &GridRegion, rect: FloatingRect) -> Self {
        Self {
            region_id: region.id.clone(),
            region_type: region.region_type.clone(),
            data: region.data.clone(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl ResizeEvent {
    pub(crate) fn for_region(region: &GridRegion, geometry: ResizeGeometry) -> Self {
        Self {
            region_id: region.id.clone(),
            region_type: region.region_type.clone(),
            data: region.data.clone(),
            geometry,
        }
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

    #[test]
    fn test_resize_event_flattens_geometry() {
        let region = GridRegion::cells("t1", "table", CellRange::new(2, 1, 5, 3));
        let event = OverlayEvent::ResizeComplete(ResizeEvent::for_region(
            &region,
            ResizeGeometry::Cells(CellRange::new(2, 1, 7, 4)),
        ));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "resizeComplete");
        assert_eq!(json["regionId"], "t1");
        assert_eq!(json["regionType"], "table");
        assert_eq!(json["endRow"], 7);
        assert_eq!(json["endCol"], 4);
        assert_eq!(json["startRow"], 2);
    }

    #[test]
    fn test_move_event_carries_position() {
        let region = GridRegion::floating("c1", "chart", FloatingRect::new(0.0, 0.0, 10.0, 10.0));
        let event = OverlayEvent::MovePreview(MoveEvent::for_region(
            &region,
            FloatingRect::new(5.0, 6.0, 10.0, 10.0),
        ));
        assert_eq!(event.kind(), EventKind::MovePreview);
        assert_eq!(event.region_id(), "c1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["x"], 5.0);
        assert_eq!(json["y"], 6.0);
    }
}
