//! Region model shared by every overlay feature.

use serde::{Deserialize, Serialize};

use super::CellRange;

/// Largest per-field difference, in pixels, still treated as unchanged
pub const RECT_TOLERANCE: f32 = 0.01;

/// Pixel placement of a floating region, in sheet space (independent of scroll)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatingRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatingRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Degrade non-finite or negative fields to zero.
    pub fn sanitized(&self) -> Self {
        let clean = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            x: clean(self.x),
            y: clean(self.y),
            width: clean(self.width),
            height: clean(self.height),
        }
    }

    /// Field-wise comparison within [`RECT_TOLERANCE`]. NaN fields never match.
    pub fn approx_eq(&self, other: &FloatingRect) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() <= RECT_TOLERANCE;
        close(self.x, other.x)
            && close(self.y, other.y)
            && close(self.width, other.width)
            && close(self.height, other.height)
    }
}

/// Opaque payload owned by the registering feature.
///
/// The overlay layer only clones it into emitted events.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionData(serde_json::Value);

impl RegionData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RegionData {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The placement model that governs a region's on-screen geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Snapped to row/column boundaries (tables, pivots)
    CellAnchored(CellRange),
    /// Free pixel placement (charts, images)
    Floating(FloatingRect),
}

/// A rectangular area of the grid claimed by a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRegion {
    /// Globally unique id, owned by the registering feature
    pub id: String,
    /// Discriminator used to route rendering and hit-testing
    #[serde(rename = "type")]
    pub region_type: String,
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
    /// Present only for pixel-anchored regions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating: Option<FloatingRect>,
    #[serde(default)]
    pub data: RegionData,
}

impl GridRegion {
    /// Create a cell-anchored region
    pub fn cells(
        id: impl Into<String>,
        region_type: impl Into<String>,
        range: CellRange,
    ) -> Self {
        Self {
            id: id.into(),
            region_type: region_type.into(),
            start_row: range.start_row,
            start_col: range.start_col,
            end_row: range.end_row,
            end_col: range.end_col,
            floating: None,
            data: RegionData::default(),
        }
    }

    /// Create a floating region. Cell bounds are left at the origin cell.
    pub fn floating(
        id: impl Into<String>,
        region_type: impl Into<String>,
        rect: FloatingRect,
    ) -> Self {
        Self {
            id: id.into(),
            region_type: region_type.into(),
            start_row: 0,
            start_col: 0,
            end_row: 0,
            end_col: 0,
            floating: Some(rect),
            data: RegionData::default(),
        }
    }

    /// Attach a feature payload
    pub fn with_data(mut self, data: impl Into<RegionData>) -> Self {
        self.data = data.into();
        self
    }

    /// Logical cell bounds, regardless of placement model
    pub fn cell_range(&self) -> CellRange {
        CellRange::new(self.start_row, self.start_col, self.end_row, self.end_col)
    }

    /// Placement model governing geometry. `floating` wins when both are set.
    pub fn placement(&self) -> Placement {
        match self.floating {
            Some(rect) => Placement::Floating(rect),
            None => Placement::CellAnchored(self.cell_range()),
        }
    }

    pub fn is_floating(&self) -> bool {
        self.floating.is_some()
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
    fn test_floating_wins_when_both_present() {
        let mut region = GridRegion::cells("t1", "table", CellRange::new(1, 1, 4, 4));
        region.floating = Some(FloatingRect::new(10.0, 20.0, 100.0, 50.0));
        assert!(matches!(region.placement(), Placement::Floating(_)));
    }

    #[test]
    fn test_region_json_shape() {
        let region = GridRegion::floating("c1", "chart", FloatingRect::new(1.0, 2.0, 3.0, 4.0))
            .with_data(serde_json::json!({"chartId": 7}));
        let json = serde_json::to_value(&region).unwrap();
        assert_eq!(json["type"], "chart");
        assert_eq!(json["startRow"], 0);
        assert_eq!(json["floating"]["width"], 3.0);
        assert_eq!(json["data"]["chartId"], 7);

        let back: GridRegion = serde_json::from_value(json).unwrap();
        assert_eq!(back, region);
    }

    #[test]
    fn test_region_without_data_or_floating_parses() {
        let region: GridRegion = serde_json::from_str(
            r#"{"id":"b1","type":"bookmark","startRow":3,"startCol":2,"endRow":3,"endCol":2}"#,
        )
        .unwrap();
        assert!(!region.is_floating());
        assert_eq!(region.data.as_value(), &serde_json::Value::Null);
    }

    #[test]
    fn test_sanitized_clamps_garbage() {
        let rect = FloatingRect::new(f32::NAN, -5.0, f32::INFINITY, 12.0).sanitized();
        assert_eq!(rect, FloatingRect::new(0.0, 0.0, 0.0, 12.0));
    }
}
