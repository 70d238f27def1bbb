mod null_surface;

pub use null_surface::{NullChartView, NullMapView, NullPopupView};

use serde::{Deserialize, Serialize};

use crate::core::{Graphic, LayerId, MapPoint, ScreenPoint};
use crate::error::SyncResult;

/// Opaque token for a highlight applied by the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightHandle(pub u64);

/// Position of a bound datum in the chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartElementRef(pub usize);

/// One chart row derived from a map feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
    pub uom: Option<String>,
}

/// Everything the popup surface needs to show one feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupDescriptor {
    pub location: MapPoint,
    pub title: String,
    pub html_content: String,
}

/// Primary (map) surface.
///
/// Hit-testing is not part of this trait: the engine hands out
/// [`crate::interaction::HitTestRequest`]s and the host resolves them on its
/// own schedule.
pub trait MapView {
    fn highlight(&mut self, layer: &LayerId, graphic: &Graphic) -> HighlightHandle;
    fn remove_highlight(&mut self, handle: HighlightHandle);
    /// Returns `None` while the view cannot project (not ready, no extent).
    fn to_map_point(&self, point: ScreenPoint) -> Option<MapPoint>;
}

/// Secondary (chart) surface. Elements are addressed by bind position.
pub trait ChartView {
    fn bind(&mut self, data: &[ChartDatum]);
    fn set_visible(&mut self, visible: bool);
    fn set_element_opacity(&mut self, element: ChartElementRef, opacity: f64);
}

/// Single reusable info popup.
pub trait PopupView {
    fn open(&mut self, descriptor: &PopupDescriptor) -> SyncResult<()>;
    /// Repositions an open popup without replaying its open transition.
    fn move_to(&mut self, location: MapPoint);
    fn close(&mut self);
}
