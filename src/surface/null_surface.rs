use crate::core::{Graphic, LayerId, MapPoint, ScreenPoint};
use crate::error::SyncResult;

use super::{
    ChartDatum, ChartElementRef, ChartView, HighlightHandle, MapView, PopupDescriptor, PopupView,
};

/// Headless map view: hands out sequential handles and projects screen
/// points one-to-one.
#[derive(Debug, Default)]
pub struct NullMapView {
    next_handle: u64,
    pub active_highlights: usize,
}

impl MapView for NullMapView {
    fn highlight(&mut self, _layer: &LayerId, _graphic: &Graphic) -> HighlightHandle {
        self.next_handle += 1;
        self.active_highlights += 1;
        HighlightHandle(self.next_handle)
    }

    fn remove_highlight(&mut self, _handle: HighlightHandle) {
        self.active_highlights = self.active_highlights.saturating_sub(1);
    }

    fn to_map_point(&self, point: ScreenPoint) -> Option<MapPoint> {
        Some(MapPoint::new(point.x, point.y))
    }
}

#[derive(Debug, Default)]
pub struct NullChartView {
    pub bound_len: usize,
    pub visible: bool,
}

impl ChartView for NullChartView {
    fn bind(&mut self, data: &[ChartDatum]) {
        self.bound_len = data.len();
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_element_opacity(&mut self, _element: ChartElementRef, _opacity: f64) {}
}

#[derive(Debug, Default)]
pub struct NullPopupView {
    pub open: bool,
}

impl PopupView for NullPopupView {
    fn open(&mut self, _descriptor: &PopupDescriptor) -> SyncResult<()> {
        self.open = true;
        Ok(())
    }

    fn move_to(&mut self, _location: MapPoint) {}

    fn close(&mut self) {
        self.open = false;
    }
}
