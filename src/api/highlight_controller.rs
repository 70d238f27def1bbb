use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Graphic, LayerId, MapPoint, ScreenPoint};
use crate::surface::{ChartDatum, ChartElementRef, ChartView, HighlightHandle, MapView};

use super::{ChartBindingConfig, ChartIndex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStats {
    pub acquired: u64,
    pub released: u64,
    pub chart_emphasized: u64,
    pub chart_restored: u64,
}

/// Owns highlight decoration on both surfaces.
///
/// Tracks which map handle and chart element are live so that releasing
/// something already released (or never acquired) is a no-op.
pub struct HighlightController {
    map: Box<dyn MapView>,
    chart: Box<dyn ChartView>,
    index: ChartIndex,
    emphasized_opacity: f64,
    normal_opacity: f64,
    live_handle: Option<HighlightHandle>,
    live_element: Option<ChartElementRef>,
    stats: HighlightStats,
}

impl HighlightController {
    #[must_use]
    pub fn new(
        map: Box<dyn MapView>,
        chart: Box<dyn ChartView>,
        binding: &ChartBindingConfig,
    ) -> Self {
        Self {
            map,
            chart,
            index: ChartIndex::default(),
            emphasized_opacity: binding.emphasized_opacity,
            normal_opacity: binding.normal_opacity,
            live_handle: None,
            live_element: None,
            stats: HighlightStats::default(),
        }
    }

    pub(super) fn apply_binding(&mut self, binding: &ChartBindingConfig) {
        self.emphasized_opacity = binding.emphasized_opacity;
        self.normal_opacity = binding.normal_opacity;
    }

    #[must_use]
    pub fn stats(&self) -> HighlightStats {
        self.stats
    }

    #[must_use]
    pub fn live_handle(&self) -> Option<HighlightHandle> {
        self.live_handle
    }

    #[must_use]
    pub fn live_chart_element(&self) -> Option<ChartElementRef> {
        self.live_element
    }

    #[must_use]
    pub fn chart_index(&self) -> &ChartIndex {
        &self.index
    }

    #[must_use]
    pub fn chart_data(&self) -> &[ChartDatum] {
        self.index.data()
    }

    #[must_use]
    pub fn to_map_point(&self, point: ScreenPoint) -> Option<MapPoint> {
        self.map.to_map_point(point)
    }

    /// Highlights `graphic` on the map. A still-live handle is released
    /// first so at most one map highlight exists.
    pub fn acquire(&mut self, layer: &LayerId, graphic: &Graphic) -> HighlightHandle {
        if let Some(previous) = self.live_handle {
            self.release(previous);
        }
        let handle = self.map.highlight(layer, graphic);
        self.live_handle = Some(handle);
        self.stats.acquired += 1;
        debug!(graphic = %graphic.id(), layer = %layer, handle = handle.0, "acquire highlight");
        handle
    }

    pub fn release(&mut self, handle: HighlightHandle) {
        if self.live_handle != Some(handle) {
            trace!(handle = handle.0, "release of inactive highlight ignored");
            return;
        }
        self.map.remove_highlight(handle);
        self.live_handle = None;
        self.stats.released += 1;
        debug!(handle = handle.0, "release highlight");
    }

    /// Emphasizes the chart element bound to `label_key`. A missing label or
    /// a label absent from the chart yields `None` without touching the chart.
    pub fn acquire_chart(&mut self, label_key: Option<&str>) -> Option<ChartElementRef> {
        let element = label_key.and_then(|key| self.index.element_for(key));
        let Some(element) = element else {
            trace!(label = ?label_key, "no chart element for label");
            return None;
        };
        if let Some(previous) = self.live_element {
            self.release_chart(previous);
        }
        self.chart.set_element_opacity(element, self.emphasized_opacity);
        self.live_element = Some(element);
        self.stats.chart_emphasized += 1;
        Some(element)
    }

    pub fn release_chart(&mut self, element: ChartElementRef) {
        if self.live_element != Some(element) {
            return;
        }
        self.chart.set_element_opacity(element, self.normal_opacity);
        self.live_element = None;
        self.stats.chart_restored += 1;
    }

    /// Drops every live decoration regardless of what the caller believes is
    /// held. Used when the underlying graphics may already be gone.
    pub(super) fn release_all(&mut self) {
        if let Some(handle) = self.live_handle {
            self.release(handle);
        }
        if let Some(element) = self.live_element {
            self.release_chart(element);
        }
    }

    /// Replaces chart rows and rebinds the chart view. Any emphasis must have
    /// been released by the caller; element refs from the old index are void.
    pub(super) fn rebind_chart(&mut self, index: ChartIndex) {
        self.live_element = None;
        self.index = index;
        self.chart.bind(self.index.data());
        self.chart.set_visible(!self.index.is_empty());
        debug!(rows = self.index.len(), "rebind chart data");
    }
}
