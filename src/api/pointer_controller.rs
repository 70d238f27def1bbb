use tracing::{debug, trace, warn};

use crate::core::{Graphic, LayerId, MapPoint, ScreenPoint};
use crate::error::{SyncError, SyncResult};
use crate::extensions::EngineEvent;
use crate::interaction::{
    HitTestError, HitTestRequest, HitTestResponse, PointerEvent, SampleOutcome,
};

use super::popup_content::describe_feature;
use super::{ActiveHighlight, SyncEngine};

impl SyncEngine {
    /// Records a pointer move and returns the hit-test the host must run.
    ///
    /// The result goes back through [`SyncEngine::hit_test_resolved`] with the
    /// request's sequence number, in whatever order the host's queries finish.
    pub fn pointer_move(&mut self, point: ScreenPoint) -> SyncResult<HitTestRequest> {
        let request = self.adapter.on_pointer_move(point)?;
        self.sync_busy_state();
        Ok(request)
    }

    /// Pointer left the map: clears the selection and abandons every
    /// in-flight hit-test.
    pub fn pointer_leave(&mut self) {
        let event = self.adapter.on_pointer_leave();
        self.apply_pointer_event(event);
        self.sync_busy_state();
    }

    /// Feeds a finished hit-test back into the engine.
    ///
    /// Returns `true` when the sample was current and drove a transition
    /// (including a failure forcing `Idle`), `false` when it was discarded.
    /// Failures are reported as [`EngineEvent::Error`], never returned.
    pub fn hit_test_resolved(
        &mut self,
        sequence: u64,
        result: Result<HitTestResponse, HitTestError>,
    ) -> bool {
        let applied = match self.adapter.resolve(sequence, result) {
            SampleOutcome::Applied(event) => {
                self.apply_pointer_event(event);
                true
            }
            SampleOutcome::Failed(error) => {
                warn!(error = %error, "hit-test failed, clearing selection");
                self.clear_selection();
                self.emit_event(EngineEvent::Error(error));
                true
            }
            SampleOutcome::Discarded(_) => false,
        };
        self.sync_busy_state();
        applied
    }

    pub(super) fn apply_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Over {
                graphic,
                layer,
                screen_point,
            } => {
                let location = self.highlights.to_map_point(screen_point);
                if self.selection.is_active(graphic.id()) {
                    self.reposition_popup(location);
                    return;
                }
                self.release_selection();
                self.highlight(graphic, layer, location);
            }
            PointerEvent::Clear => self.clear_selection(),
        }
    }

    fn highlight(&mut self, graphic: Graphic, layer: LayerId, location: Option<MapPoint>) {
        let label_key = self.label_key_of(&graphic);
        let handle = self.highlights.acquire(&layer, &graphic);
        let chart_element = self.highlights.acquire_chart(label_key.as_deref());
        debug!(
            graphic = %graphic.id(),
            label = ?label_key,
            chart_element = ?chart_element.map(|element| element.0),
            "highlight feature"
        );

        self.selection.begin(ActiveHighlight {
            graphic,
            handle,
            layer,
            label_key,
            chart_element,
        });
        self.emit_selection_changed();
        self.open_popup(location);
    }

    fn reposition_popup(&mut self, location: Option<MapPoint>) {
        if !self.popup.is_open() {
            // A previous open failed; try again now that the pointer moved.
            self.open_popup(location);
            return;
        }
        match location {
            Some(location) => self.popup.move_to(location),
            None => trace!("pointer not projectable, popup left in place"),
        }
    }

    fn open_popup(&mut self, location: Option<MapPoint>) {
        let Some(active) = self.selection.active() else {
            return;
        };
        let owner = active.graphic.id();
        let descriptor = location
            .ok_or_else(|| {
                SyncError::PopupRenderFailure(
                    "map view cannot project the pointer position".to_owned(),
                )
            })
            .and_then(|location| {
                describe_feature(&self.config.popup, &self.context, &active.graphic, location)
            });

        let opened = descriptor.and_then(|descriptor| self.popup.open(owner, &descriptor));
        if let Err(error) = opened {
            // The highlight stands even without a popup.
            warn!(graphic = %owner, error = %error, "popup could not be shown");
            self.popup.close();
            self.emit_event(EngineEvent::Error(error));
        }
    }

    /// Releases map highlight then chart emphasis of the current selection.
    /// Leaves the popup alone so a following highlight can reuse it.
    pub(super) fn release_selection(&mut self) -> bool {
        let Some(previous) = self.selection.take() else {
            return false;
        };
        self.highlights.release(previous.handle);
        if let Some(element) = previous.chart_element {
            self.highlights.release_chart(element);
        }
        debug!(graphic = %previous.graphic.id(), "release feature");
        true
    }

    pub(super) fn clear_selection(&mut self) {
        let changed = self.release_selection();
        self.popup.close();
        if changed {
            self.emit_selection_changed();
        }
    }

    /// Unconditional teardown for data or view invalidation: in-flight
    /// samples are abandoned and every live decoration is dropped even if
    /// the selection already looks idle.
    pub(super) fn force_idle(&mut self, cause: &'static str) {
        self.adapter.abandon_in_flight();
        let changed = self.release_selection();
        self.highlights.release_all();
        self.popup.close();
        debug!(cause, "forced idle");
        if changed {
            self.emit_selection_changed();
        }
    }
}
