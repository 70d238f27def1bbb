//! Pointer sampling and hit-test ordering.
//!
//! Every pointer move becomes a sequence-numbered [`HitTestRequest`]. The host
//! runs the query against its view and reports back through
//! [`HitTestAdapter::resolve`]; results that arrive after a newer one has
//! been applied are dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::{Graphic, LayerId, ScreenPoint};
use crate::error::{SyncError, SyncResult};

/// Layers a hit-test is allowed to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTestOptions {
    pub include: Vec<LayerId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub sequence: u64,
    pub screen_point: ScreenPoint,
}

/// Hit-test the host must run and later report with the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitTestRequest {
    pub sample: PointerSample,
    pub options: HitTestOptions,
}

impl HitTestRequest {
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sample.sequence
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitTestHit {
    pub layer: LayerId,
    pub graphic: Graphic,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitTestResponse {
    pub results: SmallVec<[HitTestHit; 2]>,
}

impl HitTestResponse {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(layer: LayerId, graphic: Graphic) -> Self {
        let mut results = SmallVec::new();
        results.push(HitTestHit { layer, graphic });
        Self { results }
    }
}

/// Failure reported by the host for one hit-test (view not ready, query error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTestError {
    pub reason: String,
}

impl HitTestError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Normalized pointer signal consumed by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Over {
        graphic: Graphic,
        layer: LayerId,
        screen_point: ScreenPoint,
    },
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardReason {
    /// A newer sample was already applied, or the sample was abandoned by a
    /// pointer-leave or invalidation.
    Stale,
    /// The sequence number was never issued.
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    Applied(PointerEvent),
    Failed(SyncError),
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTestStats {
    pub issued: u64,
    pub applied: u64,
    pub discarded: u64,
    pub failed: u64,
}

#[derive(Debug, Clone)]
pub struct HitTestAdapter {
    options: HitTestOptions,
    next_sequence: u64,
    applied_watermark: u64,
    in_flight: BTreeMap<u64, ScreenPoint>,
    stats: HitTestStats,
}

impl HitTestAdapter {
    #[must_use]
    pub fn new(interactive_layers: Vec<LayerId>) -> Self {
        Self {
            options: HitTestOptions {
                include: interactive_layers,
            },
            next_sequence: 1,
            applied_watermark: 0,
            in_flight: BTreeMap::new(),
            stats: HitTestStats::default(),
        }
    }

    pub fn set_interactive_layers(&mut self, layers: Vec<LayerId>) {
        self.options.include = layers;
    }

    #[must_use]
    pub fn options(&self) -> &HitTestOptions {
        &self.options
    }

    #[must_use]
    pub fn stats(&self) -> HitTestStats {
        self.stats
    }

    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    #[must_use]
    pub fn in_flight_len(&self) -> usize {
        self.in_flight.len()
    }

    /// Highest sequence number whose result has been applied (0 before any).
    #[must_use]
    pub fn applied_watermark(&self) -> u64 {
        self.applied_watermark
    }

    pub fn on_pointer_move(&mut self, screen_point: ScreenPoint) -> SyncResult<HitTestRequest> {
        if !screen_point.is_finite() {
            return Err(SyncError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.in_flight.insert(sequence, screen_point);
        self.stats.issued += 1;
        trace!(sequence, x = screen_point.x, y = screen_point.y, "issue hit-test");

        Ok(HitTestRequest {
            sample: PointerSample {
                sequence,
                screen_point,
            },
            options: self.options.clone(),
        })
    }

    pub fn on_pointer_leave(&mut self) -> PointerEvent {
        self.abandon_in_flight();
        PointerEvent::Clear
    }

    /// Marks every issued sample as stale so none of them can mutate state
    /// once resolved.
    pub fn abandon_in_flight(&mut self) {
        let abandoned = self.in_flight.len();
        self.in_flight.clear();
        self.applied_watermark = self.next_sequence - 1;
        if abandoned > 0 {
            trace!(abandoned, watermark = self.applied_watermark, "abandon in-flight hit-tests");
        }
    }

    pub fn resolve(
        &mut self,
        sequence: u64,
        result: Result<HitTestResponse, HitTestError>,
    ) -> SampleOutcome {
        if sequence == 0 || sequence >= self.next_sequence {
            warn!(sequence, "dropping hit-test result for unknown sample");
            self.stats.discarded += 1;
            return SampleOutcome::Discarded(DiscardReason::Unknown);
        }

        let screen_point = match self.in_flight.remove(&sequence) {
            Some(point) if sequence > self.applied_watermark => point,
            _ => {
                trace!(
                    sequence,
                    watermark = self.applied_watermark,
                    "discard stale hit-test result"
                );
                self.stats.discarded += 1;
                return SampleOutcome::Discarded(DiscardReason::Stale);
            }
        };

        self.applied_watermark = sequence;
        // Older samples still in flight can no longer win.
        self.in_flight = self.in_flight.split_off(&(sequence + 1));

        match result {
            Ok(response) => {
                self.stats.applied += 1;
                SampleOutcome::Applied(self.normalize(response, screen_point))
            }
            Err(error) => {
                self.stats.failed += 1;
                SampleOutcome::Failed(SyncError::HitTestFailure {
                    sequence,
                    reason: error.reason,
                })
            }
        }
    }

    fn normalize(&self, response: HitTestResponse, screen_point: ScreenPoint) -> PointerEvent {
        response
            .results
            .into_iter()
            .find(|hit| self.options.include.contains(&hit.layer))
            .map_or(PointerEvent::Clear, |hit| PointerEvent::Over {
                graphic: hit.graphic,
                layer: hit.layer,
                screen_point,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DiscardReason, HitTestAdapter, HitTestError, HitTestResponse, PointerEvent, SampleOutcome,
    };
    use crate::core::{Graphic, GraphicId, LayerId, ScreenPoint};

    fn adapter() -> HitTestAdapter {
        HitTestAdapter::new(vec![LayerId::new("pointhover")])
    }

    fn hit(id: u64) -> HitTestResponse {
        HitTestResponse::single(LayerId::new("pointhover"), Graphic::new(GraphicId(id)))
    }

    #[test]
    fn sequence_numbers_increase_per_move() {
        let mut adapter = adapter();
        let first = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        let second = adapter.on_pointer_move(ScreenPoint::new(2.0, 1.0)).expect("move");
        assert_eq!(first.sequence(), 1);
        assert_eq!(second.sequence(), 2);
        assert_eq!(adapter.in_flight_len(), 2);
    }

    #[test]
    fn older_result_arriving_late_is_discarded() {
        let mut adapter = adapter();
        let first = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        let second = adapter.on_pointer_move(ScreenPoint::new(2.0, 1.0)).expect("move");

        let newer = adapter.resolve(second.sequence(), Ok(hit(2)));
        assert!(matches!(newer, SampleOutcome::Applied(PointerEvent::Over { .. })));

        let older = adapter.resolve(first.sequence(), Ok(hit(1)));
        assert_eq!(older, SampleOutcome::Discarded(DiscardReason::Stale));
        assert!(!adapter.has_in_flight());
        assert_eq!(adapter.stats().discarded, 1);
    }

    #[test]
    fn in_order_results_both_apply() {
        let mut adapter = adapter();
        let first = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        let second = adapter.on_pointer_move(ScreenPoint::new(2.0, 1.0)).expect("move");

        assert!(matches!(
            adapter.resolve(first.sequence(), Ok(hit(1))),
            SampleOutcome::Applied(_)
        ));
        assert!(matches!(
            adapter.resolve(second.sequence(), Ok(hit(2))),
            SampleOutcome::Applied(_)
        ));
        assert_eq!(adapter.applied_watermark(), 2);
    }

    #[test]
    fn hits_outside_interactive_layers_clear() {
        let mut adapter = adapter();
        let request = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        let response = HitTestResponse::single(LayerId::new("basemap"), Graphic::new(GraphicId(9)));

        assert_eq!(
            adapter.resolve(request.sequence(), Ok(response)),
            SampleOutcome::Applied(PointerEvent::Clear)
        );
    }

    #[test]
    fn pointer_leave_abandons_pending_samples() {
        let mut adapter = adapter();
        let request = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        assert_eq!(adapter.on_pointer_leave(), PointerEvent::Clear);
        assert!(!adapter.has_in_flight());

        assert_eq!(
            adapter.resolve(request.sequence(), Ok(hit(1))),
            SampleOutcome::Discarded(DiscardReason::Stale)
        );
    }

    #[test]
    fn unknown_and_failed_samples() {
        let mut adapter = adapter();
        assert_eq!(
            adapter.resolve(5, Ok(HitTestResponse::empty())),
            SampleOutcome::Discarded(DiscardReason::Unknown)
        );

        let request = adapter.on_pointer_move(ScreenPoint::new(1.0, 1.0)).expect("move");
        let outcome = adapter.resolve(request.sequence(), Err(HitTestError::new("view not ready")));
        assert!(matches!(outcome, SampleOutcome::Failed(_)));
        assert_eq!(adapter.stats().failed, 1);
    }

    #[test]
    fn non_finite_pointer_is_rejected() {
        let mut adapter = adapter();
        assert!(adapter.on_pointer_move(ScreenPoint::new(f64::NAN, 0.0)).is_err());
        assert_eq!(adapter.stats().issued, 0);
    }
}
