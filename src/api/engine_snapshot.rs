use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};
use crate::interaction::HitTestStats;

use super::{HighlightStats, PopupStats, SelectionSnapshot, SyncEngine};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Counters for every surface the engine drives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDiagnostics {
    pub hit_tests: HitTestStats,
    pub highlights: HighlightStats,
    pub popup: PopupStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub selection: SelectionSnapshot,
    pub busy: bool,
    pub popup_open: bool,
    pub chart_rows: usize,
    pub in_flight_hit_tests: usize,
    pub diagnostics: SyncDiagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SyncResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SyncError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }
}

impl SyncEngine {
    #[must_use]
    pub fn diagnostics(&self) -> SyncDiagnostics {
        SyncDiagnostics {
            hit_tests: self.adapter.stats(),
            highlights: self.highlights.stats(),
            popup: self.popup.stats(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            selection: self.selection.snapshot(),
            busy: self.busy,
            popup_open: self.popup.is_open(),
            chart_rows: self.highlights.chart_index().len(),
            in_flight_hit_tests: self.adapter.in_flight_len(),
            diagnostics: self.diagnostics(),
        }
    }
}
