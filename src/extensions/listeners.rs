use serde::Serialize;

use crate::api::{SelectionPhase, SelectionSnapshot};
use crate::core::GraphicId;
use crate::error::SyncError;

/// Read-only state snapshot passed to listener hooks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListenerContext {
    pub selection: SelectionSnapshot,
    pub busy: bool,
    pub chart_rows: usize,
}

/// Event stream exposed to host surfaces (waiting indicator, error display).
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A hit-test or data load is pending.
    Busy,
    /// Nothing is pending any more.
    Idle,
    Error(SyncError),
    SelectionChanged {
        phase: SelectionPhase,
        graphic: Option<GraphicId>,
    },
}

/// Observer hook for engine events.
///
/// Listeners see snapshots only; they cannot reach the selection itself.
pub trait EngineListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &EngineEvent, context: &ListenerContext);
}
