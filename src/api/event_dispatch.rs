use crate::extensions::{EngineEvent, ListenerContext};

use super::SyncEngine;

impl SyncEngine {
    pub(super) fn listener_context(&self) -> ListenerContext {
        ListenerContext {
            selection: self.selection.snapshot(),
            busy: self.busy,
            chart_rows: self.highlights.chart_index().len(),
        }
    }

    pub(super) fn emit_event(&mut self, event: EngineEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let context = self.listener_context();
        for listener in &mut self.listeners {
            listener.on_event(&event, &context);
        }
    }

    pub(super) fn emit_selection_changed(&mut self) {
        let event = EngineEvent::SelectionChanged {
            phase: self.selection.phase(),
            graphic: self.selection.active_graphic().map(|graphic| graphic.id()),
        };
        self.emit_event(event);
    }

    /// Emits `Busy`/`Idle` on edges of "hit-test in flight or data load
    /// pending".
    pub(super) fn sync_busy_state(&mut self) {
        let busy = self.adapter.has_in_flight() || self.data_loading;
        if busy == self.busy {
            return;
        }
        self.busy = busy;
        self.emit_event(if busy {
            EngineEvent::Busy
        } else {
            EngineEvent::Idle
        });
    }
}
