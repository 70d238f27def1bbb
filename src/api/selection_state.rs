use serde::{Deserialize, Serialize};

use crate::core::{Graphic, GraphicId, LayerId};
use crate::surface::{ChartElementRef, HighlightHandle};

/// A feature currently highlighted on the map (and possibly on the chart).
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveHighlight {
    pub graphic: Graphic,
    pub handle: HighlightHandle,
    pub layer: LayerId,
    pub label_key: Option<String>,
    pub chart_element: Option<ChartElementRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    Highlighted(ActiveHighlight),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    Idle,
    Highlighted,
}

/// Read-only view of the selection handed to listeners and hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub phase: SelectionPhase,
    pub graphic: Option<GraphicId>,
    pub label_key: Option<String>,
    pub highlight_handle: Option<HighlightHandle>,
    pub chart_element: Option<ChartElementRef>,
    pub layer: Option<LayerId>,
}

/// Authoritative record of the current highlight.
///
/// The handle lives inside the `Highlighted` variant, so a handle without a
/// graphic (or the reverse) is unrepresentable.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
}

impl SelectionState {
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        match self.selection {
            Selection::Idle => SelectionPhase::Idle,
            Selection::Highlighted(_) => SelectionPhase::Highlighted,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.selection, Selection::Idle)
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveHighlight> {
        match &self.selection {
            Selection::Idle => None,
            Selection::Highlighted(active) => Some(active),
        }
    }

    #[must_use]
    pub fn active_graphic(&self) -> Option<&Graphic> {
        self.active().map(|active| &active.graphic)
    }

    #[must_use]
    pub fn highlight_handle(&self) -> Option<HighlightHandle> {
        self.active().map(|active| active.handle)
    }

    #[must_use]
    pub fn chart_element(&self) -> Option<ChartElementRef> {
        self.active().and_then(|active| active.chart_element)
    }

    #[must_use]
    pub fn layer_view(&self) -> Option<&LayerId> {
        self.active().map(|active| &active.layer)
    }

    #[must_use]
    pub fn is_active(&self, id: GraphicId) -> bool {
        self.active().is_some_and(|active| active.graphic.id() == id)
    }

    /// Replaces the selection. Callers must have released the previous one.
    pub(super) fn begin(&mut self, active: ActiveHighlight) {
        debug_assert!(self.is_idle(), "previous highlight must be released first");
        self.selection = Selection::Highlighted(active);
    }

    /// Resets to `Idle`, returning what was held so it can be released.
    pub(super) fn take(&mut self) -> Option<ActiveHighlight> {
        match std::mem::take(&mut self.selection) {
            Selection::Idle => None,
            Selection::Highlighted(active) => Some(active),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            phase: self.phase(),
            graphic: self.active_graphic().map(Graphic::id),
            label_key: self.active().and_then(|active| active.label_key.clone()),
            highlight_handle: self.highlight_handle(),
            chart_element: self.chart_element(),
            layer: self.layer_view().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveHighlight, SelectionPhase, SelectionState};
    use crate::core::{Graphic, GraphicId, LayerId};
    use crate::surface::{ChartElementRef, HighlightHandle};

    fn active(id: u64) -> ActiveHighlight {
        ActiveHighlight {
            graphic: Graphic::new(GraphicId(id)),
            handle: HighlightHandle(id * 10),
            layer: LayerId::new("pointhover"),
            label_key: Some(format!("label-{id}")),
            chart_element: Some(ChartElementRef(0)),
        }
    }

    #[test]
    fn handle_present_iff_graphic_present() {
        let mut state = SelectionState::default();
        assert!(state.active_graphic().is_none());
        assert!(state.highlight_handle().is_none());

        state.begin(active(3));
        assert!(state.active_graphic().is_some());
        assert_eq!(state.highlight_handle(), Some(HighlightHandle(30)));

        let taken = state.take().expect("held highlight");
        assert_eq!(taken.graphic.id(), GraphicId(3));
        assert!(state.active_graphic().is_none());
        assert!(state.highlight_handle().is_none());
        assert!(state.take().is_none());
    }

    #[test]
    fn snapshot_reflects_active_highlight() {
        let mut state = SelectionState::default();
        assert_eq!(state.snapshot().phase, SelectionPhase::Idle);

        state.begin(active(5));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.phase, SelectionPhase::Highlighted);
        assert_eq!(snapshot.graphic, Some(GraphicId(5)));
        assert_eq!(snapshot.label_key.as_deref(), Some("label-5"));
        assert_eq!(snapshot.chart_element, Some(ChartElementRef(0)));
        assert!(state.is_active(GraphicId(5)));
        assert!(!state.is_active(GraphicId(6)));
    }
}
