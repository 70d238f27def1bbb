use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{GraphicId, MapPoint};
use crate::error::SyncResult;
use crate::surface::{PopupDescriptor, PopupView};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupStats {
    pub opened: u64,
    pub moved: u64,
    pub closed: u64,
    pub failed: u64,
}

/// Drives the single popup instance shown for the active feature.
pub struct PopupCoordinator {
    view: Box<dyn PopupView>,
    shown_for: Option<GraphicId>,
    stats: PopupStats,
}

impl PopupCoordinator {
    #[must_use]
    pub fn new(view: Box<dyn PopupView>) -> Self {
        Self {
            view,
            shown_for: None,
            stats: PopupStats::default(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shown_for.is_some()
    }

    #[must_use]
    pub fn shown_for(&self) -> Option<GraphicId> {
        self.shown_for
    }

    #[must_use]
    pub fn stats(&self) -> PopupStats {
        self.stats
    }

    /// Shows `descriptor` for `owner`, reusing the open popup if there is one.
    ///
    /// On failure the popup is closed rather than left showing the previous
    /// feature's content.
    pub fn open(&mut self, owner: GraphicId, descriptor: &PopupDescriptor) -> SyncResult<()> {
        match self.view.open(descriptor) {
            Ok(()) => {
                self.shown_for = Some(owner);
                self.stats.opened += 1;
                debug!(graphic = %owner, title = %descriptor.title, "open popup");
                Ok(())
            }
            Err(err) => {
                self.stats.failed += 1;
                self.close();
                Err(err)
            }
        }
    }

    pub fn move_to(&mut self, location: MapPoint) {
        if self.shown_for.is_none() {
            return;
        }
        self.view.move_to(location);
        self.stats.moved += 1;
        trace!(x = location.x, y = location.y, "move popup");
    }

    pub fn close(&mut self) {
        if self.shown_for.take().is_none() {
            return;
        }
        self.view.close();
        self.stats.closed += 1;
        debug!("close popup");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::PopupCoordinator;
    use crate::core::{GraphicId, MapPoint};
    use crate::error::{SyncError, SyncResult};
    use crate::surface::{PopupDescriptor, PopupView};

    #[derive(Default)]
    struct ViewCalls {
        opened: Cell<u32>,
        moved: Cell<u32>,
        closed: Cell<u32>,
        fail_open: Cell<bool>,
    }

    struct CountingPopup(Rc<ViewCalls>);

    impl PopupView for CountingPopup {
        fn open(&mut self, _descriptor: &PopupDescriptor) -> SyncResult<()> {
            if self.0.fail_open.get() {
                return Err(SyncError::PopupRenderFailure("view rejected".to_owned()));
            }
            self.0.opened.set(self.0.opened.get() + 1);
            Ok(())
        }

        fn move_to(&mut self, _location: MapPoint) {
            self.0.moved.set(self.0.moved.get() + 1);
        }

        fn close(&mut self) {
            self.0.closed.set(self.0.closed.get() + 1);
        }
    }

    fn descriptor() -> PopupDescriptor {
        PopupDescriptor {
            location: MapPoint::new(1.0, 2.0),
            title: "Yukon".to_owned(),
            html_content: String::new(),
        }
    }

    fn coordinator() -> (PopupCoordinator, Rc<ViewCalls>) {
        let calls = Rc::new(ViewCalls::default());
        let coordinator = PopupCoordinator::new(Box::new(CountingPopup(calls.clone())));
        (coordinator, calls)
    }

    #[test]
    fn move_before_open_does_not_reach_view() {
        let (mut popup, calls) = coordinator();
        popup.move_to(MapPoint::new(3.0, 4.0));

        assert_eq!(calls.moved.get(), 0);
        assert_eq!(popup.stats().moved, 0);
        assert!(!popup.is_open());
    }

    #[test]
    fn close_is_idempotent() {
        let (mut popup, calls) = coordinator();
        popup.close();
        popup.open(GraphicId(9), &descriptor()).expect("open");
        popup.move_to(MapPoint::new(3.0, 4.0));
        popup.close();
        popup.close();

        assert_eq!(calls.opened.get(), 1);
        assert_eq!(calls.moved.get(), 1);
        assert_eq!(calls.closed.get(), 1);
        assert_eq!(popup.shown_for(), None);
    }

    #[test]
    fn failed_open_closes_previous_content() {
        let (mut popup, calls) = coordinator();
        popup.open(GraphicId(1), &descriptor()).expect("open");
        calls.fail_open.set(true);

        let result = popup.open(GraphicId(2), &descriptor());

        assert!(matches!(result, Err(SyncError::PopupRenderFailure(_))));
        assert!(!popup.is_open());
        assert_eq!(calls.closed.get(), 1);
        assert_eq!(popup.stats().failed, 1);
    }
}
