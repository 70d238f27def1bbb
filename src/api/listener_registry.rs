use crate::error::{SyncError, SyncResult};
use crate::extensions::EngineListener;

use super::SyncEngine;

impl SyncEngine {
    /// Registers a listener with unique identifier.
    pub fn register_listener(&mut self, listener: Box<dyn EngineListener>) -> SyncResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(SyncError::InvalidData(
                "listener id must not be empty".to_owned(),
            ));
        }
        if self.listener_position(&listener_id).is_some() {
            return Err(SyncError::InvalidData(format!(
                "listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        let Some(position) = self.listener_position(listener_id) else {
            return false;
        };
        self.listeners.remove(position);
        true
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listener_position(listener_id).is_some()
    }

    fn listener_position(&self, listener_id: &str) -> Option<usize> {
        self.listeners
            .iter()
            .position(|listener| listener.id() == listener_id)
    }
}
