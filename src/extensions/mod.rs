//! Host-facing hooks live here.
//!
//! Keep listeners observational; they must not feed back into transitions.

pub mod listeners;

pub use listeners::{EngineEvent, EngineListener, ListenerContext};
