//! hover-sync: keeps a map view, a chart view and an info popup in lockstep
//! while the pointer moves over the map.
//!
//! The engine is sans-IO. Hosts forward pointer events, run the hit-tests the
//! engine asks for, and implement the surface traits in [`surface`]; the
//! engine decides which feature is highlighted and drives all three surfaces.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod surface;
pub mod telemetry;

pub use api::{EngineSurfaces, SyncEngine, SyncEngineConfig};
pub use error::{SyncError, SyncResult};
