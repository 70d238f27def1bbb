mod chart_index;
mod config_validation;
mod data_context;
mod engine;
mod engine_config;
mod engine_snapshot;
mod event_dispatch;
mod highlight_controller;
mod lifecycle_controller;
mod listener_registry;
mod pointer_controller;
mod popup_content;
mod popup_coordinator;
mod selection_state;

pub use chart_index::ChartIndex;
pub use data_context::DataContext;
pub use engine::{EngineSurfaces, LabelKeyExtractor, SyncEngine};
pub use engine_config::{ChartBindingConfig, PopupContentConfig, SyncEngineConfig};
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1, SyncDiagnostics,
};
pub use highlight_controller::{HighlightController, HighlightStats};
pub use popup_content::describe_feature;
pub use popup_coordinator::{PopupCoordinator, PopupStats};
pub use selection_state::{
    ActiveHighlight, Selection, SelectionPhase, SelectionSnapshot, SelectionState,
};
