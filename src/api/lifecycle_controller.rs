use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};
use crate::extensions::EngineEvent;

use super::config_validation::validate_engine_config;
use super::{ChartIndex, DataContext, SyncEngine, SyncEngineConfig};

impl SyncEngine {
    /// Signals that a replacement feature set is being fetched.
    pub fn begin_data_load(&mut self) {
        self.data_loading = true;
        self.sync_busy_state();
    }

    /// The active feature set was replaced (indicator switch, row removal).
    ///
    /// Forces `Idle` before rebinding: the previous graphics and chart rows
    /// may no longer exist.
    pub fn data_changed(&mut self, context: DataContext) {
        self.force_idle("data changed");
        let index = ChartIndex::build(
            &context.features,
            &self.config.label_field,
            &self.config.chart,
        );
        self.highlights.rebind_chart(index);
        debug!(
            features = context.features.len(),
            indicators = context.indicators.len(),
            "data context replaced"
        );
        self.context = context;
        self.data_loading = false;
        self.sync_busy_state();
    }

    /// A pending load failed; the current feature set stays in place.
    pub fn data_load_failed(&mut self, error: SyncError) {
        warn!(error = %error, "data load failed");
        self.data_loading = false;
        self.emit_event(EngineEvent::Error(error));
        self.sync_busy_state();
    }

    /// The map view was invalidated (extent reset, layer view rebuilt).
    pub fn view_changed(&mut self) {
        self.force_idle("view changed");
        self.sync_busy_state();
    }

    /// Swaps configuration at runtime. Clears the selection and rebuilds
    /// chart rows from the current feature set.
    pub fn set_config(&mut self, config: SyncEngineConfig) -> SyncResult<()> {
        let config = validate_engine_config(config)?;
        self.force_idle("config changed");

        self.adapter
            .set_interactive_layers(config.interactive_layers.clone());
        self.highlights.apply_binding(&config.chart);
        let index = ChartIndex::build(&self.context.features, &config.label_field, &config.chart);
        self.highlights.rebind_chart(index);
        self.config = config;
        self.sync_busy_state();
        Ok(())
    }
}
