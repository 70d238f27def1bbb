use crate::core::Graphic;
use crate::error::SyncResult;
use crate::extensions::EngineListener;
use crate::interaction::HitTestAdapter;
use crate::surface::{ChartView, MapView, PopupView};

use super::config_validation::validate_engine_config;
use super::{
    DataContext, HighlightController, PopupCoordinator, SelectionState, SyncEngineConfig,
};

/// Derives the label key correlating a map graphic with its chart datum.
pub type LabelKeyExtractor = Box<dyn Fn(&Graphic) -> Option<String>>;

pub(super) enum LabelKeySource {
    /// Text of the configured `label_field` attribute.
    Attribute,
    Custom(LabelKeyExtractor),
}

/// The three collaborator surfaces the engine drives.
pub struct EngineSurfaces {
    pub map: Box<dyn MapView>,
    pub chart: Box<dyn ChartView>,
    pub popup: Box<dyn PopupView>,
}

impl EngineSurfaces {
    #[must_use]
    pub fn new(
        map: impl MapView + 'static,
        chart: impl ChartView + 'static,
        popup: impl PopupView + 'static,
    ) -> Self {
        Self {
            map: Box::new(map),
            chart: Box::new(chart),
            popup: Box::new(popup),
        }
    }
}

/// Keeps map highlight, chart emphasis and the info popup in sync with the
/// feature under the pointer.
///
/// The engine is driven from a single UI loop: every method takes `&mut self`
/// and runs to completion. Hit-tests are the only asynchronous step; see
/// [`SyncEngine::pointer_move`] and [`SyncEngine::hit_test_resolved`].
pub struct SyncEngine {
    pub(super) config: SyncEngineConfig,
    pub(super) adapter: HitTestAdapter,
    pub(super) selection: SelectionState,
    pub(super) highlights: HighlightController,
    pub(super) popup: PopupCoordinator,
    pub(super) context: DataContext,
    pub(super) label_key: LabelKeySource,
    pub(super) listeners: Vec<Box<dyn EngineListener>>,
    pub(super) data_loading: bool,
    pub(super) busy: bool,
}

impl SyncEngine {
    pub fn new(surfaces: EngineSurfaces, config: SyncEngineConfig) -> SyncResult<Self> {
        let config = validate_engine_config(config)?;
        let EngineSurfaces { map, chart, popup } = surfaces;

        Ok(Self {
            adapter: HitTestAdapter::new(config.interactive_layers.clone()),
            selection: SelectionState::default(),
            highlights: HighlightController::new(map, chart, &config.chart),
            popup: PopupCoordinator::new(popup),
            context: DataContext::default(),
            label_key: LabelKeySource::Attribute,
            listeners: Vec::new(),
            data_loading: false,
            busy: false,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SyncEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn highlights(&self) -> &HighlightController {
        &self.highlights
    }

    #[must_use]
    pub fn popup(&self) -> &PopupCoordinator {
        &self.popup
    }

    #[must_use]
    pub fn hit_tests(&self) -> &HitTestAdapter {
        &self.adapter
    }

    #[must_use]
    pub fn data_context(&self) -> &DataContext {
        &self.context
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Overrides how label keys are read from map graphics. Chart rows keep
    /// using `label_field`.
    pub fn set_label_key_extractor(
        &mut self,
        extractor: impl Fn(&Graphic) -> Option<String> + 'static,
    ) {
        self.label_key = LabelKeySource::Custom(Box::new(extractor));
    }

    pub fn reset_label_key_extractor(&mut self) {
        self.label_key = LabelKeySource::Attribute;
    }

    pub(super) fn label_key_of(&self, graphic: &Graphic) -> Option<String> {
        match &self.label_key {
            LabelKeySource::Attribute => graphic.attribute_text(&self.config.label_field),
            LabelKeySource::Custom(extractor) => extractor(graphic),
        }
    }
}
