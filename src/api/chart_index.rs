use indexmap::IndexMap;

use crate::core::Graphic;
use crate::surface::{ChartDatum, ChartElementRef};

use super::ChartBindingConfig;

/// Chart rows for the active feature set plus a label-key lookup.
///
/// Rebuilt whenever the feature set is replaced; lookups never scan rows.
#[derive(Debug, Clone, Default)]
pub struct ChartIndex {
    data: Vec<ChartDatum>,
    by_label: IndexMap<String, ChartElementRef>,
}

impl ChartIndex {
    #[must_use]
    pub fn build(features: &[Graphic], label_field: &str, binding: &ChartBindingConfig) -> Self {
        let mut data = Vec::with_capacity(features.len());
        let mut by_label = IndexMap::with_capacity(features.len());

        for feature in features {
            let label = feature.attribute_text(label_field);
            let value = feature
                .attribute(&binding.value_field)
                .and_then(|value| value.as_number())
                .unwrap_or(0.0);
            let uom = feature.attribute_text(&binding.uom_field);

            // Unlabelled rows are charted but never matched. First row wins
            // for duplicate labels.
            if let Some(key) = label.as_deref().filter(|key| !key.is_empty()) {
                by_label
                    .entry(key.to_owned())
                    .or_insert(ChartElementRef(data.len()));
            }
            data.push(ChartDatum {
                label: label.unwrap_or_default(),
                value,
                uom,
            });
        }

        Self { data, by_label }
    }

    #[must_use]
    pub fn data(&self) -> &[ChartDatum] {
        &self.data
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn element_for(&self, label_key: &str) -> Option<ChartElementRef> {
        self.by_label.get(label_key).copied()
    }

    #[must_use]
    pub fn label_of(&self, element: ChartElementRef) -> Option<&str> {
        self.data.get(element.0).map(|datum| datum.label.as_str())
    }
}
