use crate::core::Graphic;

/// Payload of a data-changed notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataContext {
    /// The replaced feature set; each feature becomes one chart row.
    pub features: Vec<Graphic>,
    /// Labels of the selected indicators, listed in the popup.
    pub indicators: Vec<String>,
    /// Product category of the source table.
    pub category: Option<String>,
}

impl DataContext {
    #[must_use]
    pub fn new(features: Vec<Graphic>) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_indicators(mut self, indicators: Vec<String>) -> Self {
        self.indicators = indicators;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
