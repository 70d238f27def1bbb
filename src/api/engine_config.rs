use serde::{Deserialize, Serialize};

use crate::core::LayerId;
use crate::error::{SyncError, SyncResult};

use super::config_validation::validate_engine_config;

/// Attribute names and host-supplied (already localized) strings used to
/// build the info popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupContentConfig {
    #[serde(default = "default_label_field")]
    pub title_field: String,
    #[serde(default = "default_uom_field")]
    pub uom_field: String,
    #[serde(default = "default_value_field")]
    pub value_field: String,
    #[serde(default = "default_symbol_field")]
    pub symbol_field: String,
    #[serde(default = "default_null_description_field")]
    pub null_description_field: String,
    #[serde(default = "default_indicator_heading")]
    pub indicator_heading: String,
    /// `{0}` is replaced by the table URL, `{1}` by the formatted table id.
    #[serde(default = "default_table_link_template")]
    pub table_link_template: String,
    /// Base URL of the source-table viewer; no link is rendered when unset.
    #[serde(default)]
    pub table_viewer_url: Option<String>,
}

impl Default for PopupContentConfig {
    fn default() -> Self {
        Self {
            title_field: default_label_field(),
            uom_field: default_uom_field(),
            value_field: default_value_field(),
            symbol_field: default_symbol_field(),
            null_description_field: default_null_description_field(),
            indicator_heading: default_indicator_heading(),
            table_link_template: default_table_link_template(),
            table_viewer_url: None,
        }
    }
}

/// How features become chart rows and how chart emphasis is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBindingConfig {
    #[serde(default = "default_value_field")]
    pub value_field: String,
    #[serde(default = "default_uom_field")]
    pub uom_field: String,
    #[serde(default = "default_emphasized_opacity")]
    pub emphasized_opacity: f64,
    #[serde(default = "default_normal_opacity")]
    pub normal_opacity: f64,
}

impl Default for ChartBindingConfig {
    fn default() -> Self {
        Self {
            value_field: default_value_field(),
            uom_field: default_uom_field(),
            emphasized_opacity: default_emphasized_opacity(),
            normal_opacity: default_normal_opacity(),
        }
    }
}

/// Public engine bootstrap configuration.
///
/// Serializable so hosts can ship it next to the rest of their application
/// config instead of wiring every field in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEngineConfig {
    /// Layers hit-tests are scoped to.
    #[serde(default = "default_interactive_layers")]
    pub interactive_layers: Vec<LayerId>,
    /// Attribute correlating a map graphic with its chart datum.
    #[serde(default = "default_label_field")]
    pub label_field: String,
    #[serde(default)]
    pub popup: PopupContentConfig,
    #[serde(default)]
    pub chart: ChartBindingConfig,
}

impl Default for SyncEngineConfig {
    fn default() -> Self {
        Self {
            interactive_layers: default_interactive_layers(),
            label_field: default_label_field(),
            popup: PopupContentConfig::default(),
            chart: ChartBindingConfig::default(),
        }
    }
}

impl SyncEngineConfig {
    #[must_use]
    pub fn new(interactive_layers: Vec<LayerId>, label_field: impl Into<String>) -> Self {
        let label_field = label_field.into();
        Self {
            interactive_layers,
            popup: PopupContentConfig {
                title_field: label_field.clone(),
                ..PopupContentConfig::default()
            },
            label_field,
            chart: ChartBindingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_popup(mut self, popup: PopupContentConfig) -> Self {
        self.popup = popup;
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: ChartBindingConfig) -> Self {
        self.chart = chart;
        self
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(input: &str) -> SyncResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SyncError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        validate_engine_config(config)
    }

    pub fn to_json_pretty(&self) -> SyncResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::InvalidConfig(format!("failed to serialize config: {e}")))
    }
}

fn default_interactive_layers() -> Vec<LayerId> {
    vec![LayerId::new("pointhover")]
}

fn default_label_field() -> String {
    "Label".to_owned()
}

fn default_uom_field() -> String {
    "UOM".to_owned()
}

fn default_value_field() -> String {
    "Value".to_owned()
}

fn default_symbol_field() -> String {
    "Symbol".to_owned()
}

fn default_null_description_field() -> String {
    "NullDescription".to_owned()
}

fn default_indicator_heading() -> String {
    "Selected indicators".to_owned()
}

fn default_table_link_template() -> String {
    "<b>Statistics Canada.</b> Table <a href='{0}' target='_blank'>{1}</a>".to_owned()
}

fn default_emphasized_opacity() -> f64 {
    0.5
}

fn default_normal_opacity() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::SyncEngineConfig;
    use crate::core::LayerId;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = SyncEngineConfig::from_json_str(r#"{ "label_field": "Name" }"#)
            .expect("parse config");

        assert_eq!(config.label_field, "Name");
        assert_eq!(config.interactive_layers, vec![LayerId::new("pointhover")]);
        assert_eq!(config.chart.emphasized_opacity, 0.5);
        assert_eq!(config.popup.value_field, "Value");
        assert!(config.popup.table_viewer_url.is_none());
    }

    #[test]
    fn json_round_trip_preserves_layers() {
        let config = SyncEngineConfig::new(vec![LayerId::new("a"), LayerId::new("b")], "Name");
        let json = config.to_json_pretty().expect("serialize");
        let restored = SyncEngineConfig::from_json_str(&json).expect("parse");
        assert_eq!(restored, config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SyncEngineConfig::from_json_str("{").expect_err("must fail");
        assert!(err.to_string().starts_with("invalid config"));
    }
}
