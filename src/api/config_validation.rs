use crate::error::{SyncError, SyncResult};

use super::{ChartBindingConfig, PopupContentConfig, SyncEngineConfig};

pub(super) fn validate_engine_config(config: SyncEngineConfig) -> SyncResult<SyncEngineConfig> {
    if config.interactive_layers.is_empty() {
        return Err(SyncError::InvalidConfig(
            "at least one interactive layer is required".to_owned(),
        ));
    }
    if config
        .interactive_layers
        .iter()
        .any(|layer| layer.as_str().trim().is_empty())
    {
        return Err(SyncError::InvalidConfig(
            "interactive layer names must not be empty".to_owned(),
        ));
    }
    require_field("label_field", &config.label_field)?;
    validate_popup_content_config(&config.popup)?;
    validate_chart_binding_config(&config.chart)?;
    Ok(config)
}

fn validate_popup_content_config(config: &PopupContentConfig) -> SyncResult<()> {
    require_field("popup.title_field", &config.title_field)?;
    require_field("popup.uom_field", &config.uom_field)?;
    require_field("popup.value_field", &config.value_field)?;
    require_field("popup.symbol_field", &config.symbol_field)?;
    require_field("popup.null_description_field", &config.null_description_field)?;
    if config.table_viewer_url.as_deref().is_some_and(str::is_empty) {
        return Err(SyncError::InvalidConfig(
            "popup.table_viewer_url must be omitted rather than empty".to_owned(),
        ));
    }
    Ok(())
}

fn validate_chart_binding_config(config: &ChartBindingConfig) -> SyncResult<()> {
    require_field("chart.value_field", &config.value_field)?;
    require_field("chart.uom_field", &config.uom_field)?;
    for (name, opacity) in [
        ("chart.emphasized_opacity", config.emphasized_opacity),
        ("chart.normal_opacity", config.normal_opacity),
    ] {
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(SyncError::InvalidConfig(format!(
                "{name} must be finite and in [0, 1]"
            )));
        }
    }
    Ok(())
}

fn require_field(name: &str, value: &str) -> SyncResult<()> {
    if value.trim().is_empty() {
        return Err(SyncError::InvalidConfig(format!("{name} must not be empty")));
    }
    Ok(())
}
