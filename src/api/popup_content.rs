use crate::core::{Graphic, MapPoint};
use crate::error::{SyncError, SyncResult};
use crate::surface::PopupDescriptor;

use super::{DataContext, PopupContentConfig};

/// Value some sources use for suppressed figures; its symbol is the letter
/// itself, so printing both would show it twice.
const SUPPRESSED_VALUE: &str = "F";

/// Builds the popup title and HTML body for one feature.
pub fn describe_feature(
    config: &PopupContentConfig,
    context: &DataContext,
    graphic: &Graphic,
    location: MapPoint,
) -> SyncResult<PopupDescriptor> {
    let title = graphic.attribute_text(&config.title_field).ok_or_else(|| {
        SyncError::PopupRenderFailure(format!(
            "feature {} has no `{}` attribute for the popup title",
            graphic.id(),
            config.title_field
        ))
    })?;

    let uom = graphic.attribute_text(&config.uom_field).unwrap_or_default();
    let value = graphic.attribute_text(&config.value_field).unwrap_or_default();
    let symbol = graphic
        .attribute_text(&config.symbol_field)
        .filter(|_| value != SUPPRESSED_VALUE)
        .unwrap_or_default();
    let null_description = graphic
        .attribute_text(&config.null_description_field)
        .unwrap_or_default();

    let symbol = escape_html(&symbol);
    let mut html = format!(
        "<b>{}</b>: {}<sup>{symbol}</sup><br><br><div><b>{}</b>:<ul>",
        escape_html(&uom),
        escape_html(&value),
        config.indicator_heading,
    );
    for indicator in &context.indicators {
        html.push_str("<li>");
        html.push_str(&escape_html(indicator));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    if let Some(link) = table_link(config, context.category.as_deref()) {
        html.push_str(&link);
    }
    html.push_str(&format!(
        "</div><br><sup>{symbol}</sup> {}",
        escape_html(&null_description)
    ));

    Ok(PopupDescriptor {
        location,
        title,
        html_content: html,
    })
}

/// Source-table link for an 8-digit product category, `None` otherwise.
fn table_link(config: &PopupContentConfig, category: Option<&str>) -> Option<String> {
    let base_url = config.table_viewer_url.as_deref()?;
    let category = category?;
    if category.len() != 8 || !category.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let url = format!("{base_url}{category}01");
    let table_id = format!(
        "{}-{}-{}-01",
        &category[0..2],
        &category[2..4],
        &category[4..8]
    );
    Some(
        config
            .table_link_template
            .replace("{0}", &url)
            .replace("{1}", &table_id),
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{describe_feature, escape_html, table_link};
    use crate::api::{DataContext, PopupContentConfig};
    use crate::core::{Graphic, GraphicId, MapPoint};

    fn config() -> PopupContentConfig {
        PopupContentConfig {
            table_viewer_url: Some("https://example.org/t1/tbl1/en/tv.action?pid=".to_owned()),
            ..PopupContentConfig::default()
        }
    }

    fn graphic(value: &str, symbol: &str) -> Graphic {
        Graphic::new(GraphicId(1))
            .with_attribute("Label", "Nova Scotia")
            .with_attribute("UOM", "Dollars")
            .with_attribute("Value", value)
            .with_attribute("Symbol", symbol)
            .with_attribute("NullDescription", "too unreliable to be published")
    }

    #[test]
    fn table_link_requires_eight_digit_category() {
        let config = config();
        assert_eq!(
            table_link(&config, Some("14100287")).as_deref(),
            Some(concat!(
                "<b>Statistics Canada.</b> Table ",
                "<a href='https://example.org/t1/tbl1/en/tv.action?pid=1410028701' ",
                "target='_blank'>14-10-0287-01</a>"
            ))
        );
        assert!(table_link(&config, Some("1410028")).is_none());
        assert!(table_link(&config, Some("14A00287")).is_none());
        assert!(table_link(&config, None).is_none());
        assert!(table_link(&PopupContentConfig::default(), Some("14100287")).is_none());
    }

    #[test]
    fn suppressed_value_hides_symbol() {
        let context = DataContext::default();
        let shown =
            describe_feature(&config(), &context, &graphic("12", "E"), MapPoint::new(0.0, 0.0))
                .expect("describe");
        assert!(shown.html_content.starts_with("<b>Dollars</b>: 12<sup>E</sup>"));

        let suppressed =
            describe_feature(&config(), &context, &graphic("F", "F"), MapPoint::new(0.0, 0.0))
                .expect("describe");
        assert!(suppressed.html_content.starts_with("<b>Dollars</b>: F<sup></sup>"));
    }

    #[test]
    fn body_layout_without_table_link() {
        let context = DataContext {
            indicators: vec!["Both sexes".to_owned()],
            ..DataContext::default()
        };
        let descriptor =
            describe_feature(&config(), &context, &graphic("7", "E"), MapPoint::new(0.0, 0.0))
                .expect("describe");

        assert_eq!(
            descriptor.html_content,
            concat!(
                "<b>Dollars</b>: 7<sup>E</sup><br><br>",
                "<div><b>Selected indicators</b>:<ul><li>Both sexes</li></ul></div>",
                "<br><sup>E</sup> too unreliable to be published"
            )
        );
    }

    #[test]
    fn indicators_are_listed_and_escaped() {
        let context = DataContext {
            indicators: vec!["Income < $20k".to_owned(), "Both sexes".to_owned()],
            category: Some("14100287".to_owned()),
            ..DataContext::default()
        };
        let descriptor =
            describe_feature(&config(), &context, &graphic("3", ""), MapPoint::new(5.0, 6.0))
                .expect("describe");

        assert_eq!(descriptor.title, "Nova Scotia");
        assert_eq!(descriptor.location, MapPoint::new(5.0, 6.0));
        assert!(descriptor
            .html_content
            .contains("<ul><li>Income &lt; $20k</li><li>Both sexes</li></ul>"));
        assert!(descriptor.html_content.contains("14-10-0287-01"));
        assert!(descriptor
            .html_content
            .ends_with("too unreliable to be published"));
    }

    #[test]
    fn missing_title_is_a_render_failure() {
        let graphic = Graphic::new(GraphicId(2)).with_attribute("Value", 1.0);
        let err = describe_feature(
            &config(),
            &DataContext::default(),
            &graphic,
            MapPoint::new(0.0, 0.0),
        )
        .expect_err("missing title");
        assert!(err.to_string().contains("popup render failed"));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
