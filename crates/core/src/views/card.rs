use finboard_market_data::{
    finite_number, format_field, get_by_path, normalize_from, FieldFormat,
};
use serde::Serialize;
use serde_json::Value;

use super::{WidgetView, NO_DATA_MESSAGE};
use crate::widgets::{CardMapping, Widget};

/// Shown in place of a price or percent that cannot be computed.
const MISSING: &str = "—";

/// A mapped field rendered with the card's format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardField {
    pub path: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub label: String,
    pub price: Option<f64>,
    pub price_display: String,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub percent: Option<f64>,
    pub percent_display: String,
    pub is_up: bool,
    pub fields: Vec<CardField>,
}

fn number_at(data: &Value, key: &str) -> Option<f64> {
    data.get(key).and_then(finite_number)
}

/// Quote card: latest price, change against the previous close and the
/// mapped fields.
pub fn render_card(widget: &Widget, mapping: &CardMapping, data: &Value) -> WidgetView {
    if !data.is_object() {
        return WidgetView::no_data(NO_DATA_MESSAGE);
    }

    let candles = normalize_from(widget.provider.as_str(), &widget.endpoint, data);
    let latest = candles.last();

    let price = latest
        .map(|c| c.close)
        .or_else(|| number_at(data, "c"))
        .or_else(|| number_at(data, "price"));
    let previous_close = number_at(data, "pc")
        .or_else(|| number_at(data, "previousClose"))
        .or_else(|| latest.map(|c| c.open))
        .or(price);

    let change = price.zip(previous_close).map(|(p, prev)| p - prev);
    let percent = match (change, previous_close) {
        (Some(change), Some(prev)) if prev != 0.0 => Some(change / prev * 100.0),
        _ => number_at(data, "dp"),
    };
    let is_up = percent.or(change).is_some_and(|v| v >= 0.0);

    let fields: Vec<CardField> = mapping
        .paths
        .iter()
        .map(|path| CardField {
            path: path.clone(),
            value: format_field(
                data.get(path).or_else(|| get_by_path(data, path)),
                mapping.format,
            ),
        })
        .collect();

    if price.is_none() && fields.is_empty() {
        return WidgetView::no_data(NO_DATA_MESSAGE);
    }

    WidgetView::Card(CardView {
        label: widget.symbol().unwrap_or_else(|| widget.name.clone()),
        price,
        price_display: price
            .map(|p| format_field(Some(&Value::from(p)), FieldFormat::Currency))
            .unwrap_or_else(|| MISSING.to_string()),
        previous_close,
        change,
        percent,
        percent_display: percent
            .map(|p| format!("{:.2}%", p))
            .unwrap_or_else(|| MISSING.to_string()),
        is_up,
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::WidgetKind;
    use finboard_market_data::{ParamValue, Params, ProviderId};
    use serde_json::json;

    fn widget(provider: ProviderId, endpoint: &str, paths: &[&str]) -> (Widget, CardMapping) {
        let mapping = CardMapping {
            paths: paths.iter().map(|p| p.to_string()).collect(),
            format: FieldFormat::Currency,
        };
        let mut params = Params::new();
        params.insert("symbol".to_string(), ParamValue::from("AAPL"));
        let widget = Widget {
            id: "1".to_string(),
            name: "Apple".to_string(),
            title: None,
            provider,
            endpoint: endpoint.to_string(),
            params,
            refresh_ms: 60_000,
            kind: WidgetKind::Card(mapping.clone()),
        };
        (widget, mapping)
    }

    fn card(view: WidgetView) -> CardView {
        match view {
            WidgetView::Card(card) => card,
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[test]
    fn test_finnhub_quote_card() {
        let (widget, mapping) = widget(ProviderId::Finnhub, "/quote", &["h", "missing"]);
        let data = json!({"c": 110.0, "o": 101.0, "h": 111.5, "l": 99.0, "pc": 100.0, "t": 1704067200});
        let view = card(render_card(&widget, &mapping, &data));

        assert_eq!(view.label, "AAPL");
        assert_eq!(view.price, Some(110.0));
        assert_eq!(view.price_display, "$110.00");
        assert_eq!(view.change, Some(10.0));
        assert_eq!(view.percent_display, "10.00%");
        assert!(view.is_up);
        assert_eq!(view.fields[0].value, "$111.50");
        assert_eq!(view.fields[1].value, "-");
    }

    #[test]
    fn test_card_field_keys_with_dots() {
        let (widget, mapping) = widget(ProviderId::AlphaVantage, "GLOBAL_QUOTE", &["05. price"]);
        let view = card(render_card(&widget, &mapping, &json!({"05. price": "12.5"})));
        assert_eq!(view.fields[0].value, "$12.50");
    }

    #[test]
    fn test_global_quote_card_falls_back_to_open() {
        let (widget, mapping) = widget(ProviderId::AlphaVantage, "GLOBAL_QUOTE", &[]);
        let data = json!({"Global Quote": {
            "02. open": "150.00", "03. high": "155.00", "04. low": "149.00",
            "05. price": "147.00", "07. latest trading day": "2024-01-02"
        }});
        let view = card(render_card(&widget, &mapping, &data));

        assert_eq!(view.price, Some(147.0));
        assert_eq!(view.previous_close, Some(150.0));
        assert_eq!(view.percent_display, "-2.00%");
        assert!(!view.is_up);
    }

    #[test]
    fn test_percent_falls_back_to_dp_when_previous_close_is_zero() {
        let (widget, mapping) = widget(ProviderId::Indian, "quote", &[]);
        let data = json!({"price": 5.0, "previousClose": 0, "dp": 1.25});
        let view = card(render_card(&widget, &mapping, &data));

        assert_eq!(view.price, Some(5.0));
        assert_eq!(view.percent, Some(1.25));
    }

    #[test]
    fn test_card_without_price_or_fields_is_no_data() {
        let (widget, mapping) = widget(ProviderId::Finnhub, "/quote", &[]);
        assert_eq!(
            render_card(&widget, &mapping, &json!({"error": "nope"})),
            WidgetView::no_data(NO_DATA_MESSAGE)
        );
        assert_eq!(
            render_card(&widget, &mapping, &Value::Null),
            WidgetView::no_data(NO_DATA_MESSAGE)
        );
    }
}
