use finboard_market_data::{candles_to_points, normalize_from, to_time_series, TimePoint};
use serde::Serialize;
use serde_json::Value;

use super::{WidgetView, NO_CANDLES_MESSAGE, NO_DATA_MESSAGE};
use crate::widgets::{LineMapping, Widget};

/// Points kept on a chart, the most recent ones.
pub const MAX_LINE_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub label: String,
    pub points: Vec<TimePoint>,
}

/// Line chart: normalized candles projected through the y selector, or the
/// generic time-series extraction when the response has no candles.
pub fn render_line(widget: &Widget, mapping: &LineMapping, data: &Value) -> WidgetView {
    if data.get("s").and_then(Value::as_str) == Some("no_data") {
        return WidgetView::no_data(NO_CANDLES_MESSAGE);
    }

    let y = mapping.y_selector();
    let candles = normalize_from(widget.provider.as_str(), &widget.endpoint, data);
    let mut points = if candles.is_empty() {
        to_time_series(data, &mapping.x_selector(), &y)
    } else {
        candles_to_points(&candles, &y)
    };

    if points.is_empty() {
        return WidgetView::no_data(NO_DATA_MESSAGE);
    }
    if points.len() > MAX_LINE_POINTS {
        points.drain(..points.len() - MAX_LINE_POINTS);
    }

    WidgetView::Line(LineView {
        label: widget.name.clone(),
        points,
    })
}
