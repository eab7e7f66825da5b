//! Render a widget's latest proxy response into a view model.
//!
//! Rendering never fails: missing or malformed data becomes
//! [`WidgetView::NoData`] and fetch failures become an inline
//! [`WidgetView::RateLimited`] or [`WidgetView::Error`] scoped to the widget.

mod card;
mod line;
mod table;

pub use card::{render_card, CardField, CardView};
pub use line::{render_line, LineView, MAX_LINE_POINTS};
pub use table::{render_table, TableView, MAX_TABLE_ROWS};

use serde::Serialize;
use serde_json::Value;

use crate::polling::FetchError;
use crate::widgets::{Widget, WidgetKind};

pub const RATE_LIMITED_MESSAGE: &str = "Rate limited — please retry";
pub const NO_DATA_MESSAGE: &str = "No data";
pub const NO_CANDLES_MESSAGE: &str = "No candle data for this range";

/// What a widget tile currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum WidgetView {
    Loading,
    RateLimited { message: String },
    Error { message: String },
    NoData { message: String },
    Card(CardView),
    Table(TableView),
    Line(LineView),
}

impl WidgetView {
    pub(crate) fn no_data(message: &str) -> Self {
        WidgetView::NoData {
            message: message.to_string(),
        }
    }
}

/// Render a successful proxy response.
pub fn render_widget(widget: &Widget, data: &Value) -> WidgetView {
    match &widget.kind {
        WidgetKind::Card(mapping) => render_card(widget, mapping, data),
        WidgetKind::Table(mapping) => render_table(mapping, data, None),
        WidgetKind::Line(mapping) => render_line(widget, mapping, data),
    }
}

/// Render a failed fetch.
pub fn render_failure(error: &FetchError) -> WidgetView {
    match error {
        FetchError::RateLimited { .. } => WidgetView::RateLimited {
            message: RATE_LIMITED_MESSAGE.to_string(),
        },
        other => WidgetView::Error {
            message: other.to_string(),
        },
    }
}

/// Render either outcome of a fetch.
pub fn render_outcome(widget: &Widget, outcome: &Result<Value, FetchError>) -> WidgetView {
    match outcome {
        Ok(data) => render_widget(widget, data),
        Err(error) => render_failure(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_failure_view() {
        let view = render_failure(&FetchError::RateLimited {
            message: "Rate limit exceeded".to_string(),
        });
        assert_eq!(
            view,
            WidgetView::RateLimited {
                message: RATE_LIMITED_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_status_failure_shows_envelope_message() {
        let view = render_failure(&FetchError::Status {
            status: 403,
            message: "Access denied".to_string(),
        });
        assert_eq!(
            view,
            WidgetView::Error {
                message: "Access denied".to_string()
            }
        );
    }

    #[test]
    fn test_view_serializes_with_state_tag() {
        let value = serde_json::to_value(WidgetView::no_data(NO_DATA_MESSAGE)).unwrap();
        assert_eq!(value["state"], "noData");
        assert_eq!(value["message"], "No data");
    }
}
