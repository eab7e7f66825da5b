use finboard_market_data::{get_array_from_data, get_by_path};
use serde::Serialize;
use serde_json::Value;

use super::{WidgetView, NO_DATA_MESSAGE};
use crate::widgets::TableMapping;

/// Rows shown at most, after filtering.
pub const MAX_TABLE_ROWS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows matching the search before truncation.
    pub total: usize,
}

/// Literal key first: Alpha Vantage keys such as `1. symbol` contain dots.
fn cell(row: &Value, column: &str) -> String {
    match row.get(column).or_else(|| get_by_path(row, column)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Table of the first record list found in `data`, optionally filtered by a
/// case-insensitive search over each row's JSON text.
pub fn render_table(mapping: &TableMapping, data: &Value, query: Option<&str>) -> WidgetView {
    let Some(records) = get_array_from_data(data) else {
        return WidgetView::no_data(NO_DATA_MESSAGE);
    };

    let needle = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);
    let matching: Vec<&Value> = records
        .iter()
        .filter(|row| match &needle {
            Some(needle) => row.to_string().to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .collect();

    let columns = if mapping.columns.is_empty() {
        records
            .first()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default()
    } else {
        mapping.columns.clone()
    };

    let rows = matching
        .iter()
        .take(MAX_TABLE_ROWS)
        .map(|row| columns.iter().map(|c| cell(row, c)).collect())
        .collect();

    WidgetView::Table(TableView {
        columns,
        rows,
        total: matching.len(),
    })
}
