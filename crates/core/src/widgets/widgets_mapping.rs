//! Building a widget mapping from paths picked in a preview response.

use finboard_market_data::FieldFormat;
use serde::{Deserialize, Serialize};

use super::{CardMapping, LineMapping, TableMapping, WidgetKind, WidgetType};

/// X path used by a line mapping until one is chosen explicitly.
pub const DEFAULT_X_PATH: &str = "time";

/// Paths picked so far while mapping a widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
}

impl MappingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a picked path for the given widget type.
    ///
    /// Cards take it as their value, line charts as the y axis (x falls back
    /// to [`DEFAULT_X_PATH`]) and tables append it as a column once.
    pub fn pick(&mut self, widget_type: WidgetType, path: &str) {
        match widget_type {
            WidgetType::Card => self.value_path = Some(path.to_string()),
            WidgetType::Line => {
                self.y_path = Some(path.to_string());
                self.x_path.get_or_insert_with(|| DEFAULT_X_PATH.to_string());
            }
            WidgetType::Table => {
                if !self.columns.iter().any(|c| c == path) {
                    self.columns.push(path.to_string());
                }
            }
        }
    }

    pub fn set_x_path(&mut self, path: &str) {
        self.x_path = Some(path.to_string());
    }

    /// The mapping these picks describe, or `None` while the required path
    /// for the type has not been picked.
    pub fn to_kind(&self, widget_type: WidgetType, format: FieldFormat) -> Option<WidgetKind> {
        match widget_type {
            WidgetType::Card => self.value_path.as_ref().map(|path| {
                WidgetKind::Card(CardMapping {
                    paths: vec![path.clone()],
                    format,
                })
            }),
            WidgetType::Line => self.y_path.as_ref().map(|y| {
                let x = self.x_path.as_deref().unwrap_or(DEFAULT_X_PATH);
                WidgetKind::Line(LineMapping::new(x, y.as_str()))
            }),
            WidgetType::Table if self.columns.is_empty() => None,
            WidgetType::Table => Some(WidgetKind::Table(TableMapping {
                columns: self.columns.clone(),
            })),
        }
    }
}
