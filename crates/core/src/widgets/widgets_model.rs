//! Widget domain models.

use finboard_market_data::catalog::AdapterPreset;
use finboard_market_data::{FieldFormat, FieldSelector, Intent, Params, ProviderId, ProxyRequest};
use serde::{Deserialize, Serialize};

/// Poll interval applied when a new widget does not specify one.
pub const DEFAULT_REFRESH_MS: u64 = 60_000;

/// Title given to widgets created without a title or a name.
pub const UNTITLED_WIDGET: &str = "Untitled Widget";

/// Rendering mode of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    Card,
    Table,
    Line,
}

/// Fields shown on a quote card and how to format them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMapping {
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub format: FieldFormat,
}

/// Columns of a table widget, as dotted paths into each row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMapping {
    #[serde(default)]
    pub columns: Vec<String>,
}

/// Axes of a line chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMapping {
    pub x: String,
    pub y: String,
}

impl LineMapping {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    pub fn x_selector(&self) -> FieldSelector {
        FieldSelector::parse(&self.x)
    }

    pub fn y_selector(&self) -> FieldSelector {
        FieldSelector::parse(&self.y)
    }
}

/// Widget type together with its mapping.
///
/// Serialized as sibling `type` and `mapping` keys of the widget document, so
/// a mapping can only ever be stored next to the type it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "mapping", rename_all = "lowercase")]
pub enum WidgetKind {
    Card(CardMapping),
    Table(TableMapping),
    Line(LineMapping),
}

impl WidgetKind {
    pub fn widget_type(&self) -> WidgetType {
        match self {
            WidgetKind::Card(_) => WidgetType::Card,
            WidgetKind::Table(_) => WidgetType::Table,
            WidgetKind::Line(_) => WidgetType::Line,
        }
    }
}

/// A configured dashboard tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub provider: ProviderId,
    pub endpoint: String,
    #[serde(default)]
    pub params: Params,
    pub refresh_ms: u64,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

impl Widget {
    pub fn widget_type(&self) -> WidgetType {
        self.kind.widget_type()
    }

    /// Title shown in the widget header.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// The `symbol` parameter, if the widget has one.
    pub fn symbol(&self) -> Option<String> {
        self.params.get("symbol").map(ToString::to_string)
    }

    /// Proxy request issued on every poll of this widget.
    pub fn proxy_request(&self) -> ProxyRequest {
        ProxyRequest::new(
            self.provider.as_str(),
            self.endpoint.clone(),
            self.params.clone(),
        )
    }
}

/// Input model for adding a widget to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWidget {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub provider: ProviderId,
    pub endpoint: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub refresh_ms: Option<u64>,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

impl NewWidget {
    pub fn new(provider: ProviderId, endpoint: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            name: None,
            title: None,
            provider,
            endpoint: endpoint.into(),
            params: Params::new(),
            refresh_ms: None,
            kind,
        }
    }

    /// Start from a catalog preset, named after its label.
    pub fn from_preset(preset: &AdapterPreset, kind: WidgetKind) -> Self {
        Self {
            name: Some(preset.label.to_string()),
            params: preset.default_params.clone(),
            ..Self::new(preset.provider, preset.endpoint, kind)
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_refresh_ms(mut self, refresh_ms: u64) -> Self {
        self.refresh_ms = Some(refresh_ms);
        self
    }

    /// Request fetching sample data while the widget's fields are mapped.
    pub fn preview_request(&self) -> ProxyRequest {
        ProxyRequest::new(
            self.provider.as_str(),
            self.endpoint.clone(),
            self.params.clone(),
        )
        .with_intent(Intent::Preview)
    }
}
