//! Finboard Core - Dashboard state, widget rendering and polling.
//!
//! This crate owns the client-side half of the dashboard. The persisted
//! widget collection lives in `dashboard`; `views` and `polling` turn proxy
//! responses into what each widget shows. Provider response handling lives
//! in `finboard-market-data`.

pub mod dashboard;
pub mod errors;
pub mod polling;
pub mod views;
pub mod widgets;

pub use dashboard::{DashboardExport, DashboardState, DashboardStore, FileStorage, MemoryStorage};
pub use errors::{DashboardError, Result};
pub use polling::{fetch_preview, FetchError, FieldPreview, HttpProxyClient, ProxyClient, WidgetPoller};
pub use views::{render_widget, WidgetView};
pub use widgets::{MappingSelection, NewWidget, Widget, WidgetKind, WidgetType};
