//! Dashboard domain models.

use serde::{Deserialize, Serialize};

use crate::widgets::Widget;

/// Version written by [`DashboardExport`] and the only one accepted on import.
pub const EXPORT_VERSION: u32 = 1;

/// The persisted dashboard record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    #[serde(default)]
    pub widgets: Vec<Widget>,
    #[serde(default)]
    pub has_seen_tour: bool,
}

/// Downloadable snapshot of the widget collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardExport {
    pub version: u32,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl DashboardExport {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self {
            version: EXPORT_VERSION,
            widgets,
        }
    }
}
