//! Sample fetches used while mapping a widget's fields.

use finboard_market_data::pickable_paths;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::{FetchError, ProxyClient};
use crate::widgets::NewWidget;

/// A preview response together with the paths that can be bound from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPreview {
    pub data: Value,
    pub paths: Vec<String>,
}

/// Fetch sample data for a widget that is being configured.
///
/// Sent with the preview intent, so the proxy caches it only briefly.
pub async fn fetch_preview(
    client: &dyn ProxyClient,
    draft: &NewWidget,
) -> Result<FieldPreview, FetchError> {
    let data = client.fetch(&draft.preview_request()).await?;
    let paths = pickable_paths(&data);
    debug!(
        "Preview of {} {} offers {} path(s)",
        draft.provider,
        draft.endpoint,
        paths.len()
    );
    Ok(FieldPreview { data, paths })
}
