//! The dashboard store: ordered widget collection plus the onboarding flag.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use log::{debug, info, warn};

use super::{DashboardExport, DashboardState, DashboardStorage, EXPORT_VERSION};
use crate::errors::{DashboardError, Result};
use crate::widgets::{NewWidget, Widget, DEFAULT_REFRESH_MS, UNTITLED_WIDGET};

struct StoreInner {
    state: DashboardState,
    /// Last id handed out, in creation-time milliseconds.
    last_id: i64,
}

/// Mutable dashboard state persisted through a [`DashboardStorage`].
///
/// Mutations are saved before they become visible; a failed save leaves the
/// collection exactly as it was.
pub struct DashboardStore {
    storage: Arc<dyn DashboardStorage>,
    inner: RwLock<StoreInner>,
}

impl DashboardStore {
    /// Open the store, loading whatever the storage holds (empty if nothing).
    pub fn open(storage: Arc<dyn DashboardStorage>) -> Result<Self> {
        let state = storage.load()?.unwrap_or_default();
        let last_id = state
            .widgets
            .iter()
            .filter_map(|w| w.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        info!("Dashboard opened with {} widget(s)", state.widgets.len());
        Ok(Self {
            storage,
            inner: RwLock::new(StoreInner { state, last_id }),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|poisoned| {
            warn!("Dashboard store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|poisoned| {
            warn!("Dashboard store lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Save `next` and publish it as the current state.
    fn commit(&self, inner: &mut StoreInner, next: DashboardState) -> Result<()> {
        self.storage.save(&next)?;
        inner.state = next;
        Ok(())
    }

    /// Append a widget and return it with its assigned id and defaults.
    pub fn add_widget(&self, new: NewWidget) -> Result<Widget> {
        let mut inner = self.write();

        let now = Utc::now().timestamp_millis();
        let id = now.max(inner.last_id + 1);

        let title = non_empty(new.title)
            .or_else(|| non_empty(new.name.clone()))
            .unwrap_or_else(|| UNTITLED_WIDGET.to_string());
        let widget = Widget {
            id: id.to_string(),
            name: non_empty(new.name).unwrap_or_else(|| title.clone()),
            title: Some(title),
            provider: new.provider,
            endpoint: new.endpoint,
            params: new.params,
            refresh_ms: new.refresh_ms.unwrap_or(DEFAULT_REFRESH_MS),
            kind: new.kind,
        };

        let mut next = inner.state.clone();
        next.widgets.push(widget.clone());
        self.commit(&mut inner, next)?;
        inner.last_id = id;

        debug!("Added widget {} ({})", widget.id, widget.display_title());
        Ok(widget)
    }

    /// Remove a widget. Returns whether anything was removed.
    pub fn remove_widget(&self, id: &str) -> Result<bool> {
        let mut inner = self.write();
        if !inner.state.widgets.iter().any(|w| w.id == id) {
            return Ok(false);
        }
        let mut next = inner.state.clone();
        next.widgets.retain(|w| w.id != id);
        self.commit(&mut inner, next)?;
        debug!("Removed widget {}", id);
        Ok(true)
    }

    /// Move the widget at `from` to position `to`, shifting the others.
    ///
    /// Equal or out-of-range indices leave the collection untouched and
    /// return `false`.
    pub fn reorder(&self, from: usize, to: usize) -> Result<bool> {
        let mut inner = self.write();
        let len = inner.state.widgets.len();
        if from == to || from >= len || to >= len {
            return Ok(false);
        }
        let mut next = inner.state.clone();
        let item = next.widgets.remove(from);
        next.widgets.insert(to, item);
        self.commit(&mut inner, next)?;
        Ok(true)
    }

    pub fn export_config(&self) -> DashboardExport {
        DashboardExport::new(self.read().state.widgets.clone())
    }

    /// Replace the whole widget collection with an export document.
    pub fn import_config(&self, data: DashboardExport) -> Result<()> {
        if data.version != EXPORT_VERSION {
            return Err(DashboardError::UnsupportedVersion(data.version));
        }
        let mut inner = self.write();
        let mut next = inner.state.clone();
        next.widgets = data.widgets;
        let max_id = next
            .widgets
            .iter()
            .filter_map(|w| w.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        let count = next.widgets.len();
        self.commit(&mut inner, next)?;
        inner.last_id = inner.last_id.max(max_id);
        info!("Imported {} widget(s)", count);
        Ok(())
    }

    /// The export document as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_config())?)
    }

    pub fn import_json(&self, text: &str) -> Result<()> {
        let data: DashboardExport = serde_json::from_str(text)?;
        self.import_config(data)
    }

    pub fn get_widget(&self, id: &str) -> Option<Widget> {
        self.read().state.widgets.iter().find(|w| w.id == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().state.widgets.iter().any(|w| w.id == id)
    }

    /// Widgets in display order.
    pub fn widgets(&self) -> Vec<Widget> {
        self.read().state.widgets.clone()
    }

    pub fn has_seen_tour(&self) -> bool {
        self.read().state.has_seen_tour
    }

    pub fn set_has_seen_tour(&self, seen: bool) -> Result<()> {
        let mut inner = self.write();
        let mut next = inner.state.clone();
        next.has_seen_tour = seen;
        self.commit(&mut inner, next)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
