//! Per-widget polling tasks.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::ProxyClient;
use crate::dashboard::DashboardStore;
use crate::views::{render_outcome, WidgetView};
use crate::widgets::Widget;

struct PollHandle {
    /// Widget configuration the task was started with.
    widget: Widget,
    view: Arc<watch::Sender<WidgetView>>,
    task: JoinHandle<()>,
}

/// Keeps one polling task per widget in the store.
///
/// Polls are independent of each other; widgets hitting the same request
/// only share the proxy's cache. Removing a widget does not abort its
/// in-flight fetch: the task notices the widget is gone once the fetch
/// returns, drops the result and exits. A widget whose stored configuration
/// changed (after an import, say) is restarted on the next `sync`, keeping
/// its watch channel.
pub struct WidgetPoller {
    store: Arc<DashboardStore>,
    client: Arc<dyn ProxyClient>,
    handles: Mutex<HashMap<String, PollHandle>>,
}

impl WidgetPoller {
    pub fn new(store: Arc<DashboardStore>, client: Arc<dyn ProxyClient>) -> Self {
        Self {
            store,
            client,
            handles: Mutex::new(HashMap::new()),
        }
    }

    fn lock_handles(&self) -> MutexGuard<'_, HashMap<String, PollHandle>> {
        self.handles.lock().unwrap_or_else(|poisoned| {
            warn!("Widget poller mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Start polling new widgets, restart changed ones and forget removed
    /// ones.
    ///
    /// Must be called from within a tokio runtime.
    pub fn sync(&self) {
        let widgets = self.store.widgets();
        let live: HashSet<&str> = widgets.iter().map(|w| w.id.as_str()).collect();

        let mut handles = self.lock_handles();
        handles.retain(|id, _| live.contains(id.as_str()));

        for widget in &widgets {
            let view = match handles.remove(&widget.id) {
                Some(handle) if handle.widget == *widget => {
                    handles.insert(widget.id.clone(), handle);
                    continue;
                }
                Some(handle) => {
                    debug!("Widget {} changed, restarting its poll", widget.id);
                    handle.task.abort();
                    handle.view.send_replace(WidgetView::Loading);
                    handle.view
                }
                None => Arc::new(watch::channel(WidgetView::Loading).0),
            };
            let task = tokio::spawn(poll_widget(
                self.store.clone(),
                self.client.clone(),
                widget.clone(),
                view.clone(),
            ));
            handles.insert(
                widget.id.clone(),
                PollHandle {
                    widget: widget.clone(),
                    view,
                    task,
                },
            );
        }
        debug!("Polling {} widget(s)", handles.len());
    }

    /// Watch a widget's view. `None` if the widget is not being polled.
    pub fn subscribe(&self, id: &str) -> Option<watch::Receiver<WidgetView>> {
        self.lock_handles().get(id).map(|h| h.view.subscribe())
    }

    /// Last published view of a widget.
    pub fn latest(&self, id: &str) -> Option<WidgetView> {
        self.lock_handles().get(id).map(|h| h.view.borrow().clone())
    }

    /// Abort every polling task.
    pub fn shutdown(&self) {
        let mut handles = self.lock_handles();
        for (_, handle) in handles.drain() {
            handle.task.abort();
        }
        info!("Widget polling stopped");
    }
}

async fn poll_widget(
    store: Arc<DashboardStore>,
    client: Arc<dyn ProxyClient>,
    widget: Widget,
    view: Arc<watch::Sender<WidgetView>>,
) {
    let request = widget.proxy_request();
    loop {
        let outcome = client.fetch(&request).await;

        let Some(current) = store.get_widget(&widget.id) else {
            debug!("Widget {} was removed, dropping its result", widget.id);
            return;
        };
        if current != widget {
            debug!("Widget {} was reconfigured, dropping its result", widget.id);
            return;
        }
        if let Err(e) = &outcome {
            debug!("Fetch for widget {} failed: {}", widget.id, e);
        }
        view.send_replace(render_outcome(&widget, &outcome));

        if widget.refresh_ms == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(widget.refresh_ms)).await;
    }
}
