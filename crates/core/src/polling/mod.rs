//! Widget polling runtime: one independent fetch loop per widget, each
//! publishing its rendered view on a watch channel. Also the one-off preview
//! fetch used while mapping a widget's fields.

mod field_preview;
mod proxy_client;
mod widget_poller;

pub use field_preview::*;
pub use proxy_client::*;
pub use widget_poller::*;
