//! Dashboard state: the ordered widget collection, its persistence and the
//! export/import document.

mod dashboard_model;
mod dashboard_storage;
mod dashboard_store;

pub use dashboard_model::*;
pub use dashboard_storage::*;
pub use dashboard_store::*;
