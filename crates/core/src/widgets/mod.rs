//! Widget definitions: what a dashboard tile fetches and how it maps the
//! response onto a card, table or line chart.

mod widgets_mapping;
mod widgets_model;

pub use widgets_mapping::*;
pub use widgets_model::*;
