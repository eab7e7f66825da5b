//! Helpers for reading loosely-typed provider JSON.

mod format;
mod number;
mod path;

pub use format::format_field;
pub use number::{finite_number, numeric_value};
pub use path::{get_by_path, pickable_paths};
