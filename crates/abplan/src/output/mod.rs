//! Output formatting for planning results.
//!
//! - `json`: machine-readable output via `serde_json`
//! - `terminal`: human-readable output with ANSI colors

pub mod json;
pub mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_duration, format_mde, format_mde_table};
