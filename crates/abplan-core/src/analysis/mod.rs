//! Closed-form planning calculations.

mod mde;
mod power;
mod sample_size;

pub use mde::{estimate_mde, mde_table};
pub use power::{PowerCurves, TypeOneRegion};
pub use sample_size::{estimate_duration, required_sample_size};
