//! Probability distributions shared by all estimators.

pub mod normal;

pub use normal::{cdf, density, quantile, quantile_at};
