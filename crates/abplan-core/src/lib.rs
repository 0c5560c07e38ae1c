//! Closed-form planning statistics for A/B experiments.
//!
//! This crate sizes experiments before they run: required sample size and
//! duration, the minimum detectable effect reachable with a given traffic,
//! and the numeric geometry behind a power-analysis plot. It works in
//! `no_std` environments with only an allocator.
//!
//! # Features
//!
//! - `std` (default): standard library support and ANSI colors in
//!   [`formatting`] output
//!
//! # Units
//!
//! Parameter structs carry percentages (α = 5 means 5%). Every estimator
//! converts them to fractions once, on entry.
//!
//! # Usage
//!
//! ```
//! use abplan_core::{estimate_duration, DurationOutcome, TestParameters};
//!
//! let params = TestParameters::binomial(10.0, 20.0)
//!     .with_variants(1)
//!     .with_daily_visitors(1000);
//! match estimate_duration(&params).unwrap() {
//!     DurationOutcome::Estimated(r) => assert_eq!(r.sample_size, 5564),
//!     DurationOutcome::NoEstimate => unreachable!(),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod analysis;
pub mod colors;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod math;
pub mod result;
pub mod statistics;
pub mod types;

// Re-export commonly used items at crate root
pub use analysis::{
    estimate_duration, estimate_mde, mde_table, required_sample_size, PowerCurves, TypeOneRegion,
};
pub use error::{PlanError, PlanResult};
pub use result::{DurationOutcome, EstimationResult, MdeRow};
pub use types::{Hypothesis, MdeParameters, Metric, TestParameters, VisualParameters};
