//! Geometry of the power-analysis plot.
//!
//! Two normal densities with the same scale `σ = sqrt(p(1-p))` (p the
//! baseline rate): the null hypothesis centred on 0 and the alternative
//! centred on the MDE. The Type I region is the null tail beyond the
//! critical value(s); the Type II region is the alternative mass below
//! `z_β = Φ⁻¹(1 - power; mde, σ)`.
//!
//! This module only computes numbers. Rasterization lives in the `abplan`
//! crate.

use alloc::format;
use alloc::vec::Vec;

use crate::constants::{PLOT_DOMAIN_SIGMAS, PLOT_Y_HEADROOM};
use crate::error::{ensure_finite, open_percentage, PlanError, PlanResult};
use crate::math;
use crate::statistics::{density, quantile_at};
use crate::types::{Hypothesis, VisualParameters};

/// Critical region of the null distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeOneRegion {
    /// `x > upper`.
    Upper { upper: f64 },

    /// `x < lower` or `x > upper`.
    Both { lower: f64, upper: f64 },
}

impl TypeOneRegion {
    /// Whether `x` falls in the rejection region.
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            TypeOneRegion::Upper { upper } => x > upper,
            TypeOneRegion::Both { lower, upper } => x < lower || x > upper,
        }
    }

    /// Critical boundaries, left to right.
    pub fn boundaries(&self) -> Vec<f64> {
        match *self {
            TypeOneRegion::Upper { upper } => alloc::vec![upper],
            TypeOneRegion::Both { lower, upper } => alloc::vec![lower, upper],
        }
    }
}

/// Sampled densities and error regions for one set of plot parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerCurves {
    /// Evenly spaced grid over `[x_min, -x_min]`.
    pub xs: Vec<f64>,

    /// Null density N(0, σ) at each grid point.
    pub null_density: Vec<f64>,

    /// Alternative density N(mde, σ) at each grid point.
    pub alt_density: Vec<f64>,

    /// Shared scale of both densities.
    pub sigma: f64,

    /// Mean of the alternative, i.e. the MDE as a fraction.
    pub effect: f64,

    /// Rejection region of the null.
    pub type_one: TypeOneRegion,

    /// Alternative values below this are missed (Type II).
    pub z_beta: f64,

    /// Upper y-limit: 1.2 × the tallest density sample.
    pub y_max: f64,
}

impl PowerCurves {
    /// Sample both densities at `resolution` points and locate the error regions.
    ///
    /// # Errors
    ///
    /// [`PlanError::InvalidArgument`] if `resolution < 2`, the baseline is
    /// outside `(0, 100)`, the MDE is not positive, or α/power are outside
    /// `(0, 100)`.
    pub fn compute(params: &VisualParameters, resolution: usize) -> PlanResult<Self> {
        if resolution < 2 {
            return Err(PlanError::invalid(format!(
                "plot resolution must be >= 2, got {resolution}"
            )));
        }
        let alpha = open_percentage("alpha", params.alpha)?;
        let power = open_percentage("power", params.power)?;
        let baseline = params.baseline_conversion_rate_percentage;
        open_percentage("baseline_conversion_rate_percentage", baseline)?;
        let mde_pct = params.min_detectable_effect_percentage;
        ensure_finite("min_detectable_effect_percentage", mde_pct)?;
        if mde_pct <= 0.0 {
            return Err(PlanError::invalid(format!(
                "min_detectable_effect_percentage must be > 0, got {mde_pct}"
            )));
        }

        let sigma = 0.01 * math::sqrt(baseline * (100.0 - baseline));
        let effect = mde_pct / 100.0;

        let x_min = -(effect + PLOT_DOMAIN_SIGMAS * sigma);
        let step = -2.0 * x_min / (resolution - 1) as f64;
        let xs: Vec<f64> = (0..resolution).map(|i| x_min + step * i as f64).collect();

        let null_density: Vec<f64> = xs.iter().map(|&x| density(x, 0.0, sigma)).collect();
        let alt_density: Vec<f64> = xs.iter().map(|&x| density(x, effect, sigma)).collect();

        let type_one = match params.hypothesis {
            Hypothesis::OneSided => TypeOneRegion::Upper {
                upper: quantile_at(1.0 - alpha, 0.0, sigma),
            },
            Hypothesis::TwoSided => TypeOneRegion::Both {
                lower: quantile_at(alpha / 2.0, 0.0, sigma),
                upper: quantile_at(1.0 - alpha / 2.0, 0.0, sigma),
            },
        };
        let z_beta = quantile_at(1.0 - power, effect, sigma);

        let peak = null_density
            .iter()
            .chain(alt_density.iter())
            .fold(0.0_f64, |acc, &d| acc.max(d));

        log::debug!(
            "power curves: sigma={sigma:.6} effect={effect:.4} domain=[{x_min:.4}, {:.4}] z_beta={z_beta:.6}",
            -x_min
        );

        Ok(Self {
            xs,
            null_density,
            alt_density,
            sigma,
            effect,
            type_one,
            z_beta,
            y_max: peak * PLOT_Y_HEADROOM,
        })
    }

    /// Plot domain `(x_min, x_max)`.
    pub fn domain(&self) -> (f64, f64) {
        let first = self.xs.first().copied().unwrap_or_default();
        let last = self.xs.last().copied().unwrap_or_default();
        (first, last)
    }

    /// Whether grid point `i` lies in the Type I region of the null curve.
    pub fn in_type_one(&self, i: usize) -> bool {
        self.xs.get(i).is_some_and(|&x| self.type_one.contains(x))
    }

    /// Whether grid point `i` lies in the Type II region of the alternative curve.
    pub fn in_type_two(&self, i: usize) -> bool {
        self.xs.get(i).is_some_and(|&x| x < self.z_beta)
    }
}
