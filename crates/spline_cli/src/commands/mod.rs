//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. They share the
//! interpolant construction in [`build`].

pub mod coeffs;
pub mod eval;
pub mod integrate;

use ndarray::{ArrayD, ArrayViewD, IxDyn};
use serde_json::{json, Value};
use spline_core::math::interpolators::{
    build_boundary_spline, build_hermite, build_monotone, BoundaryCondition, BoundaryConditions,
    Extrapolate, PiecewisePolynomial, SplineConfig,
};
use tracing::info;

use crate::config::Method;
use crate::input::{self, Samples};
use crate::{CliError, Result};

/// Construction options after merging flags and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Sample file path
    pub input: String,
    /// Construction method
    pub method: Method,
    /// Start boundary condition tag
    pub bc_start: String,
    /// End boundary condition tag
    pub bc_end: String,
    /// Interpolation axis of `y`
    pub axis: isize,
    /// Extrapolation override
    pub extrapolate: Option<Extrapolate>,
    /// Relative tolerance on periodic end values
    pub periodic_rtol: f64,
    /// Absolute tolerance on periodic end values
    pub periodic_atol: f64,
}

impl BuildOptions {
    fn config(&self) -> SplineConfig {
        let config = SplineConfig::new()
            .with_axis(self.axis)
            .with_periodic_tolerance(self.periodic_rtol, self.periodic_atol);
        match self.extrapolate {
            Some(mode) => config.with_extrapolate(mode),
            None => config,
        }
    }
}

/// Load the samples named by `options` and build the interpolant.
pub fn load_and_build(options: &BuildOptions) -> Result<(Samples, PiecewisePolynomial<f64>)> {
    let samples = input::load(&options.input)?;
    let pp = build(options, &samples)?;
    Ok((samples, pp))
}

/// Build the interpolant selected by `options`.
pub fn build(options: &BuildOptions, samples: &Samples) -> Result<PiecewisePolynomial<f64>> {
    let config = options.config();
    info!("Building {:?} interpolant", options.method);

    let pp = match options.method {
        Method::Hermite => {
            let dydx = samples.dydx.as_ref().ok_or_else(|| {
                CliError::invalid_input("the hermite method needs `dydx` values in the input")
            })?;
            build_hermite(&samples.x, &samples.y, dydx, &config)?
        }
        Method::Monotone => build_monotone(&samples.x, &samples.y, &config)?,
        Method::Spline => {
            let batch = batch_shape(samples.y.shape(), options.axis);
            let conditions = BoundaryConditions::new(
                parse_condition(&options.bc_start, &batch)?,
                parse_condition(&options.bc_end, &batch)?,
            );
            build_boundary_spline(&samples.x, &samples.y, &conditions, &config)?
        }
    };
    Ok(pp)
}

/// Parse a boundary tag.
///
/// Besides the named conditions, `first:V` and `second:V` give a first or
/// second derivative of `V` applied to every series.
pub fn parse_condition(tag: &str, batch_shape: &[usize]) -> Result<BoundaryCondition<f64>> {
    let Some((kind, value)) = tag.split_once(':') else {
        return Ok(tag.trim().parse()?);
    };

    let order = match kind.trim() {
        "first" | "1" => 1,
        "second" | "2" => 2,
        other => {
            return Err(CliError::invalid_argument(format!(
                "unknown derivative kind `{}` in boundary condition `{}`",
                other, tag
            )))
        }
    };
    let value: f64 = value.trim().parse().map_err(|_| {
        CliError::invalid_argument(format!("`{}` is not a number in `{}`", value, tag))
    })?;
    Ok(BoundaryCondition::derivative(
        order,
        ArrayD::from_elem(IxDyn(batch_shape), value),
    ))
}

/// Shape of `y` without the interpolation axis.
fn batch_shape(shape: &[usize], axis: isize) -> Vec<usize> {
    if shape.is_empty() {
        return Vec::new();
    }
    let axis = axis.rem_euclid(shape.len() as isize) as usize;
    shape
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != axis)
        .map(|(_, &len)| len)
        .collect()
}

/// Format a float for table output.
pub(crate) fn cell(value: f64) -> String {
    format!("{:>14.8}", value)
}

/// Column headers for the series of `samples`.
pub(crate) fn series_labels(samples: &Samples, count: usize) -> Vec<String> {
    if samples.labels.len() == count {
        samples.labels.clone()
    } else if count == 1 {
        vec!["y".to_string()]
    } else {
        (0..count).map(|j| format!("y[{}]", j)).collect()
    }
}

/// Nested JSON arrays mirroring the shape of `values`.
pub(crate) fn to_json(values: ArrayViewD<'_, f64>) -> Value {
    if values.ndim() == 0 {
        return values.iter().next().map_or(Value::Null, |&v| json!(v));
    }
    Value::Array(values.outer_iter().map(to_json).collect())
}
