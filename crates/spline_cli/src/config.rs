//! Layered CLI defaults.
//!
//! Values come from, lowest precedence first: built-in defaults, the TOML
//! file named by `--config` (optional), then `SPLINE_*` environment
//! variables such as `SPLINE_METHOD=monotone`.

use clap::ValueEnum;
use ::config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use spline_core::math::interpolators::Extrapolate;

use crate::Result;

/// How node derivatives are obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Derivatives read from the input file
    Hermite,
    /// Shape-preserving derivatives
    Monotone,
    /// C2 cubic spline under boundary conditions
    #[default]
    Spline,
}

/// Report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Defaults for the construction and output flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Construction method
    pub method: Method,
    /// Start boundary condition tag
    pub bc_start: String,
    /// End boundary condition tag
    pub bc_end: String,
    /// Interpolation axis of `y`
    pub axis: isize,
    /// Extrapolation policy; unset means automatic
    pub extrapolate: Option<Extrapolate>,
    /// Report layout
    pub format: OutputFormat,
    /// Relative tolerance on periodic end values
    pub periodic_rtol: f64,
    /// Absolute tolerance on periodic end values
    pub periodic_atol: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            method: Method::Spline,
            bc_start: "not-a-knot".to_string(),
            bc_end: "not-a-knot".to_string(),
            axis: 0,
            extrapolate: None,
            format: OutputFormat::Table,
            periodic_rtol: 1e-15,
            periodic_atol: 1e-15,
        }
    }
}

impl Settings {
    /// Load settings from `path` (if it exists) and the environment.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("SPLINE").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
