//! Integrate command implementation
//!
//! Computes the definite integral of every series between two bounds.

use serde_json::json;
use spline_core::math::interpolators::PiecewisePolynomial;
use tracing::info;

use super::{cell, load_and_build, series_labels, to_json, BuildOptions};
use crate::config::OutputFormat;
use crate::input::Samples;
use crate::Result;

/// Run the integrate command
pub fn run(options: &BuildOptions, from: f64, to: f64, format: OutputFormat) -> Result<()> {
    info!("Integrating from {} to {}", from, to);
    info!("  Input: {}", options.input);

    let (samples, pp) = load_and_build(options)?;
    println!("{}", render(&samples, &pp, from, to, format)?);
    Ok(())
}

/// Produce the report text.
pub fn render(
    samples: &Samples,
    pp: &PiecewisePolynomial<f64>,
    from: f64,
    to: f64,
    format: OutputFormat,
) -> Result<String> {
    let integral = pp.integrate(from, to)?;
    match format {
        OutputFormat::Json => {
            let report = json!({
                "from": from,
                "to": to,
                "integral": to_json(integral.view()),
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Table => {
            let labels = series_labels(samples, integral.len());
            Ok(labels
                .iter()
                .zip(integral.iter())
                .map(|(label, v)| format!("{:>14}{}", label, cell(*v)))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}
