//! Eval command implementation
//!
//! Evaluates the interpolant, or one of its derivatives, at query points.

use ndarray::Array1;
use serde_json::json;
use spline_core::math::interpolators::PiecewisePolynomial;
use tracing::info;

use super::{cell, load_and_build, series_labels, to_json, BuildOptions};
use crate::config::OutputFormat;
use crate::input::Samples;
use crate::Result;

/// Run the eval command
pub fn run(options: &BuildOptions, derivative: usize, at: &[f64], format: OutputFormat) -> Result<()> {
    info!("Evaluating at {} points", at.len());
    info!("  Input: {}", options.input);
    info!("  Derivative order: {}", derivative);

    let (samples, pp) = load_and_build(options)?;
    println!("{}", render(&samples, &pp, derivative, at, format)?);
    Ok(())
}

/// Produce the report text.
pub fn render(
    samples: &Samples,
    pp: &PiecewisePolynomial<f64>,
    derivative: usize,
    at: &[f64],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let values = pp.call(&Array1::from(at.to_vec()), derivative)?;
            let report = json!({
                "derivative": derivative,
                "x": at,
                "values": to_json(values.view()),
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Table => {
            let labels = series_labels(samples, pp.batch_len());
            let mut lines = vec![header(&labels)];
            for &x in at {
                let row = pp.evaluate_derivative(x, derivative)?;
                let mut line = cell(x);
                for v in row.iter() {
                    line.push_str(&cell(*v));
                }
                lines.push(line);
            }
            Ok(lines.join("\n"))
        }
    }
}

fn header(labels: &[String]) -> String {
    let mut line = format!("{:>14}", "x");
    for label in labels {
        line.push_str(&format!("{:>14}", label));
    }
    line
}
