//! Coeffs command implementation
//!
//! Dumps the breakpoints and per-interval polynomial coefficients. Row `c[0]`
//! is the highest power of `x - x[i]`.

use serde_json::json;
use spline_core::math::interpolators::PiecewisePolynomial;
use tracing::info;

use super::{cell, load_and_build, series_labels, to_json, BuildOptions};
use crate::config::OutputFormat;
use crate::input::Samples;
use crate::Result;

/// Run the coeffs command
pub fn run(options: &BuildOptions, format: OutputFormat) -> Result<()> {
    info!("Dumping coefficients");
    info!("  Input: {}", options.input);

    let (samples, pp) = load_and_build(options)?;
    println!("{}", render(&samples, &pp, format)?);
    Ok(())
}

/// Produce the report text.
pub fn render(samples: &Samples, pp: &PiecewisePolynomial<f64>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let coefficients = pp.coefficients_nd()?;
            let report = json!({
                "order": pp.order(),
                "extrapolate": pp.extrapolate().to_string(),
                "breakpoints": pp.breakpoints(),
                "coefficients": to_json(coefficients.view()),
            });
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Table => {
            let c = pp.coefficients();
            let x = pp.breakpoints();
            let labels = series_labels(samples, pp.batch_len());

            let mut header = format!("{:>14}{:>14}{:>14}", "series", "x_lo", "x_hi");
            for power in (0..pp.order()).rev() {
                header.push_str(&format!("{:>14}", format!("c_{}", power)));
            }

            let mut lines = vec![header];
            for (j, label) in labels.iter().enumerate() {
                for i in 0..pp.intervals() {
                    let mut line = format!("{:>14}{}{}", label, cell(x[i]), cell(x[i + 1]));
                    for row in 0..pp.order() {
                        line.push_str(&cell(c[[row, i, j]]));
                    }
                    lines.push(line);
                }
            }
            Ok(lines.join("\n"))
        }
    }
}
