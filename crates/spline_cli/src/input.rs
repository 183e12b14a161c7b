//! Sample file loading.
//!
//! Two layouts are accepted:
//!
//! - JSON: `{"x": [...], "y": [...], "dydx": [...]}` where `y` and the
//!   optional `dydx` are (possibly nested) rectangular arrays
//! - CSV: an `x` column, one column per series, and optionally a
//!   `dydx_<series>` column for every series
//!
//! The format is chosen by file extension; anything other than `.csv` is
//! read as JSON.

use ndarray::{Array1, ArrayD, Axis, IxDyn};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::{CliError, Result};

/// Samples read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    /// Node positions
    pub x: Array1<f64>,
    /// Node values
    pub y: ArrayD<f64>,
    /// Node derivatives, same shape as `y`
    pub dydx: Option<ArrayD<f64>>,
    /// Series labels, one per column of a CSV file
    pub labels: Vec<String>,
}

#[derive(Deserialize)]
struct JsonSamples {
    x: Vec<f64>,
    y: Value,
    #[serde(default)]
    dydx: Option<Value>,
}

/// Load samples from `path`.
pub fn load(path: &str) -> Result<Samples> {
    let file = Path::new(path);
    if !file.exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }

    let is_csv = file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    let samples = if is_csv {
        from_csv(csv::Reader::from_path(file)?)?
    } else {
        from_json(&std::fs::read_to_string(file)?)?
    };

    debug!(
        nodes = samples.x.len(),
        shape = ?samples.y.shape(),
        derivatives = samples.dydx.is_some(),
        "samples loaded from {}",
        path
    );
    Ok(samples)
}

/// Parse the JSON layout.
pub fn from_json(text: &str) -> Result<Samples> {
    let raw: JsonSamples = serde_json::from_str(text)?;
    let y = nested_array(&raw.y, "y")?;
    let dydx = raw
        .dydx
        .as_ref()
        .map(|d| nested_array(d, "dydx"))
        .transpose()?;
    Ok(Samples {
        x: Array1::from(raw.x),
        y,
        dydx,
        labels: Vec::new(),
    })
}

/// Parse the CSV layout.
pub fn from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Samples> {
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let x_col = headers
        .iter()
        .position(|h| h == "x")
        .ok_or_else(|| CliError::invalid_input("CSV input needs an `x` column"))?;

    let series: Vec<usize> = (0..headers.len())
        .filter(|&i| i != x_col && !headers[i].starts_with("dydx_"))
        .collect();
    if series.is_empty() {
        return Err(CliError::invalid_input("CSV input has no value columns"));
    }
    let derivative_cols: Vec<usize> = (0..headers.len())
        .filter(|&i| headers[i].starts_with("dydx_"))
        .collect();
    let derivatives = if derivative_cols.is_empty() {
        None
    } else {
        let cols = series
            .iter()
            .map(|&s| {
                let name = format!("dydx_{}", headers[s]);
                headers.iter().position(|h| *h == name).ok_or_else(|| {
                    CliError::invalid_input(format!("missing derivative column `{}`", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Some(cols)
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut dydx = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let field = |col: usize| -> Result<f64> {
            let text = record.get(col).unwrap_or("").trim();
            text.parse::<f64>().map_err(|_| {
                CliError::invalid_input(format!(
                    "row {}, column `{}`: `{}` is not a number",
                    row + 1,
                    headers[col],
                    text
                ))
            })
        };
        x.push(field(x_col)?);
        for &s in &series {
            y.push(field(s)?);
        }
        if let Some(cols) = &derivatives {
            for &d in cols {
                dydx.push(field(d)?);
            }
        }
    }

    let n = x.len();
    let m = series.len();
    let shape = |data: Vec<f64>| -> Result<ArrayD<f64>> {
        let array = ArrayD::from_shape_vec(IxDyn(&[n, m]), data)
            .map_err(|e| CliError::invalid_input(e.to_string()))?;
        // A single series is read as a plain vector
        Ok(if m == 1 {
            array.index_axis_move(Axis(1), 0)
        } else {
            array
        })
    };

    Ok(Samples {
        x: Array1::from(x),
        y: shape(y)?,
        dydx: derivatives.map(|_| shape(dydx)).transpose()?,
        labels: series.iter().map(|&s| headers[s].clone()).collect(),
    })
}

/// Convert a nested JSON array of numbers into an n-dimensional array.
fn nested_array(value: &Value, name: &str) -> Result<ArrayD<f64>> {
    let mut shape = Vec::new();
    let mut level = value;
    while let Value::Array(items) = level {
        shape.push(items.len());
        match items.first() {
            Some(first) => level = first,
            None => break,
        }
    }
    if shape.is_empty() {
        return Err(CliError::invalid_input(format!("`{}` must be an array", name)));
    }

    let mut data = Vec::with_capacity(shape.iter().product());
    flatten(value, &shape, name, &mut data)?;
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|e| CliError::invalid_input(e.to_string()))
}

fn flatten(value: &Value, shape: &[usize], name: &str, out: &mut Vec<f64>) -> Result<()> {
    match (value, shape.split_first()) {
        (Value::Array(items), Some((&len, rest))) if items.len() == len => {
            for item in items {
                flatten(item, rest, name, out)?;
            }
            Ok(())
        }
        (Value::Number(number), None) => {
            let v = number
                .as_f64()
                .ok_or_else(|| CliError::invalid_input(format!("`{}` holds {}", name, number)))?;
            out.push(v);
            Ok(())
        }
        _ => Err(CliError::invalid_input(format!(
            "`{}` must be a rectangular array of numbers",
            name
        ))),
    }
}
