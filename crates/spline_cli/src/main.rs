//! Spline CLI - Command Line Front End for the Interpolation Engine
//!
//! Loads samples from JSON or CSV files, builds a piecewise cubic
//! interpolant with `spline_core` and reports on it.
//!
//! # Commands
//!
//! - `spline eval --input <file> --at <x>...` - Evaluate the interpolant or a derivative
//! - `spline integrate --input <file> --from <a> --to <b>` - Definite integral per series
//! - `spline coeffs --input <file>` - Dump breakpoints and coefficients
//!
//! Defaults for the construction flags come from `spline.toml` and
//! `SPLINE_*` environment variables; explicit flags win.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use spline_core::math::interpolators::Extrapolate;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use commands::BuildOptions;
use crate::config::{Method, OutputFormat, Settings};

/// Piecewise cubic interpolation CLI
#[derive(Parser)]
#[command(name = "spline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "spline.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every command that builds an interpolant.
#[derive(Args, Debug)]
struct BuildArgs {
    /// Sample file (JSON, or CSV by extension)
    #[arg(short, long)]
    input: String,

    /// Construction method
    #[arg(short, long, value_enum)]
    method: Option<Method>,

    /// Start boundary condition (not-a-knot, natural, clamped, periodic, first:V, second:V)
    #[arg(long)]
    bc_start: Option<String>,

    /// End boundary condition
    #[arg(long)]
    bc_end: Option<String>,

    /// Axis of `y` that runs along `x` (negative counts from the end)
    #[arg(short, long, allow_hyphen_values = true)]
    axis: Option<isize>,

    /// Extrapolation policy (forbid, extend, periodic)
    #[arg(short, long)]
    extrapolate: Option<Extrapolate>,
}

impl BuildArgs {
    /// Merge the flags over the configured defaults.
    fn resolve(self, settings: &Settings) -> BuildOptions {
        BuildOptions {
            input: self.input,
            method: self.method.unwrap_or(settings.method),
            bc_start: self.bc_start.unwrap_or_else(|| settings.bc_start.clone()),
            bc_end: self.bc_end.unwrap_or_else(|| settings.bc_end.clone()),
            axis: self.axis.unwrap_or(settings.axis),
            extrapolate: self.extrapolate.or(settings.extrapolate),
            periodic_rtol: settings.periodic_rtol,
            periodic_atol: settings.periodic_atol,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the interpolant (or a derivative) at query points
    Eval {
        #[command(flatten)]
        build: BuildArgs,

        /// Derivative order
        #[arg(short, long, default_value = "0")]
        derivative: usize,

        /// Query points
        #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
        at: Vec<f64>,

        /// Output format (table, json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Integrate each series between two bounds
    Integrate {
        #[command(flatten)]
        build: BuildArgs,

        /// Lower bound
        #[arg(long, allow_negative_numbers = true)]
        from: f64,

        /// Upper bound
        #[arg(long, allow_negative_numbers = true)]
        to: f64,

        /// Output format (table, json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print breakpoints and polynomial coefficients
    Coeffs {
        #[command(flatten)]
        build: BuildArgs,

        /// Output format (table, json)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let settings = Settings::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;
    debug!(?settings, "configuration loaded");

    match cli.command {
        Commands::Eval {
            build,
            derivative,
            at,
            format,
        } => commands::eval::run(
            &build.resolve(&settings),
            derivative,
            &at,
            format.unwrap_or(settings.format),
        )?,
        Commands::Integrate {
            build,
            from,
            to,
            format,
        } => commands::integrate::run(
            &build.resolve(&settings),
            from,
            to,
            format.unwrap_or(settings.format),
        )?,
        Commands::Coeffs { build, format } => {
            commands::coeffs::run(&build.resolve(&settings), format.unwrap_or(settings.format))?
        }
    }

    Ok(())
}
