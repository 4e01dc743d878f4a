//! Report comparison CLI
//!
//! Compares a roof-measurement report with an insurance estimate and prints
//! the checkpoint results as JSON on stdout.

use anyhow::Result;
use clap::Parser;
use report_compare::{run, CompareRequest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "report-compare")]
#[command(
    version,
    about = "Compare a roof-measurement report against an insurance estimate"
)]
struct Args {
    /// Roof-measurement report (.pdf, or extracted text)
    #[arg(long)]
    roof: PathBuf,

    /// Insurance estimate (.pdf, or extracted text)
    #[arg(long)]
    insurance: PathBuf,

    /// TOML file with comparison tolerances
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON fields proposed by an external model for the roof report
    #[arg(long)]
    roof_fields_json: Option<PathBuf>,

    /// JSON fields proposed by an external model for the insurance estimate
    #[arg(long)]
    insurance_fields_json: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("report-compare v{}", env!("CARGO_PKG_VERSION"));

    let request = CompareRequest {
        roof: args.roof,
        insurance: args.insurance,
        config: args.config,
        roof_fields: args.roof_fields_json,
        insurance_fields: args.insurance_fields_json,
    };
    let result = run(&request)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", json);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}
