//! Simulate a network described by a JSON model file
//!
//! Run with: cargo run -p bayes-sim --example run_model -- crates/sim/models/disease.json [--json]
//!
//! Prints the report as text, or as JSON with `--json`.

use std::path::PathBuf;
use std::process::ExitCode;

use bayes_sim::{ModelFile, Report, SimError, Simulation};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "run_model")]
#[command(about = "Forward-sample a Bayesian network model file and answer its queries")]
struct Args {
    /// Path to the JSON model file
    model: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn run(args: &Args) -> Result<Report, SimError> {
    let model = ModelFile::from_path(&args.model)?;
    let net = model.network.build()?;
    Simulation::new(&net, model.simulation).run()
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let output = run(&args).and_then(|report| {
        if args.json {
            report.to_json()
        } else {
            Ok(report.to_string())
        }
    });

    match output {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%e, path = %args.model.display(), "Simulation failed");
            ExitCode::FAILURE
        }
    }
}
