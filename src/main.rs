//! condeval - evaluate a condition expression request against its document

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use condeval::request::EvaluationRequest;

/// Exit status for a condition that evaluated to false in quiet mode
const EXIT_FALSE: u8 = 1;
/// Exit status for a request that could not be loaded or evaluated
const EXIT_ERROR: u8 = 2;

/// Evaluate a condition expression against a document
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON request file with condition, document, values and aliases
    request: PathBuf,

    /// Override the maximum expression nesting depth
    #[arg(short = 'm', long)]
    max_depth: Option<usize>,

    /// Print nothing; exit 0 when true, 1 when false (errors always exit 2)
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn run(args: &Args) -> Result<bool> {
    let mut request = EvaluationRequest::load(&args.request)?;
    if let Some(max_depth) = args.max_depth {
        request.config.max_depth = max_depth;
    }

    request
        .evaluate()
        .with_context(|| format!("Failed to evaluate condition {}", request.condition))
}

fn exit_status(outcome: &Result<bool>, quiet: bool) -> u8 {
    match outcome {
        Err(_) => EXIT_ERROR,
        Ok(false) if quiet => EXIT_FALSE,
        Ok(_) => 0,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let outcome = run(&args);
    match &outcome {
        Ok(verdict) if !args.quiet => println!("{}", verdict),
        Ok(_) => {}
        Err(e) => eprintln!("Error: {:#}", e),
    }
    ExitCode::from(exit_status(&outcome, args.quiet))
}
