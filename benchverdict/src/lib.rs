//! benchverdict: benchmark runs classified against a saved baseline
//!
//! A benchmark binary registers its cases in a [`Suite`] and hands it to
//! [`main`]. Each benchmark is sampled, optionally compared against a
//! previous result file with a variance-ratio t-test plus an operation count
//! delta, and reported per benchmark as a single verdict.

pub mod cli;
pub mod config;
pub mod logging;
pub mod run;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

// Re-export core types for convenience
pub use benchverdict_core::{
    compare_results, load_results_file, write_results_file, BenchmarkResult, CriticalValueSource,
    Reporter, Results, TerminalReporter, Verdict,
};
pub use benchverdict_harness::{
    Benchmark, BenchmarkCase, Environment, NullEnvironment, OperationLog, RecordingEnvironment,
    Suite,
};

pub use cli::Cli;
pub use config::Config;
pub use run::run;

/// Entry point for benchmark binaries without an operation-capturing environment.
pub fn main(suite: Suite) -> ExitCode {
    main_with_environment(suite, &mut NullEnvironment)
}

/// Parse the command line, run `suite` in `env` and report.
///
/// Any error is printed to stderr and turned into a failing exit code.
pub fn main_with_environment(suite: Suite, env: &mut dyn Environment) -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match execute(suite, env, &cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(suite: Suite, env: &mut dyn Environment, cli: &Cli) -> anyhow::Result<Option<Results>> {
    // Load config and apply CLI overrides
    let mut config = Config::load_from(cli.config.as_deref())?;
    cli.apply_to_config(&mut config);
    debug!(?config, "configuration");

    let reporter = if config.output.color {
        TerminalReporter::new()
    } else {
        TerminalReporter::without_colors()
    }
    .with_operations(config.output.show_operations);

    run(suite, env, cli, &config, &reporter)
}
