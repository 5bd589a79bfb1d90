//! End-to-end driver: sample (or load), compare, report, save.

use anyhow::{Context, Result};
use benchverdict_core::{compare_results, load_results_file, write_results_file, Reporter, Results};
use benchverdict_harness::{run_suite, warmup, Environment, Suite};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Config;

/// Produce the results for this invocation and hand them to `reporter`.
///
/// Results come from the `--results` file when given, otherwise from sampling
/// the cases of `suite` selected by the positional filters. Returns `None`
/// when no case is selected.
///
/// # Errors
///
/// Returns an error for invalid settings, unreadable or malformed result
/// files, failed samples, and failed comparisons or writes.
pub fn run(
    suite: Suite,
    env: &mut dyn Environment,
    cli: &Cli,
    config: &Config,
    reporter: &dyn Reporter,
) -> Result<Option<Results>> {
    config.validate()?;
    let sample_size = config.sampling.sample_size;

    let mut results = match &cli.results {
        Some(path) => {
            info!(path = %path.display(), "loading benchmark data");
            load_results_file(path).with_context(|| {
                format!("Couldn't load benchmark data from {}.", path.display())
            })?
        }
        None => {
            let mut suite = suite.filter(&cli.cases);
            if suite.is_empty() {
                println!("Nothing to do.");
                return Ok(None);
            }
            debug!(cases = ?suite.list(), sample_size, "selected cases");

            warmup(config.warmup());
            run_suite(&mut suite, env, sample_size)?
        }
    };

    if let Some(path) = &cli.compare {
        let old = load_results_file(path).context("Couldn't load comparison data.")?;
        let test = config.significance_test()?;
        info!(path = %path.display(), "comparing against baseline");
        results = compare_results(results, &old, sample_size, &test)?;
    }

    reporter.report(&results)?;

    if let Some(path) = &cli.output {
        write_results_file(path, &results).context("Couldn't save benchmark data.")?;
        info!(path = %path.display(), "saved benchmark data");
    }

    Ok(Some(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchverdict_core::TerminalReporter;
    use benchverdict_harness::{BenchmarkCase, NullEnvironment};
    use clap::Parser;

    fn quick_config() -> Config {
        let mut config = Config::default();
        config.sampling.sample_size = 9;
        config.sampling.warmup_seconds = 0;
        config
    }

    fn suite() -> Suite {
        Suite::new()
            .with_case(BenchmarkCase::new("app.benches.OrderCase").pure_bench("bench_list", || {}))
            .with_case(BenchmarkCase::new("app.benches.UserCase").pure_bench("bench_get", || {}))
    }

    #[test]
    fn test_run_filters_cases() {
        let cli = Cli::parse_from(["benchverdict", "UserCase"]);

        let results = run(
            suite(),
            &mut NullEnvironment,
            &cli,
            &quick_config(),
            &TerminalReporter::without_colors(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.contains_key("app.benches.UserCase"));
    }

    #[test]
    fn test_run_nothing_to_do() {
        let cli = Cli::parse_from(["benchverdict", "MissingCase"]);

        let results = run(
            suite(),
            &mut NullEnvironment,
            &cli,
            &quick_config(),
            &TerminalReporter::without_colors(),
        )
        .unwrap();

        assert!(results.is_none());
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let cli = Cli::parse_from(["benchverdict"]);
        let mut config = quick_config();
        config.sampling.sample_size = 4;

        let result = run(
            suite(),
            &mut NullEnvironment,
            &cli,
            &config,
            &TerminalReporter::without_colors(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_run_missing_baseline() {
        let cli = Cli::parse_from(["benchverdict", "--compare", "/nonexistent/baseline.json"]);

        let err = run(
            suite(),
            &mut NullEnvironment,
            &cli,
            &quick_config(),
            &TerminalReporter::without_colors(),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Couldn't load comparison data.");
    }
}
