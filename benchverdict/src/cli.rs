//! Command-line interface for benchverdict.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "benchverdict")]
#[command(about = "Run benchmarks and classify regressions against a saved baseline")]
#[command(version)]
pub struct Cli {
    /// Cases to run, by qualified name, suffix or short name (default: all)
    pub cases: Vec<String>,

    /// Baseline result file to compare against
    #[arg(short, long)]
    pub compare: Option<PathBuf>,

    /// Write results to this file for use as a future baseline
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report results loaded from this file instead of running benchmarks
    /// (comparisons assume `--sample-size` matches the run that produced it)
    #[arg(long, conflicts_with = "cases")]
    pub results: Option<PathBuf>,

    /// List the operations captured during the last sample
    #[arg(short = 'q', long)]
    pub show_operations: bool,

    /// Number of sample iterations per benchmark
    #[arg(long)]
    pub sample_size: Option<usize>,

    /// Significance level of the t-test (0.05 or 0.01)
    #[arg(long)]
    pub significance_level: Option<f64>,

    /// Seconds of CPU warmup before sampling
    #[arg(long)]
    pub warmup_seconds: Option<u64>,

    /// Path to config file (default: .benchverdict.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values and set flags will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(sample_size) = self.sample_size {
            config.sampling.sample_size = sample_size;
        }

        if let Some(significance_level) = self.significance_level {
            config.hypothesis.significance_level = significance_level;
        }

        if let Some(warmup_seconds) = self.warmup_seconds {
            config.sampling.warmup_seconds = warmup_seconds;
        }

        if self.show_operations {
            config.output.show_operations = true;
        }

        if self.no_color {
            config.output.color = false;
        }
    }
}
