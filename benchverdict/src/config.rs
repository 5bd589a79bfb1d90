//! Configuration loading for benchverdict.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use benchverdict_core::{validate_sample_size, CriticalValueSource, VarianceRatioTTest};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for benchverdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for statistical hypothesis testing.
    pub hypothesis: HypothesisConfig,
    /// Settings for benchmark sampling.
    pub sampling: SamplingConfig,
    /// Settings for the terminal report.
    pub output: OutputConfig,
}

/// Configuration for statistical hypothesis testing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HypothesisConfig {
    /// Significance level of the t-test (0.05 or 0.01).
    pub significance_level: f64,
    /// Critical values from the static tables or from exact distributions.
    pub critical_values: CriticalValueSource,
}

/// Configuration for benchmark sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of samples to collect for each benchmark.
    pub sample_size: usize,
    /// Seconds of CPU warmup before the first benchmark (0 disables).
    pub warmup_seconds: u64,
}

/// Configuration for the terminal report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// List the operations captured during the last sample of each benchmark.
    pub show_operations: bool,
    /// Colorize verdicts.
    pub color: bool,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            critical_values: CriticalValueSource::Table,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_size: 61,
            warmup_seconds: 10,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_operations: false,
            color: true,
        }
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".benchverdict.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `.benchverdict.toml` in the current directory, or use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or fall back to [`Config::load_or_default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }

    /// Check that the settings can drive a comparison.
    ///
    /// # Errors
    ///
    /// Returns an error for a sample size outside the critical-value tables or
    /// an unsupported significance level.
    pub fn validate(&self) -> Result<()> {
        validate_sample_size(self.sampling.sample_size).context("Invalid sampling.sample_size")?;
        self.significance_test()?;
        Ok(())
    }

    /// The significance test described by `[hypothesis]`.
    pub fn significance_test(&self) -> Result<VarianceRatioTTest> {
        VarianceRatioTTest::new(
            self.hypothesis.significance_level,
            self.hypothesis.critical_values,
        )
        .context("Invalid hypothesis.significance_level")
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_secs(self.sampling.warmup_seconds)
    }
}
