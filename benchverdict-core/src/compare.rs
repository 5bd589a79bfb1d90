//! Pairing of new results with a baseline run.
//!
//! Cases and benchmarks are matched by name. Anything without a baseline
//! counterpart passes through untouched and classifies as "no previous data".

use thiserror::Error;
use tracing::{debug, info};

use crate::result::{BenchmarkResult, CaseResults, Comparison, Results};
use crate::stats::tables::SUPPORTED_SAMPLE_SIZES;
use crate::stats::{SignificanceTest, StatsError};

/// Errors that can occur while comparing runs.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Sample size whose degrees of freedom fall outside the critical-value tables.
    #[error(
        "Sample size {size} is not supported, expected {}..={}",
        SUPPORTED_SAMPLE_SIZES.start(),
        SUPPORTED_SAMPLE_SIZES.end()
    )]
    UnsupportedSampleSize { size: usize },

    /// The significance engine failed for one benchmark.
    #[error("Failed to compare {case}::{benchmark}: {source}")]
    Statistics {
        case: String,
        benchmark: String,
        #[source]
        source: StatsError,
    },
}

/// Check that `n` keeps every degree-of-freedom lookup inside the tables.
pub fn validate_sample_size(n: usize) -> Result<(), CompareError> {
    if SUPPORTED_SAMPLE_SIZES.contains(&n) {
        Ok(())
    } else {
        Err(CompareError::UnsupportedSampleSize { size: n })
    }
}

/// Attach a comparison against `old` to a single benchmark result.
pub fn compare_benchmark(
    new: BenchmarkResult,
    old: &BenchmarkResult,
    n: usize,
    test: &dyn SignificanceTest,
) -> Result<BenchmarkResult, StatsError> {
    let timing = test.compare(&new.timing, &old.timing, n)?;
    let cost_delta = new.cost.value - old.cost.value;

    Ok(BenchmarkResult {
        comparison: Some(Comparison { cost_delta, timing }),
        ..new
    })
}

/// Compare every benchmark in `new` against its counterpart in `old`.
///
/// The output has the same case/benchmark nesting as `new`.
///
/// # Errors
///
/// Returns an error if `n` is outside the supported sample sizes or if the
/// significance engine fails for any benchmark.
pub fn compare_results(
    new: Results,
    old: &Results,
    n: usize,
    test: &dyn SignificanceTest,
) -> Result<Results, CompareError> {
    validate_sample_size(n)?;

    let mut comparison = Results::new();

    for (case, benchmarks) in new {
        let Some(old_benchmarks) = old.get(&case) else {
            info!(case = %case, "no previous data for case");
            comparison.insert(case, benchmarks);
            continue;
        };

        let mut compared = CaseResults::new();
        for (bench_name, result) in benchmarks {
            let Some(old_result) = old_benchmarks.get(&bench_name) else {
                info!(case = %case, benchmark = %bench_name, "no previous data for benchmark");
                compared.insert(bench_name, result);
                continue;
            };

            let result = compare_benchmark(result, old_result, n, test).map_err(|source| {
                CompareError::Statistics {
                    case: case.clone(),
                    benchmark: bench_name.clone(),
                    source,
                }
            })?;
            debug!(
                case = %case,
                benchmark = %bench_name,
                verdict = %result.verdict(),
                "compared benchmark"
            );
            compared.insert(bench_name, result);
        }
        comparison.insert(case, compared);
    }

    Ok(comparison)
}
