//! The sampling protocol.
//!
//! Every benchmark is invoked `sample_size` times, sequentially. Each sample
//! runs the case setup, times one invocation while capturing the auxiliary
//! operations it performs, and resets persisted state unless the benchmark
//! is pure.

use std::time::{Duration, Instant};

use benchverdict_core::{
    BenchmarkResult, CaseResults, CostSample, OperationRecord, Results, StatsError, TimingSample,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::environment::Environment;
use crate::{Benchmark, BenchmarkCase, Suite};

/// Errors that abort a benchmark run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The collected samples cannot be aggregated.
    #[error("Benchmark {benchmark} cannot be sampled: {source}")]
    Sample {
        benchmark: String,
        #[source]
        source: StatsError,
    },

    /// Resetting persisted state failed.
    #[error("Failed to reset state after {benchmark}: {source}")]
    Reset {
        benchmark: String,
        #[source]
        source: anyhow::Error,
    },
}

/// What was observed during exactly one benchmark invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub elapsed: Duration,
    pub operations: Vec<OperationRecord>,
}

/// Invoke a benchmark once, timing it and capturing its operations.
pub fn invoke(benchmark: &mut Benchmark, env: &mut dyn Environment) -> Invocation {
    env.begin_capture();
    let start = Instant::now();
    benchmark.call();
    let elapsed = start.elapsed();
    let operations = env.end_capture();

    Invocation {
        elapsed,
        operations,
    }
}

/// Collect `sample_size` samples of one benchmark.
///
/// The cost value is the average number of operations per sample; only the
/// operations of the final sample are kept.
///
/// # Errors
///
/// Returns an error if fewer than two samples are requested or a reset fails.
pub fn run_benchmark(
    setup: &mut dyn FnMut(),
    benchmark: &mut Benchmark,
    env: &mut dyn Environment,
    sample_size: usize,
) -> Result<BenchmarkResult, RunError> {
    if sample_size < 2 {
        return Err(RunError::Sample {
            benchmark: benchmark.name.clone(),
            source: StatsError::InsufficientSample(sample_size),
        });
    }

    let mut timings = Vec::with_capacity(sample_size);
    let mut total = 0;
    let mut last_operations = Vec::new();

    for i in 0..sample_size {
        setup();

        let invocation = invoke(benchmark, env);
        timings.push(invocation.elapsed);
        total += invocation.operations.len();

        if !benchmark.is_pure() {
            env.reset().map_err(|source| RunError::Reset {
                benchmark: benchmark.name.clone(),
                source,
            })?;
        }
        if i == sample_size - 1 {
            last_operations = invocation.operations;
        }
    }

    let timing = TimingSample::from_durations(&timings).map_err(|source| RunError::Sample {
        benchmark: benchmark.name.clone(),
        source,
    })?;
    debug!(
        benchmark = %benchmark.name,
        average = timing.average,
        stdev = timing.standard_deviation,
        operations = total,
        "sampled benchmark"
    );

    Ok(BenchmarkResult::new(
        CostSample::new(total as f64 / sample_size as f64, last_operations),
        timing,
    ))
}

/// Run every benchmark of a case.
pub fn run_case(
    case: &mut BenchmarkCase,
    env: &mut dyn Environment,
    sample_size: usize,
) -> Result<CaseResults, RunError> {
    let BenchmarkCase {
        name,
        setup,
        benchmarks,
    } = case;
    info!(case = %name, benchmarks = benchmarks.len(), "running case");

    let mut results = CaseResults::new();
    for benchmark in benchmarks.iter_mut() {
        let mut run_setup = || {
            if let Some(f) = setup.as_mut() {
                f()
            }
        };
        let result = run_benchmark(&mut run_setup, benchmark, env, sample_size)?;
        results.insert(benchmark.name.clone(), result);
    }

    Ok(results)
}

/// Run every case of a suite, keyed by case name.
pub fn run_suite(
    suite: &mut Suite,
    env: &mut dyn Environment,
    sample_size: usize,
) -> Result<Results, RunError> {
    let mut results = Results::new();
    for case in suite.cases.iter_mut() {
        let case_results = run_case(case, env, sample_size)?;
        results.insert(case.name.clone(), case_results);
    }
    Ok(results)
}
