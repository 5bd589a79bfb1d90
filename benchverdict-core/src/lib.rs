//! Core types and the statistical comparison engine for benchverdict.
//!
//! This crate is shared by the benchverdict CLI and the benchverdict-harness
//! runtime: it aggregates timing samples, decides whether a timing change is
//! significant, classifies cost deltas into verdicts and stores results.

pub mod compare;
pub mod persist;
pub mod report;
pub mod result;
pub mod stats;
pub mod verdict;

// Re-export main types for convenience
pub use compare::{compare_benchmark, compare_results, validate_sample_size, CompareError};
pub use persist::{load_results, load_results_file, write_results, write_results_file, PersistError};
pub use report::{ReportError, Reporter, TerminalReporter};
pub use result::{
    BenchmarkResult, CaseResults, Comparison, CostComparison, CostSample, OperationRecord,
    Results,
};
pub use stats::{
    CriticalValueSource, CriticalValues, SignificanceTest, StatsError, TimingComparison,
    TimingSample, VarianceRatioTTest,
};
pub use verdict::Verdict;
