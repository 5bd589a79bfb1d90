//! Per-benchmark results and the comparisons attached to them.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::stats::{TimingComparison, TimingSample};
use crate::verdict::Verdict;

/// One auxiliary operation observed while a benchmark ran.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRecord {
    /// What was executed, e.g. a query.
    pub description: String,
    /// How long the operation took.
    pub duration: Duration,
}

impl OperationRecord {
    pub fn new(description: impl Into<String>, duration: Duration) -> Self {
        Self {
            description: description.into(),
            duration,
        }
    }
}

/// Auxiliary-operation cost of one benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSample {
    /// Average number of operations per run.
    pub value: f64,
    /// Operations observed during the most recent run only. Never persisted.
    #[serde(skip)]
    pub operations: Vec<OperationRecord>,
}

impl CostSample {
    pub fn new(value: f64, operations: Vec<OperationRecord>) -> Self {
        Self { value, operations }
    }
}

/// Cost of a benchmark with its delta against the baseline, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostComparison {
    pub value: f64,
    /// `new.value - old.value`, `None` without a baseline.
    pub signed_delta: Option<f64>,
}

impl CostComparison {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_cost_delta(self.signed_delta)
    }

    /// `new`, `no change`, or the signed delta such as `+2.0`.
    pub fn pretty_diff(&self) -> String {
        match self.signed_delta {
            None => "new".to_string(),
            Some(d) if d == 0.0 => "no change".to_string(),
            Some(d) => format!("{:+.1}", d),
        }
    }
}

/// Everything derived from comparing a benchmark against its baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub cost_delta: f64,
    pub timing: TimingComparison,
}

/// Cost and timing of a single benchmark within a single case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    #[serde(alias = "queries")]
    pub cost: CostSample,
    pub timing: TimingSample,
    /// Present once the result has been compared against a baseline.
    #[serde(skip)]
    pub comparison: Option<Comparison>,
}

impl BenchmarkResult {
    pub fn new(cost: CostSample, timing: TimingSample) -> Self {
        Self {
            cost,
            timing,
            comparison: None,
        }
    }

    pub fn cost_comparison(&self) -> CostComparison {
        CostComparison {
            value: self.cost.value,
            signed_delta: self.comparison.map(|c| c.cost_delta),
        }
    }

    pub fn timing_comparison(&self) -> Option<TimingComparison> {
        self.comparison.map(|c| c.timing)
    }

    pub fn cost_verdict(&self) -> Verdict {
        self.cost_comparison().verdict()
    }

    pub fn timing_verdict(&self) -> Verdict {
        self.timing_comparison()
            .map(|t| t.verdict())
            .unwrap_or(Verdict::NoPreviousData)
    }

    /// Combined verdict of both cost dimensions.
    pub fn verdict(&self) -> Verdict {
        self.cost_verdict().merge(self.timing_verdict())
    }

    /// `new` or the signed timing delta in seconds.
    pub fn pretty_timing_diff(&self) -> String {
        self.timing_comparison()
            .map(|t| t.pretty())
            .unwrap_or_else(|| "new".to_string())
    }
}

/// Results of one case, keyed by benchmark name.
pub type CaseResults = BTreeMap<String, BenchmarkResult>;

/// Results of a whole run, keyed by qualified case name.
pub type Results = BTreeMap<String, CaseResults>;
