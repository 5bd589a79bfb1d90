use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::verdict::Verdict;

/// Errors raised while aggregating samples or looking up critical values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Standard deviation needs at least two observations.
    #[error("At least 2 observations are required, got {0}")]
    InsufficientSample(usize),

    /// Degrees of freedom outside the tabulated range.
    #[error("Degrees of freedom {freedom} outside table coverage [{low}, {high}]")]
    FreedomOutOfRange { freedom: f64, low: f64, high: f64 },

    /// Significance level without a critical-value column.
    #[error("No critical values available for significance level {0}")]
    UnsupportedAlpha(f64),

    /// No pair of adjacent critical values brackets the statistic.
    #[error("Couldn't find an alpha value for F = {0}")]
    NoBracket(f64),

    /// A statistical distribution could not be constructed.
    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),
}

/// Outcome of testing a new timing sample against a baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingComparison {
    /// `new.average - old.average`, in seconds.
    pub signed_delta: f64,
    /// True when the difference is not statistically significant.
    pub negligible: bool,
}

impl TimingComparison {
    /// Higher time is worse.
    pub fn verdict(&self) -> Verdict {
        if self.negligible {
            Verdict::Unchanged
        } else if self.signed_delta > 0.0 {
            Verdict::Regression
        } else {
            Verdict::Improvement
        }
    }

    /// Signed delta in seconds, e.g. `+0.0125`.
    pub fn pretty(&self) -> String {
        format!("{:+.4}", self.signed_delta)
    }
}

/// Source of critical values for the significance engine.
pub trait CriticalValues: Send + Sync {
    /// Approximate upper-tail probability of `f` under F(freedom, freedom).
    fn f_tail(&self, f: f64, freedom: f64) -> Result<f64, StatsError>;

    /// Critical t value at one-tailed level `alpha`.
    fn inverse_t(&self, alpha: f64, freedom: f64) -> Result<f64, StatsError>;
}

/// Which critical-value implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticalValueSource {
    /// Interpolated static tables.
    #[default]
    Table,
    /// Closed-form distribution quantiles.
    Exact,
}

impl CriticalValues for CriticalValueSource {
    fn f_tail(&self, f: f64, freedom: f64) -> Result<f64, StatsError> {
        match self {
            Self::Table => TableCriticalValues.f_tail(f, freedom),
            Self::Exact => ExactCriticalValues.f_tail(f, freedom),
        }
    }

    fn inverse_t(&self, alpha: f64, freedom: f64) -> Result<f64, StatsError> {
        match self {
            Self::Table => TableCriticalValues.inverse_t(alpha, freedom),
            Self::Exact => ExactCriticalValues.inverse_t(alpha, freedom),
        }
    }
}

/// Trait for tests deciding whether two timing samples differ significantly.
pub trait SignificanceTest: Send + Sync {
    /// Compare `new` against `old`, both aggregated from `n` observations.
    fn compare(
        &self,
        new: &TimingSample,
        old: &TimingSample,
        n: usize,
    ) -> Result<TimingComparison, StatsError>;
}

mod exact;
mod sample;
pub mod tables;
mod ttest;

pub use exact::ExactCriticalValues;
pub use sample::TimingSample;
pub use tables::TableCriticalValues;
pub use ttest::{VarianceRatioTTest, SUPPORTED_SIGNIFICANCE_LEVELS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_verdict() {
        let negligible = TimingComparison {
            signed_delta: 0.5,
            negligible: true,
        };
        let slower = TimingComparison {
            signed_delta: 0.5,
            negligible: false,
        };
        let faster = TimingComparison {
            signed_delta: -0.5,
            negligible: false,
        };

        assert_eq!(negligible.verdict(), Verdict::Unchanged);
        assert_eq!(slower.verdict(), Verdict::Regression);
        assert_eq!(faster.verdict(), Verdict::Improvement);
    }

    #[test]
    fn test_timing_pretty() {
        let comparison = TimingComparison {
            signed_delta: 0.0125,
            negligible: false,
        };
        assert_eq!(comparison.pretty(), "+0.0125");

        let comparison = TimingComparison {
            signed_delta: -1.0,
            negligible: false,
        };
        assert_eq!(comparison.pretty(), "-1.0000");
    }

    #[test]
    fn test_critical_value_source_serde() {
        let source: CriticalValueSource = serde_json::from_str("\"exact\"").unwrap();
        assert_eq!(source, CriticalValueSource::Exact);
        assert_eq!(
            serde_json::to_string(&CriticalValueSource::Table).unwrap(),
            "\"table\""
        );
    }
}
