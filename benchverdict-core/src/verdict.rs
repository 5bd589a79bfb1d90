use std::fmt;

/// Classification of a comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Regression,
    Improvement,
    /// One cost dimension regressed while the other improved.
    Mixed,
    Unchanged,
    NoPreviousData,
}

impl Verdict {
    /// Merge precedence, strongest first.
    pub const PRECEDENCE: [Verdict; 5] = [
        Verdict::Mixed,
        Verdict::Regression,
        Verdict::Improvement,
        Verdict::Unchanged,
        Verdict::NoPreviousData,
    ];

    fn rank(self) -> usize {
        match self {
            Verdict::Mixed => 0,
            Verdict::Regression => 1,
            Verdict::Improvement => 2,
            Verdict::Unchanged => 3,
            Verdict::NoPreviousData => 4,
        }
    }

    /// Combine the verdicts of two cost dimensions.
    ///
    /// A regression paired with an improvement is `Mixed`; otherwise the
    /// verdict ranking first in [`Verdict::PRECEDENCE`] wins.
    pub fn merge(self, other: Verdict) -> Verdict {
        match (self, other) {
            (Verdict::Regression, Verdict::Improvement)
            | (Verdict::Improvement, Verdict::Regression) => Verdict::Mixed,
            _ if self.rank() <= other.rank() => self,
            _ => other,
        }
    }

    /// Classify a variance-free cost delta; more cost is worse.
    pub fn from_cost_delta(delta: Option<f64>) -> Verdict {
        match delta {
            None => Verdict::NoPreviousData,
            Some(d) if d == 0.0 => Verdict::Unchanged,
            Some(d) if d > 0.0 => Verdict::Regression,
            Some(_) => Verdict::Improvement,
        }
    }

    /// Human-readable label.
    pub fn pretty(self) -> &'static str {
        match self {
            Verdict::Regression => "Regression",
            Verdict::Improvement => "Improvement",
            Verdict::Mixed => "Mixed",
            Verdict::Unchanged => "Unchanged",
            Verdict::NoPreviousData => "No previous data",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pretty())
    }
}
