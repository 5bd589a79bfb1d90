use super::tables::is_tabulated_alpha;
use super::{
    CriticalValueSource, CriticalValues, SignificanceTest, StatsError, TimingComparison,
    TimingSample,
};

/// Significance levels for which both `a` and `a / 2` have tabulated critical values.
pub const SUPPORTED_SIGNIFICANCE_LEVELS: [f64; 2] = [0.05, 0.01];

/// Variance-ratio tail probability at or above which the variances are
/// treated as equal and the pooled t-test is used.
const EQUAL_VARIANCE_THRESHOLD: f64 = 0.2;

/// Two-sample t-test that picks its variant from an F pre-test.
///
/// The ratio of the two sample variances is looked up in the F-table. When
/// the variances are indistinguishable the pooled (Student) t-test is used,
/// otherwise Welch's t-test with Welch-Satterthwaite degrees of freedom.
#[derive(Debug, Clone)]
pub struct VarianceRatioTTest {
    /// Significance level of the t-test (default: 0.05).
    pub significance_level: f64,
    /// Where critical values come from.
    pub critical_values: CriticalValueSource,
}

impl Default for VarianceRatioTTest {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            critical_values: CriticalValueSource::Table,
        }
    }
}

impl VarianceRatioTTest {
    /// Create a test at the given significance level.
    ///
    /// # Errors
    /// Returns [`StatsError::UnsupportedAlpha`] unless the level is one of
    /// [`SUPPORTED_SIGNIFICANCE_LEVELS`].
    pub fn new(
        significance_level: f64,
        critical_values: CriticalValueSource,
    ) -> Result<Self, StatsError> {
        let supported = SUPPORTED_SIGNIFICANCE_LEVELS.contains(&significance_level)
            && is_tabulated_alpha(significance_level)
            && is_tabulated_alpha(significance_level / 2.0);
        if !supported {
            return Err(StatsError::UnsupportedAlpha(significance_level));
        }

        Ok(Self {
            significance_level,
            critical_values,
        })
    }

    /// Pooled t statistic and its critical value at `2n - 2` degrees of freedom.
    fn pooled(
        &self,
        new: &TimingSample,
        old: &TimingSample,
        n: f64,
    ) -> Result<(f64, f64), StatsError> {
        let sp = (((n - 1.0) * old.variance + (n - 1.0) * new.variance) / (2.0 * n - 2.0)).sqrt();
        let t = (old.average - new.average) / (sp * (2.0 / n).sqrt());
        let t_value = self
            .critical_values
            .inverse_t(self.significance_level, n * 2.0 - 2.0)?;
        Ok((t, t_value))
    }

    /// Welch t statistic and its two-tailed critical value.
    fn welch(
        &self,
        new: &TimingSample,
        old: &TimingSample,
        n: f64,
    ) -> Result<(f64, f64), StatsError> {
        let s_old = old.variance / n;
        let s_new = new.variance / n;

        // Welch-Satterthwaite; always within [n - 1, 2n - 2] up to rounding
        let v = (s_old + s_new).powi(2) / (s_old.powi(2) / (n - 1.0) + s_new.powi(2) / (n - 1.0));
        let v = v.clamp(n - 1.0, 2.0 * n - 2.0);

        let t = (old.average - new.average) / (s_old + s_new).sqrt();
        let t_value = self
            .critical_values
            .inverse_t(self.significance_level / 2.0, v)?;
        Ok((t, t_value))
    }
}

impl SignificanceTest for VarianceRatioTTest {
    fn compare(
        &self,
        new: &TimingSample,
        old: &TimingSample,
        n: usize,
    ) -> Result<TimingComparison, StatsError> {
        if n < 2 {
            return Err(StatsError::InsufficientSample(n));
        }

        let signed_delta = new.average - old.average;

        // The variance ratio is undefined; any difference in means counts
        if new.variance == 0.0 {
            return Ok(TimingComparison {
                signed_delta,
                negligible: signed_delta == 0.0,
            });
        }

        let n = n as f64;
        let f = old.variance / new.variance;
        let ap = if f >= 1.0 {
            2.0 * self.critical_values.f_tail(f, n - 1.0)?
        } else {
            2.0 * self.critical_values.f_tail(1.0 / f, n - 1.0)?
        };

        let (t, t_value) = if ap >= EQUAL_VARIANCE_THRESHOLD {
            self.pooled(new, old, n)?
        } else {
            self.welch(new, old, n)?
        };

        let reject = t >= t_value || t <= -t_value;

        Ok(TimingComparison {
            signed_delta,
            negligible: !reject,
        })
    }
}
