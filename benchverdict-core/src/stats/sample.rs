use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::StatsError;

/// Mean and spread of one benchmark's per-run timings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    pub average: f64,
    #[serde(rename = "stdev")]
    pub standard_deviation: f64,
    pub variance: f64,
}

impl TimingSample {
    /// Aggregate raw observations in seconds.
    ///
    /// Uses Bessel's correction (n-1 denominator); the variance is the
    /// square of the resulting standard deviation.
    pub fn from_secs(observations: &[f64]) -> Result<Self, StatsError> {
        let n = observations.len();
        if n < 2 {
            return Err(StatsError::InsufficientSample(n));
        }

        let average = observations.iter().sum::<f64>() / n as f64;
        let sum_sq_diff: f64 = observations
            .iter()
            .map(|x| {
                let diff = x - average;
                diff * diff
            })
            .sum();
        let standard_deviation = (sum_sq_diff / (n - 1) as f64).sqrt();

        Ok(Self {
            average,
            standard_deviation,
            variance: standard_deviation.powi(2),
        })
    }

    /// Aggregate wall-clock durations.
    pub fn from_durations(durations: &[Duration]) -> Result<Self, StatsError> {
        let secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        Self::from_secs(&secs)
    }

    /// Build a sample from known moments, deriving the variance.
    pub fn from_mean_and_stdev(average: f64, standard_deviation: f64) -> Self {
        Self {
            average,
            standard_deviation,
            variance: standard_deviation.powi(2),
        }
    }
}
