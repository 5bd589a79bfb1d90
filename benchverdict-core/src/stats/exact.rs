use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use super::tables::{F_TABLE_ALPHA, MAX_TAIL_PROBABILITY, MIN_TAIL_PROBABILITY};
use super::{CriticalValues, StatsError};

/// Critical values computed from the F and Student's t distributions.
///
/// The F tail is clamped the same way the table lookup is, so the
/// branch selection of the significance engine keeps its shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactCriticalValues;

impl CriticalValues for ExactCriticalValues {
    fn f_tail(&self, f: f64, freedom: f64) -> Result<f64, StatsError> {
        let dist = FisherSnedecor::new(freedom, freedom)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;

        if f.is_nan() {
            return Err(StatsError::NoBracket(f));
        }
        let tail = if f.is_infinite() { 0.0 } else { 1.0 - dist.cdf(f) };

        if tail < F_TABLE_ALPHA[0] {
            Ok(MIN_TAIL_PROBABILITY)
        } else if tail > F_TABLE_ALPHA[F_TABLE_ALPHA.len() - 1] {
            Ok(MAX_TAIL_PROBABILITY)
        } else {
            Ok(tail)
        }
    }

    fn inverse_t(&self, alpha: f64, freedom: f64) -> Result<f64, StatsError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(StatsError::UnsupportedAlpha(alpha));
        }
        let dist = StudentsT::new(0.0, 1.0, freedom)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;

        Ok(dist.inverse_cdf(1.0 - alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::tables;

    #[test]
    fn test_inverse_t_close_to_table() {
        let exact = ExactCriticalValues;
        for (freedom, expected) in [(8.0, 2.306), (30.0, 2.042), (120.0, 1.980)] {
            let value = exact.inverse_t(0.025, freedom).unwrap();
            assert!(
                (value - expected).abs() < 0.01,
                "freedom {freedom}: {value} vs {expected}"
            );
        }
    }

    #[test]
    fn test_f_tail_clamped_like_table() {
        let exact = ExactCriticalValues;
        assert_eq!(exact.f_tail(100.0, 10.0).unwrap(), MIN_TAIL_PROBABILITY);
        assert_eq!(exact.f_tail(1.0, 10.0).unwrap(), MAX_TAIL_PROBABILITY);
        assert_eq!(exact.f_tail(f64::INFINITY, 10.0).unwrap(), MIN_TAIL_PROBABILITY);
    }

    #[test]
    fn test_f_tail_close_to_table() {
        let exact = ExactCriticalValues;
        let tail = exact.f_tail(2.9782, 10.0).unwrap();
        assert!((tail - tables::f_tail(2.9782, 10.0).unwrap()).abs() < 0.005);
    }

    #[test]
    fn test_invalid_parameters() {
        let exact = ExactCriticalValues;
        assert!(matches!(
            exact.inverse_t(0.05, -1.0),
            Err(StatsError::Distribution(_))
        ));
        assert!(matches!(
            exact.inverse_t(1.5, 10.0),
            Err(StatsError::UnsupportedAlpha(_))
        ));
        assert!(matches!(
            exact.f_tail(f64::NAN, 10.0),
            Err(StatsError::NoBracket(_))
        ));
    }
}
