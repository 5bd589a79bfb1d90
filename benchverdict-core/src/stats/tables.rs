//! Critical-value tables for the F and Student's t distributions.
//!
//! Values off the tabulated grid are approximated by linear interpolation
//! between the two bracketing entries.

use std::ops::RangeInclusive;

use super::{CriticalValues, StatsError};

/// Significance levels of the F-table columns, strict to loose.
pub const F_TABLE_ALPHA: [f64; 4] = [0.01, 0.025, 0.05, 0.1];

/// Critical F statistics keyed by degrees of freedom (same freedom for both samples).
pub const F_TABLE: [(f64, [f64; 4]); 15] = [
    (4.0, [15.977, 9.6045, 6.3882, 4.10725]),
    (5.0, [10.967, 7.1464, 5.0503, 3.45298]),
    (6.0, [8.466, 5.8198, 4.2839, 3.05455]),
    (7.0, [6.993, 4.9949, 3.7870, 2.78493]),
    (8.0, [6.029, 4.4333, 3.4381, 2.58935]),
    (9.0, [5.351, 4.0260, 3.1789, 2.44034]),
    (10.0, [4.849, 3.7168, 2.9782, 2.32260]),
    (12.0, [4.155, 3.2773, 2.6866, 2.14744]),
    (15.0, [3.522, 2.8621, 2.4034, 1.97222]),
    (20.0, [2.938, 2.4645, 2.1242, 1.79384]),
    (24.0, [2.659, 2.2693, 1.9838, 1.70185]),
    (30.0, [2.386, 2.074, 1.8409, 1.60648]),
    (40.0, [2.114, 1.8750, 1.6928, 1.50562]),
    (60.0, [1.836, 1.667, 1.5343, 1.39520]),
    (120.0, [1.533, 1.433, 1.3519, 1.26457]),
];

/// Degrees of freedom of the inverse-t table columns.
pub const INV_T_TABLE_FREEDOM: [f64; 6] = [8.0, 18.0, 25.0, 30.0, 60.0, 120.0];

/// Critical t values keyed by one-tailed significance level.
pub const INV_T_TABLE: [(f64, [f64; 6]); 5] = [
    (0.005, [3.355, 2.878, 2.787, 2.750, 2.660, 2.617]),
    (0.01, [2.896, 2.552, 2.485, 2.457, 2.390, 2.358]),
    (0.025, [2.306, 2.101, 2.060, 2.042, 2.000, 1.980]),
    (0.05, [1.860, 1.734, 1.708, 1.697, 1.671, 1.658]),
    (0.1, [1.397, 1.330, 1.316, 1.310, 1.296, 1.289]),
];

/// Tail probability reported when F exceeds the strictest critical value.
pub const MIN_TAIL_PROBABILITY: f64 = 0.001;

/// Tail probability reported when F is below the loosest critical value.
pub const MAX_TAIL_PROBABILITY: f64 = 0.2;

/// Sample sizes whose derived degrees of freedom stay inside both tables.
///
/// The variance-ratio test looks up `n - 1`, the pooled test `2n - 2`, and the
/// Welch approximation always lands in `[n - 1, 2n - 2]`, so `n - 1 >= 8` and
/// `2n - 2 <= 120`.
pub const SUPPORTED_SAMPLE_SIZES: RangeInclusive<usize> = 9..=61;

/// Evaluate at `x` the line passing through `p1` and `p2`.
pub fn linear_regression(p1: (f64, f64), p2: (f64, f64), x: f64) -> f64 {
    let a = (p2.1 - p1.1) / (p2.0 - p1.0);
    let b = p1.1 - a * p1.0;

    a * x + b
}

/// Critical F values for `freedom`, interpolating between bracketing rows.
fn f_row(freedom: f64) -> Result<[f64; 4], StatsError> {
    for pair in F_TABLE.windows(2) {
        let (down_freedom, down) = pair[0];
        let (up_freedom, up) = pair[1];

        if freedom == down_freedom {
            return Ok(down);
        }
        if freedom == up_freedom {
            return Ok(up);
        }
        if down_freedom < freedom && freedom < up_freedom {
            let mut row = [0.0; 4];
            for (i, value) in row.iter_mut().enumerate() {
                *value = linear_regression((down_freedom, down[i]), (up_freedom, up[i]), freedom);
            }
            return Ok(row);
        }
    }

    Err(StatsError::FreedomOutOfRange {
        freedom,
        low: F_TABLE[0].0,
        high: F_TABLE[F_TABLE.len() - 1].0,
    })
}

/// Approximate upper-tail probability of an F statistic.
///
/// Returns [`MIN_TAIL_PROBABILITY`] above the α=0.01 critical value and
/// [`MAX_TAIL_PROBABILITY`] below the α=0.1 one. A statistic equal to a
/// tabulated value yields that column's α exactly.
pub fn f_tail(f: f64, freedom: f64) -> Result<f64, StatsError> {
    let row = f_row(freedom)?;

    if f > row[0] {
        return Ok(MIN_TAIL_PROBABILITY);
    } else if f < row[row.len() - 1] {
        return Ok(MAX_TAIL_PROBABILITY);
    }

    for i in 0..row.len() - 1 {
        let (down, up) = (i, i + 1);
        if f == row[down] {
            return Ok(F_TABLE_ALPHA[down]);
        }
        if f == row[up] {
            return Ok(F_TABLE_ALPHA[up]);
        }
        if row[down] >= f && f >= row[up] {
            return Ok(linear_regression(
                (row[down], F_TABLE_ALPHA[down]),
                (row[up], F_TABLE_ALPHA[up]),
                f,
            ));
        }
    }

    Err(StatsError::NoBracket(f))
}

/// Critical t value at one-tailed level `alpha` for `freedom` degrees of freedom.
pub fn inverse_t(alpha: f64, freedom: f64) -> Result<f64, StatsError> {
    let (_, table) = INV_T_TABLE
        .iter()
        .find(|(a, _)| *a == alpha)
        .ok_or(StatsError::UnsupportedAlpha(alpha))?;

    for i in 0..INV_T_TABLE_FREEDOM.len() - 1 {
        let (down, up) = (i, i + 1);
        if freedom == INV_T_TABLE_FREEDOM[down] {
            return Ok(table[down]);
        }
        if freedom == INV_T_TABLE_FREEDOM[up] {
            return Ok(table[up]);
        }
        if INV_T_TABLE_FREEDOM[down] <= freedom && freedom <= INV_T_TABLE_FREEDOM[up] {
            return Ok(linear_regression(
                (INV_T_TABLE_FREEDOM[down], table[down]),
                (INV_T_TABLE_FREEDOM[up], table[up]),
                freedom,
            ));
        }
    }

    Err(StatsError::FreedomOutOfRange {
        freedom,
        low: INV_T_TABLE_FREEDOM[0],
        high: INV_T_TABLE_FREEDOM[INV_T_TABLE_FREEDOM.len() - 1],
    })
}

/// Whether `alpha` has a column in the inverse-t table.
pub fn is_tabulated_alpha(alpha: f64) -> bool {
    INV_T_TABLE.iter().any(|(a, _)| *a == alpha)
}

/// Critical values read from the static tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableCriticalValues;

impl CriticalValues for TableCriticalValues {
    fn f_tail(&self, f: f64, freedom: f64) -> Result<f64, StatsError> {
        f_tail(f, freedom)
    }

    fn inverse_t(&self, alpha: f64, freedom: f64) -> Result<f64, StatsError> {
        inverse_t(alpha, freedom)
    }
}
