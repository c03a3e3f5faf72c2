//! Pearson's chi-square goodness-of-fit test for categorical counts.
//!
//! The test compares observed category counts against the counts expected
//! under a null distribution. The statistic is
//!
//! ```text
//! X² = Σ (observed[i] - expected[i])² / expected[i]
//! ```
//!
//! and under the null hypothesis it follows a chi-square distribution with
//! `k - 1` degrees of freedom for `k` categories. The p-value is the upper-tail
//! probability `P(X ≥ X²)`; a small p-value (conventionally below 0.05) means
//! the observed counts are unlikely under the expected distribution.
//!
//! # Examples
//!
//! ```
//! use tabstat_stats::chi_square::{expected_counts, goodness_of_fit};
//!
//! let observed = [260.0, 135.0, 105.0];
//! let expected = expected_counts(500.0, &[0.6, 0.25, 0.15]).unwrap();
//! let result = goodness_of_fit(&observed, &expected).unwrap();
//!
//! assert_eq!(result.degrees_of_freedom, 2);
//! assert!((result.statistic - 18.1333).abs() < 1e-3);
//! assert!(result.rejects_at(0.001));
//! ```

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::{StatsError, StatsResult, ensure_non_empty};

/// Relative tolerance used when comparing totals and proportion sums.
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Outcome of a goodness-of-fit test.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ChiSquareResult {
    pub statistic: f64,
    pub degrees_of_freedom: u32,
    pub p_value: f64,
}

impl ChiSquareResult {
    /// Whether the null distribution is rejected at significance `alpha`.
    #[must_use]
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Computes the chi-square statistic of `observed` against `expected`.
///
/// # Errors
///
/// * `EmptyInput` - if either sequence is empty
/// * `DimensionMismatch` - if the sequences differ in length
/// * `InvalidArgument` - if any expected count is not strictly positive
pub fn chi_square_statistic(observed: &[f64], expected: &[f64]) -> StatsResult<f64> {
    ensure_non_empty(observed, "observed counts")?;
    ensure_non_empty(expected, "expected counts")?;
    if observed.len() != expected.len() {
        return Err(StatsError::DimensionMismatch {
            left: observed.len(),
            right: expected.len(),
        });
    }
    if let Some((i, e)) = expected.iter().enumerate().find(|(_, e)| !(**e > 0.0)) {
        return Err(StatsError::invalid_argument(format!(
            "expected count at index {i} must be positive, got {e}"
        )));
    }

    Ok(observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum())
}

/// Upper-tail probability of `statistic` under a chi-square distribution.
///
/// # Errors
///
/// * `InvalidArgument` - if `degrees_of_freedom` is zero or `statistic` is
///   negative or NaN
///
/// # Examples
///
/// ```
/// use tabstat_stats::chi_square::p_value;
///
/// assert_eq!(p_value(0.0, 3).unwrap(), 1.0);
/// // survival of chi-square(2) is exp(-x / 2)
/// assert!((p_value(2.0, 2).unwrap() - (-1.0f64).exp()).abs() < 1e-12);
/// ```
pub fn p_value(statistic: f64, degrees_of_freedom: u32) -> StatsResult<f64> {
    if degrees_of_freedom == 0 {
        return Err(StatsError::invalid_argument(
            "degrees of freedom must be positive",
        ));
    }
    if !(statistic >= 0.0) {
        return Err(StatsError::invalid_argument(format!(
            "chi-square statistic must be non-negative, got {statistic}"
        )));
    }
    if statistic == 0.0 {
        return Ok(1.0);
    }

    let distribution = ChiSquared::new(f64::from(degrees_of_freedom)).map_err(|_| {
        StatsError::invalid_argument(format!(
            "invalid chi-square degrees of freedom: {degrees_of_freedom}"
        ))
    })?;
    Ok(distribution.sf(statistic))
}

/// Runs the full goodness-of-fit test with `k - 1` degrees of freedom.
///
/// # Errors
///
/// In addition to the errors of [`chi_square_statistic`]:
///
/// * `InsufficientData` - if fewer than two categories are given
/// * `InvalidArgument` - if the observed and expected totals differ
pub fn goodness_of_fit(observed: &[f64], expected: &[f64]) -> StatsResult<ChiSquareResult> {
    let statistic = chi_square_statistic(observed, expected)?;
    if observed.len() < 2 {
        return Err(StatsError::InsufficientData {
            len: observed.len(),
            required: 2,
        });
    }

    let observed_total = observed.iter().sum::<f64>();
    let expected_total = expected.iter().sum::<f64>();
    if !approx_eq(observed_total, expected_total) {
        return Err(StatsError::invalid_argument(format!(
            "observed total {observed_total} does not match expected total {expected_total}"
        )));
    }

    let degrees_of_freedom = u32::try_from(observed.len() - 1).map_err(|_| {
        StatsError::invalid_argument(format!("too many categories: {}", observed.len()))
    })?;
    let p_value = p_value(statistic, degrees_of_freedom)?;

    Ok(ChiSquareResult {
        statistic,
        degrees_of_freedom,
        p_value,
    })
}

/// Scales category `proportions` to expected counts for `total` observations.
///
/// # Errors
///
/// * `EmptyInput` - if `proportions` is empty
/// * `InvalidArgument` - if a proportion is negative or they do not sum to 1
///
/// # Examples
///
/// ```
/// use tabstat_stats::chi_square::expected_counts;
///
/// let expected = expected_counts(500.0, &[0.6, 0.25, 0.15]).unwrap();
/// assert_eq!(expected, vec![300.0, 125.0, 75.0]);
/// ```
pub fn expected_counts(total: f64, proportions: &[f64]) -> StatsResult<Vec<f64>> {
    ensure_non_empty(proportions, "proportions")?;
    if let Some(p) = proportions.iter().find(|p| !(**p >= 0.0)) {
        return Err(StatsError::invalid_argument(format!(
            "proportion must be non-negative, got {p}"
        )));
    }
    let sum = proportions.iter().sum::<f64>();
    if !approx_eq(sum, 1.0) {
        return Err(StatsError::invalid_argument(format!(
            "proportions must sum to 1, got {sum}"
        )));
    }
    Ok(proportions.iter().map(|p| total * p).collect())
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOTAL_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
