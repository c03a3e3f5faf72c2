//! Measures of spread: extremes, range, variance, and standard deviation.
//!
//! Variance is the population variance (divided by `N`, not `N - 1`).

use crate::{
    central,
    error::{StatsError, StatsResult},
};

/// Smallest value. NaN handling follows [`f64::min`].
pub fn min(values: &[f64]) -> StatsResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::min)
        .ok_or(StatsError::EmptyInput { what: "series" })
}

/// Largest value. NaN handling follows [`f64::max`].
pub fn max(values: &[f64]) -> StatsResult<f64> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(StatsError::EmptyInput { what: "series" })
}

/// `max - min`.
pub fn range(values: &[f64]) -> StatsResult<f64> {
    Ok(max(values)? - min(values)?)
}

/// Population variance, computed in two passes to avoid cancellation.
///
/// # Examples
///
/// ```
/// use tabstat_stats::dispersion::variance;
///
/// assert_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 2.0);
/// assert_eq!(variance(&[42.0]).unwrap(), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn variance(values: &[f64]) -> StatsResult<f64> {
    let mean = central::mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Ok(sum_sq / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> StatsResult<f64> {
    Ok(variance(values)?.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scenario() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(min(&values).unwrap(), 1.0);
        assert_eq!(max(&values).unwrap(), 5.0);
        assert_eq!(range(&values).unwrap(), 4.0);
        assert!((variance(&values).unwrap() - 2.0).abs() < 1e-12);
        assert!((std_dev(&values).unwrap() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_unordered_extremes() {
        let values = [4.3, 7.9, 5.8, 4.4, 6.1];
        assert_eq!(min(&values).unwrap(), 4.3);
        assert_eq!(max(&values).unwrap(), 7.9);
    }

    #[test]
    fn test_constant_series_has_zero_spread() {
        let values = [3.5; 8];
        assert_eq!(variance(&values).unwrap(), 0.0);
        assert_eq!(std_dev(&values).unwrap(), 0.0);
        assert_eq!(range(&values).unwrap(), 0.0);
    }

    #[test]
    fn test_large_offset_is_stable() {
        // naive sum-of-squares loses everything at this offset
        let values = [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0];
        assert!((variance(&values).unwrap() - 22.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_input() {
        let err = Err(StatsError::EmptyInput { what: "series" });
        assert_eq!(min(&[]), err);
        assert_eq!(max(&[]), err);
        assert_eq!(range(&[]), err);
        assert_eq!(variance(&[]), err);
        assert_eq!(std_dev(&[]), err);
    }
}
