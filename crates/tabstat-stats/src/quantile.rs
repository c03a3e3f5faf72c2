use crate::{
    error::{StatsError, StatsResult, ensure_non_empty},
    series,
};

/// Computes a single quantile of unsorted data.
///
/// The data is copied and sorted before delegating to [`quantile_sorted`].
///
/// # Errors
///
/// * `InvalidArgument` - if `p` is not within `[0, 1]`
/// * `EmptyInput` - if `values` is empty
///
/// # Examples
///
/// ```
/// use tabstat_stats::quantile::quantile;
///
/// let values = [5.0, 1.0, 4.0, 2.0, 3.0];
/// assert_eq!(quantile(0.25, &values).unwrap(), 2.0);
/// assert_eq!(quantile(0.75, &values).unwrap(), 4.0);
/// assert!(quantile(1.5, &values).is_err());
/// ```
pub fn quantile(p: f64, values: &[f64]) -> StatsResult<f64> {
    ensure_probability(p)?;
    ensure_non_empty(values, "series")?;
    Ok(interpolate(&series::sorted_copy(values), p))
}

/// Computes a single quantile from sorted data.
///
/// This uses linear interpolation between the closest ranks. For `n` values
/// the fractional rank is `r = p * (n - 1)`, and the result lies between the
/// values at `floor(r)` and `ceil(r)`, weighted by the fractional part of `r`.
/// `p = 0` yields exactly the minimum and `p = 1` exactly the maximum.
///
/// # Panics
///
/// Panics in debug mode if `sorted_values` is not sorted in ascending order.
///
/// # Examples
///
/// ```
/// use tabstat_stats::quantile::quantile_sorted;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(0.5, &values).unwrap(), 2.5);
/// assert_eq!(quantile_sorted(0.25, &values).unwrap(), 1.75);
/// ```
pub fn quantile_sorted(p: f64, sorted_values: &[f64]) -> StatsResult<f64> {
    debug_assert!(
        sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
        "values must be sorted in ascending order"
    );
    ensure_probability(p)?;
    ensure_non_empty(sorted_values, "series")?;
    Ok(interpolate(sorted_values, p))
}

fn ensure_probability(p: f64) -> StatsResult<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::invalid_argument(format!(
            "quantile probability {p} is outside [0, 1]"
        )));
    }
    Ok(())
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn interpolate(sorted_values: &[f64], p: f64) -> f64 {
    let rank = p * (sorted_values.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (rank.ceil() as usize).min(sorted_values.len() - 1);
    let frac = rank - rank.floor();

    let lower = sorted_values[lo];
    let upper = sorted_values[hi];
    if frac == 0.0 || lower == upper {
        return lower;
    }
    // equivalent to lower * (1 - frac) + upper * frac, kept within [lower, upper]
    (lower + (upper - lower) * frac).max(lower).min(upper)
}

/// Precomputed quantile values for a dataset.
///
/// Stores `(p, value)` pairs for quick lookup of commonly reported points.
///
/// # Examples
///
/// ```
/// use tabstat_stats::quantile::Quantiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let quantiles = Quantiles::new(&values, &[0.25, 0.5, 0.75]).unwrap();
///
/// assert_eq!(quantiles.get(0.5), Some(3.0));
/// assert_eq!(quantiles.get(0.9), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct Quantiles {
    /// Probability-value pairs in the order they were requested.
    values: Vec<(f64, f64)>,
}

impl Quantiles {
    pub fn new(values: &[f64], points: &[f64]) -> StatsResult<Self> {
        Self::from_sorted(&series::sorted_copy(values), points)
    }

    pub fn from_sorted(sorted_values: &[f64], points: &[f64]) -> StatsResult<Self> {
        let values = points
            .iter()
            .map(|&p| quantile_sorted(p, sorted_values).map(|value| (p, value)))
            .collect::<StatsResult<_>>()?;
        Ok(Self { values })
    }

    /// Value at `p`, or `None` if `p` was not precomputed.
    #[must_use]
    pub fn get(&self, p: f64) -> Option<f64> {
        self.values
            .iter()
            .find(|(q, _)| (q - p).abs() < f64::EPSILON)
            .map(|&(_, value)| value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Minimum, quartiles, and maximum of a dataset.
///
/// This is the input a boxplot renderer needs; see [`crate::boxplot`] for
/// whiskers and outliers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::quantile::FiveNumberSummary;
    ///
    /// let summary = FiveNumberSummary::new(&[5.0, 3.0, 1.0, 4.0, 2.0]).unwrap();
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.q1, 2.0);
    /// assert_eq!(summary.median, 3.0);
    /// assert_eq!(summary.q3, 4.0);
    /// assert_eq!(summary.max, 5.0);
    /// ```
    pub fn new(values: &[f64]) -> StatsResult<Self> {
        Self::from_sorted(&series::sorted_copy(values))
    }

    pub fn from_sorted(sorted_values: &[f64]) -> StatsResult<Self> {
        Ok(Self {
            min: quantile_sorted(0.0, sorted_values)?,
            q1: quantile_sorted(0.25, sorted_values)?,
            median: quantile_sorted(0.5, sorted_values)?,
            q3: quantile_sorted(0.75, sorted_values)?,
            max: quantile_sorted(1.0, sorted_values)?,
        })
    }

    /// Interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_endpoints() {
        let values = [0.1, 0.7, 0.3, 0.9, 0.2];
        assert_eq!(quantile(0.0, &values).unwrap(), 0.1);
        assert_eq!(quantile(1.0, &values).unwrap(), 0.9);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // rank 0.75 between 10 and 20
        assert!((quantile(0.25, &values).unwrap() - 17.5).abs() < 1e-12);
        assert!((quantile(0.5, &values).unwrap() - 25.0).abs() < 1e-12);
        assert!((quantile(0.75, &values).unwrap() - 32.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        for p in [0.0, 0.3, 1.0] {
            assert_eq!(quantile(p, &[7.0]).unwrap(), 7.0);
        }
    }

    #[test]
    fn test_infinite_endpoints_stay_exact() {
        let values = [f64::NEG_INFINITY, 0.0, f64::INFINITY];
        assert_eq!(quantile(0.0, &values).unwrap(), f64::NEG_INFINITY);
        assert_eq!(quantile(0.5, &values).unwrap(), 0.0);
        assert_eq!(quantile(1.0, &values).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_invalid_probability() {
        for p in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                quantile(p, &[1.0, 2.0]),
                Err(StatsError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            quantile(0.5, &[]),
            Err(StatsError::EmptyInput { what: "series" })
        );
        assert!(FiveNumberSummary::new(&[]).is_err());
    }

    #[test]
    fn test_quantiles_lookup() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let quantiles = Quantiles::new(&values, &[0.25, 0.5, 0.75]).unwrap();
        assert_eq!(quantiles.as_slice(), &[(0.25, 2.0), (0.5, 3.0), (0.75, 4.0)]);
        assert_eq!(quantiles.len(), 3);
        assert!(Quantiles::new(&values, &[]).unwrap().is_empty());
        assert!(Quantiles::new(&values, &[0.5, 2.0]).is_err());
    }

    #[test]
    fn test_five_number_summary_iqr() {
        let summary = FiveNumberSummary::new(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.iqr(), 2.0);
    }
}
