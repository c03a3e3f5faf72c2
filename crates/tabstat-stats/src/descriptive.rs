use crate::{
    central::{self, FrequencyTable, Mode},
    dispersion,
    error::{StatsError, StatsResult},
    quantile::FiveNumberSummary,
    series,
};

/// Descriptive statistics summarizing one column.
///
/// Contains the measures of central tendency, dispersion, and quartiles that
/// are reported for every numeric column of a dataset.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// Number of values.
    pub count: usize,
    /// The arithmetic mean.
    pub mean: f64,
    /// The most frequent value (smallest on ties) and its count.
    pub mode: Mode,
    pub min: f64,
    /// The 0.25 quantile.
    pub q1: f64,
    pub median: f64,
    /// The 0.75 quantile.
    pub q3: f64,
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    /// The population variance.
    pub variance: f64,
    /// The population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// The values are copied and sorted before computing the statistics.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use tabstat_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(&values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, 2.0);
    /// ```
    pub fn new(values: &[f64]) -> StatsResult<Self> {
        Self::from_sorted(&series::sorted_copy(values))
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This skips the sorting step; use it when the data is already sorted.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    pub fn from_sorted(sorted_values: &[f64]) -> StatsResult<Self> {
        let summary = FiveNumberSummary::from_sorted(sorted_values)?;
        let mode = FrequencyTable::from_sorted(sorted_values)
            .mode()
            .ok_or(StatsError::EmptyInput { what: "series" })?;

        let variance = dispersion::variance(sorted_values)?;

        Ok(Self {
            count: sorted_values.len(),
            mean: central::mean(sorted_values)?,
            mode,
            min: summary.min,
            q1: summary.q1,
            median: summary.median,
            q3: summary.q3,
            max: summary.max,
            range: summary.max - summary.min,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    #[must_use]
    pub fn five_number_summary(&self) -> FiveNumberSummary {
        FiveNumberSummary {
            min: self.min,
            q1: self.q1,
            median: self.median,
            q3: self.q3,
            max: self.max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantile;

    const SEPAL_LENGTH: [f64; 12] = [
        5.1, 4.9, 4.7, 4.6, 5.0, 5.4, 4.6, 5.0, 4.4, 4.9, 5.4, 4.8,
    ];

    #[test]
    fn test_matches_component_functions() {
        let stats = DescriptiveStats::new(&SEPAL_LENGTH).unwrap();
        assert_eq!(stats.count, 12);
        assert!((stats.mean - central::mean(&SEPAL_LENGTH).unwrap()).abs() < 1e-12);
        assert_eq!(stats.median, central::median(&SEPAL_LENGTH).unwrap());
        assert_eq!(stats.mode, central::mode(&SEPAL_LENGTH).unwrap());
        assert_eq!(stats.min, dispersion::min(&SEPAL_LENGTH).unwrap());
        assert_eq!(stats.max, dispersion::max(&SEPAL_LENGTH).unwrap());
        assert!((stats.variance - dispersion::variance(&SEPAL_LENGTH).unwrap()).abs() < 1e-12);
        assert!((stats.std_dev - dispersion::std_dev(&SEPAL_LENGTH).unwrap()).abs() < 1e-12);
        assert_eq!(stats.q1, quantile::quantile(0.25, &SEPAL_LENGTH).unwrap());
        assert_eq!(stats.q3, quantile::quantile(0.75, &SEPAL_LENGTH).unwrap());
    }

    #[test]
    fn test_mode_tie_in_summary() {
        // 4.6, 4.9, 5.0 and 5.4 each appear twice
        let stats = DescriptiveStats::new(&SEPAL_LENGTH).unwrap();
        assert_eq!(stats.mode, Mode { value: 4.6, count: 2 });
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStats::new(&[7.0]).unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.range, 0.0);
        assert_eq!(stats.five_number_summary().q3, 7.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            DescriptiveStats::new(&[]),
            Err(StatsError::EmptyInput { what: "series" })
        );
    }
}
