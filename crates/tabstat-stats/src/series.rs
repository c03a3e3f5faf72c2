/// An ordered sequence of `f64` values taken from one column of a table.
///
/// The series dereferences to `[f64]`, so every routine in this crate that
/// takes `&[f64]` also accepts `&NumericSeries`. Values are never mutated by
/// the statistical routines; routines that need sorted data sort a copy.
///
/// NaN and infinite values receive no special treatment. They flow through
/// the computations deterministically, but the results are not meaningful.
///
/// # Examples
///
/// ```
/// use tabstat_stats::series::NumericSeries;
///
/// let series: NumericSeries = [3.0, 1.0, 2.0].into_iter().collect();
/// assert_eq!(series.len(), 3);
/// assert_eq!(series.sorted(), vec![1.0, 2.0, 3.0]);
/// assert_eq!(&series[..], &[3.0, 1.0, 2.0]);
/// ```
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Deref,
    derive_more::From,
    derive_more::IntoIterator,
)]
#[serde(transparent)]
pub struct NumericSeries {
    #[into_iterator(owned, ref)]
    values: Vec<f64>,
}

impl NumericSeries {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns an ascending copy of the values, ordered by [`f64::total_cmp`].
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        sorted_copy(&self.values)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl FromIterator<f64> for NumericSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[f64]> for NumericSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Sorts a copy of `values` ascending with a stable total-order sort.
pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deref_to_slice() {
        let series = NumericSeries::from(vec![1.5, 2.5]);
        let slice: &[f64] = &series;
        assert_eq!(slice, &[1.5, 2.5]);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_sorted_leaves_original_untouched() {
        let series = NumericSeries::new(vec![5.0, -1.0, 3.0]);
        assert_eq!(series.sorted(), vec![-1.0, 3.0, 5.0]);
        assert_eq!(series.as_slice(), &[5.0, -1.0, 3.0]);
    }

    #[test]
    fn test_iterate_by_ref() {
        let series = NumericSeries::new(vec![1.0, 2.0, 3.0]);
        let total: f64 = (&series).into_iter().sum();
        assert!((total - 6.0).abs() < f64::EPSILON);
        assert_eq!(series.into_vec().len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let series = NumericSeries::new(vec![1.0, 2.0]);
        assert_eq!(serde_json::to_string(&series).unwrap(), "[1.0,2.0]");
    }
}
