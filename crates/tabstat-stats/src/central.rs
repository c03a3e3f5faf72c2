//! Measures of central tendency: mean, mode, and median.

use crate::{
    error::{StatsError, StatsResult, ensure_non_empty},
    quantile, series,
};

/// The most frequent value of a series and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Mode {
    pub value: f64,
    pub count: usize,
}

/// Distinct values of a series with their occurrence counts.
///
/// Entries are kept in ascending order of value (by [`f64::total_cmp`]).
/// Values comparing equal with `==` share an entry, so `-0.0` and `0.0`
/// are counted together while every NaN forms its own entry.
///
/// # Examples
///
/// ```
/// use tabstat_stats::central::FrequencyTable;
///
/// let table = FrequencyTable::new(&[2.0, 1.0, 2.0, 3.0]);
/// let entries = table.iter().collect::<Vec<_>>();
/// assert_eq!(entries, vec![(1.0, 1), (2.0, 2), (3.0, 1)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<(f64, usize)>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        let sorted = series::sorted_copy(values);
        Self::from_sorted(&sorted)
    }

    /// Builds the table from values already sorted with [`f64::total_cmp`].
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let mut entries: Vec<(f64, usize)> = Vec::new();
        for &value in sorted_values {
            match entries.last_mut() {
                Some((last, count)) if *last == value => *count += 1,
                _ => entries.push((value, 1)),
            }
        }
        Self { entries }
    }

    /// Number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the entry with the highest count, preferring the smallest
    /// value among ties. `None` for an empty table.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        let mut best: Option<Mode> = None;
        for (value, count) in self.iter() {
            // strictly greater keeps the earliest (smallest) value on ties
            if best.is_none_or(|b| count > b.count) {
                best = Some(Mode { value, count });
            }
        }
        best
    }
}

/// Arithmetic mean.
///
/// # Examples
///
/// ```
/// use tabstat_stats::central::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
/// assert!(mean(&[]).is_err());
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> StatsResult<f64> {
    ensure_non_empty(values, "series")?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Most frequent value and its count; ties resolve to the smallest value.
///
/// # Examples
///
/// ```
/// use tabstat_stats::central::mode;
///
/// let m = mode(&[2.0, 2.0, 1.0, 1.0, 3.0]).unwrap();
/// assert_eq!((m.value, m.count), (1.0, 2));
/// ```
pub fn mode(values: &[f64]) -> StatsResult<Mode> {
    FrequencyTable::new(values)
        .mode()
        .ok_or(StatsError::EmptyInput { what: "series" })
}

/// Median, i.e. the 0.5 quantile with linear interpolation.
///
/// # Examples
///
/// ```
/// use tabstat_stats::central::median;
///
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
/// ```
pub fn median(values: &[f64]) -> StatsResult<f64> {
    quantile::quantile(0.5, values)
}
