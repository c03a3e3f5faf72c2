//! Boxplot geometry: quartile box, Tukey whiskers, and outliers.

use crate::{error::StatsResult, quantile::FiveNumberSummary, series};

/// Multiple of the interquartile range beyond which values are outliers.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Everything a renderer needs to draw one box.
///
/// Whiskers end at the most extreme data points that still lie within
/// `WHISKER_IQR_FACTOR * IQR` of the box; values beyond them are listed as
/// outliers in ascending order.
///
/// # Examples
///
/// ```
/// use tabstat_stats::boxplot::BoxPlot;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
/// let boxplot = BoxPlot::new(&values).unwrap();
/// assert_eq!(boxplot.upper_whisker, 5.0);
/// assert_eq!(boxplot.outliers, vec![100.0]);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BoxPlot {
    pub summary: FiveNumberSummary,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxPlot {
    pub fn new(values: &[f64]) -> StatsResult<Self> {
        Self::from_sorted(&series::sorted_copy(values))
    }

    pub fn from_sorted(sorted_values: &[f64]) -> StatsResult<Self> {
        let summary = FiveNumberSummary::from_sorted(sorted_values)?;
        let reach = WHISKER_IQR_FACTOR * summary.iqr();
        let low_fence = summary.q1 - reach;
        let high_fence = summary.q3 + reach;

        let inside = || {
            sorted_values
                .iter()
                .copied()
                .filter(|v| (low_fence..=high_fence).contains(v))
        };
        // the quartiles themselves are always inside, unless the data is non-finite
        let lower_whisker = inside().next().unwrap_or(summary.q1);
        let upper_whisker = inside().last().unwrap_or(summary.q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Ok(Self {
            summary,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
