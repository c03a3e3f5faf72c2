use crate::{
    dispersion,
    error::{StatsError, StatsResult, ensure_non_empty},
};

/// Bin count used when the caller does not choose one.
pub const DEFAULT_BIN_COUNT: usize = 16;

/// How bin heights are expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistogramMode {
    /// Heights are densities; the total area `Σ density × width` is 1.
    #[default]
    Normalized,
    /// Heights are plain counts.
    Raw,
}

/// An equal-width histogram of a dataset.
///
/// Bins span `[min, max]` of the data. Every bin is half-open
/// (`lower <= v < upper`) except the last one, which is closed so that the
/// maximum is counted.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Histogram {
    pub mode: HistogramMode,
    /// Width shared by all bins.
    pub bin_width: f64,
    pub bins: Vec<HistogramBin>,
}

/// A single histogram bin.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    /// Number of values that fall within this bin.
    pub count: usize,
    /// Bin height: a density or the count, depending on [`HistogramMode`].
    pub density: f64,
}

impl Histogram {
    /// Creates a histogram with `bin_count` equal-width bins.
    ///
    /// When all values are equal, the histogram has a single bin
    /// `[value, value + 1]` of width 1 holding every value. Where
    /// `value + 1` rounds back to `value`, the bin is widened to the next
    /// representable step so that `upper > lower` still holds.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` - if `bin_count` is zero
    /// * `EmptyInput` - if `values` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use tabstat_stats::histogram::{Histogram, HistogramMode};
    ///
    /// let values = [1.0, 2.0, 2.0, 3.0, 4.0];
    /// let histogram = Histogram::new(&values, 3, HistogramMode::Raw).unwrap();
    ///
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(counts, vec![1, 2, 2]);
    /// assert_eq!(histogram.bins[2].upper, 4.0);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn new(values: &[f64], bin_count: usize, mode: HistogramMode) -> StatsResult<Self> {
        if bin_count == 0 {
            return Err(StatsError::invalid_argument("bin count must be positive"));
        }
        ensure_non_empty(values, "series")?;

        let min = dispersion::min(values)?;
        let max = dispersion::max(values)?;

        let (bin_count, bin_width) = if max > min {
            (bin_count, (max - min) / bin_count as f64)
        } else {
            (1, degenerate_bin_width(min))
        };

        let mut bins = (0..bin_count)
            .map(|i| HistogramBin {
                // recompute edges per bin instead of accumulating widths
                lower: min + i as f64 * bin_width,
                upper: if i + 1 == bin_count && max > min {
                    max
                } else {
                    min + (i + 1) as f64 * bin_width
                },
                count: 0,
                density: 0.0,
            })
            .collect::<Vec<_>>();

        for &value in values {
            let position = (value - min) / bin_width;
            // saturating cast; the maximum lands in the last bin
            let idx = (position.floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        let total = values.len() as f64;
        for bin in &mut bins {
            bin.density = match mode {
                HistogramMode::Normalized => bin.count as f64 / (total * bin_width),
                HistogramMode::Raw => bin.count as f64,
            };
        }

        Ok(Self {
            mode,
            bin_width,
            bins,
        })
    }

    /// Total area `Σ density × width`; 1 for a normalized histogram.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| bin.density * self.bin_width)
            .sum()
    }

    /// Total number of values counted.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

/// Width of the single bin used when every value equals `value`.
fn degenerate_bin_width(value: f64) -> f64 {
    if value + 1.0 > value {
        return 1.0;
    }
    // |value| >= 2^53: one ulp is at least 1
    (value + value.abs() * f64::EPSILON) - value
}
