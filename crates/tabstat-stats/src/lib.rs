//! Statistical computations over numeric table columns.
//!
//! This crate turns a flat numeric sequence (one column of a dataset) into
//! summary statistics and the binned views that charts are drawn from:
//!
//! - **Central tendency**: mean, mode (smallest value wins ties), median
//! - **Dispersion**: min, max, range, population variance, standard deviation
//! - **Quantiles**: linear-interpolation quantiles and five-number summaries
//! - **Boxplots**: quartile box with Tukey whiskers and outliers
//! - **Histograms**: equal-width bins with raw or normalized heights
//! - **Correlation**: Pearson correlation and covariance of paired series
//! - **Chi-square**: goodness-of-fit statistic and upper-tail p-value
//! - **Matrices**: transpose, determinant, and inverse of small dense matrices
//!
//! Every routine is a pure function of its input and reports invalid input
//! through [`error::StatsError`].
//!
//! # Modules
//!
//! - [`series`]: The [`NumericSeries`](series::NumericSeries) column type
//! - [`central`]: Mean, mode, median, and frequency tables
//! - [`dispersion`]: Extremes, range, variance, and standard deviation
//! - [`quantile`]: Quantile computation and five-number summaries
//! - [`boxplot`]: Boxplot whiskers and outliers
//! - [`histogram`]: Equal-width histograms
//! - [`correlation`]: Pearson correlation and covariance
//! - [`chi_square`]: Chi-square goodness-of-fit test
//! - [`descriptive`]: Combined per-column summary
//! - [`matrix`]: Dense matrix primitives
//!
//! # Examples
//!
//! ## Summarizing a column
//!
//! ```
//! use tabstat_stats::{central, dispersion, quantile};
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(central::mean(&values).unwrap(), 3.0);
//! assert_eq!(dispersion::variance(&values).unwrap(), 2.0);
//! assert_eq!(quantile::quantile(0.75, &values).unwrap(), 4.0);
//! ```
//!
//! ## Building a histogram
//!
//! ```
//! use tabstat_stats::histogram::{DEFAULT_BIN_COUNT, Histogram, HistogramMode};
//!
//! let values = [4.3, 5.0, 5.1, 5.8, 6.3, 7.9];
//! let histogram = Histogram::new(&values, DEFAULT_BIN_COUNT, HistogramMode::Normalized).unwrap();
//! assert!((histogram.area() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Testing categorical counts
//!
//! ```
//! use tabstat_stats::chi_square;
//!
//! let result = chi_square::goodness_of_fit(&[260.0, 135.0, 105.0], &[300.0, 125.0, 75.0]).unwrap();
//! assert!(result.p_value < 0.001);
//! ```

pub mod boxplot;
pub mod central;
pub mod chi_square;
pub mod correlation;
pub mod descriptive;
pub mod dispersion;
pub mod error;
pub mod histogram;
pub mod matrix;
pub mod quantile;
pub mod series;

pub use self::{
    error::{StatsError, StatsResult},
    series::NumericSeries,
};
