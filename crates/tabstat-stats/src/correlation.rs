//! Pairwise linear association between two equal-length series.

use crate::{
    central,
    error::{StatsError, StatsResult},
};

fn ensure_paired(x: &[f64], y: &[f64]) -> StatsResult<()> {
    if x.len() != y.len() {
        return Err(StatsError::DimensionMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(StatsError::InsufficientData {
            len: x.len(),
            required: 2,
        });
    }
    Ok(())
}

/// Sums of centered cross products: `(Σdx·dy, Σdx², Σdy²)`.
fn centered_sums(x: &[f64], y: &[f64]) -> StatsResult<(f64, f64, f64)> {
    let mean_x = central::mean(x)?;
    let mean_y = central::mean(y)?;
    Ok(x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (a, b)| {
        let dx = a - mean_x;
        let dy = b - mean_y;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    }))
}

/// Population covariance of `x` and `y` (divided by `N`).
///
/// # Examples
///
/// ```
/// use tabstat_stats::correlation::covariance;
///
/// let cov = covariance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
/// assert!((cov - 4.0 / 3.0).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn covariance(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    ensure_paired(x, y)?;
    let (sxy, _, _) = centered_sums(x, y)?;
    Ok(sxy / x.len() as f64)
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// The result is clamped into `[-1, 1]`.
///
/// # Errors
///
/// * `DimensionMismatch` - if the series differ in length
/// * `InsufficientData` - if fewer than two pairs are given
/// * `DegenerateInput` - if either series has zero variance
///
/// # Examples
///
/// ```
/// use tabstat_stats::correlation::correlation;
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(correlation(&x, &x).unwrap(), 1.0);
/// assert_eq!(correlation(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap(), -1.0);
/// assert!(correlation(&x, &[1.0; 4]).is_err());
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> StatsResult<f64> {
    ensure_paired(x, y)?;
    let (sxy, sxx, syy) = centered_sums(x, y)?;
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::DegenerateInput {
            what: "correlation is undefined for a zero-variance series",
        });
    }
    // sxx * syy can leave the f64 range while both sums are finite;
    // equal sums keep X against X or -X exact
    let scale = if sxx == syy {
        sxx
    } else {
        sxx.sqrt() * syy.sqrt()
    };
    Ok((sxy / scale).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_and_negated() {
        let x = [5.1, 4.9, 4.7, 4.6, 5.0, 5.4];
        let neg = x.iter().map(|v| -v).collect::<Vec<_>>();
        assert!((correlation(&x, &x).unwrap() - 1.0).abs() < 1e-12);
        assert!((correlation(&x, &neg).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_magnitudes() {
        let large = [1e100, 2e100, 3e100];
        assert_eq!(correlation(&large, &large).unwrap(), 1.0);

        let x = [1e-100, 2e-100, 3e-100];
        let y = [1e-100, 3e-100, 2e-100];
        let unscaled = correlation(&[1.0, 2.0, 3.0], &[1.0, 3.0, 2.0]).unwrap();
        assert!((unscaled - 0.5).abs() < 1e-12);
        assert!((correlation(&x, &y).unwrap() - unscaled).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // r = 0.8 for this textbook pair
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!((correlation(&x, &y).unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_uncorrelated() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, -1.0, -1.0, 1.0];
        assert!(correlation(&x, &y).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_covariance_of_self_is_variance() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((covariance(&x, &x).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            correlation(&[1.0, 2.0], &[1.0]),
            Err(StatsError::DimensionMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            correlation(&[1.0], &[1.0]),
            Err(StatsError::InsufficientData {
                len: 1,
                required: 2
            })
        );
        assert!(matches!(
            correlation(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
            Err(StatsError::DegenerateInput { .. })
        ));
        assert!(matches!(
            covariance(&[], &[]),
            Err(StatsError::InsufficientData { .. })
        ));
    }
}
