/// Errors returned by the statistical routines in this crate.
///
/// Every routine validates its input up front and reports the first violated
/// precondition; no routine retries or recovers silently.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// A statistic was requested over a zero-length sequence.
    #[display("empty input: {what} cannot be empty")]
    EmptyInput { what: &'static str },

    /// An argument is outside its allowed domain.
    #[display("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Two inputs that must have equal length do not.
    #[display("dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// Fewer data points than the computation requires.
    #[display("insufficient data: got {len}, need at least {required}")]
    InsufficientData { len: usize, required: usize },

    /// The input makes the statistic undefined (e.g. zero variance).
    #[display("degenerate input: {what}")]
    DegenerateInput { what: &'static str },

    /// A square matrix was required.
    #[display("matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// The matrix has no inverse.
    #[display("matrix is singular or near-singular")]
    SingularMatrix,
}

impl StatsError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type for statistical operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Returns `EmptyInput` when `values` is empty.
pub(crate) fn ensure_non_empty<T>(values: &[T], what: &'static str) -> StatsResult<()> {
    if values.is_empty() {
        return Err(StatsError::EmptyInput { what });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            StatsError::EmptyInput { what: "series" }.to_string(),
            "empty input: series cannot be empty"
        );
        assert_eq!(
            StatsError::NotSquare { rows: 2, cols: 3 }.to_string(),
            "matrix is not square: 2x3"
        );
        assert_eq!(
            StatsError::invalid_argument("bin count must be positive").to_string(),
            "invalid argument: bin count must be positive"
        );
    }

    #[test]
    fn test_ensure_non_empty() {
        assert!(ensure_non_empty(&[1.0], "series").is_ok());
        assert_eq!(
            ensure_non_empty::<f64>(&[], "series"),
            Err(StatsError::EmptyInput { what: "series" })
        );
    }
}
