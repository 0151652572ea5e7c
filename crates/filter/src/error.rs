//! Error types for the tempo-filter crate.

use tempo_series::SeriesError;

/// Error type for all fallible operations in the tempo-filter crate.
///
/// Design problems (bad cutoffs, unstable poles) are reported before any
/// sample is filtered; a filter is either fully applied or not at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Degenerate input series.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Returned when a Nyquist-normalised cutoff falls outside (0, 1), or a
    /// band-pass low edge is not below its high edge.
    #[error("invalid cutoff: {reason} (normalised {normalized:?})")]
    InvalidCutoff {
        /// Normalised cutoff(s) that were rejected.
        normalized: Vec<f64>,
        /// Which constraint failed.
        reason: &'static str,
    },

    /// Returned when a notch bandwidth is not a positive finite frequency.
    #[error("notch bandwidth must be positive, got {bandwidth_hz} Hz")]
    InvalidBandwidth {
        /// Bandwidth that was requested.
        bandwidth_hz: f64,
    },

    /// Returned when a Butterworth order of zero is requested.
    #[error("filter order must be at least 1, got {order}")]
    InvalidOrder {
        /// Order that was requested.
        order: usize,
    },

    /// Returned when a denominator root lies on or outside the unit circle.
    #[error("filter will not be stable: largest pole magnitude is {max_pole_magnitude}")]
    UnstableFilter {
        /// Largest root magnitude of the denominator polynomial.
        max_pole_magnitude: f64,
    },

    /// Returned when coefficients contain NaN or infinity.
    #[error("filter coefficients contain non-finite values")]
    NonFiniteCoefficients,

    /// Returned when `b` and `a` are empty, of unequal length, or `a[0] == 0`.
    #[error("malformed coefficients: len(b) = {b}, len(a) = {a}")]
    MalformedCoefficients {
        /// Numerator length.
        b: usize,
        /// Denominator length.
        a: usize,
    },
}
