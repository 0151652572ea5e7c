//! Effective sampling frequency of a uniformly sampled series.

use crate::error::SeriesError;

/// Derives the sampling frequency from a time span.
///
/// Sampling is assumed uniform: the rate comes from the first and last
/// timestamps and the sample count, `fs = (n - 1) / (t[n-1] - t[0])`.
/// Consecutive deltas are never inspected.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SeriesError::TooShort`] | fewer than 2 timestamps |
/// | [`SeriesError::NonPositiveSpan`] | `t[n-1] - t[0]` is zero, negative or non-finite |
pub fn sample_rate(time_span: &[f64]) -> Result<f64, SeriesError> {
    let n = time_span.len();
    if n < 2 {
        return Err(SeriesError::TooShort { len: n, min: 2 });
    }
    let span = time_span[n - 1] - time_span[0];
    if !span.is_finite() || span <= 0.0 {
        return Err(SeriesError::NonPositiveSpan { span });
    }
    Ok(rate_from_span(n, span))
}

/// `(n - 1) / span`, no validation.
pub(crate) fn rate_from_span(n: usize, span: f64) -> f64 {
    (n as f64 - 1.0) / span
}
