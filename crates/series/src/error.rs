//! Error types for the tempo-series crate.

/// Error type for all fallible operations in the tempo-series crate.
///
/// Every variant describes a degenerate or malformed series: too few
/// samples, a time axis that does not move forward, or shapes that do not
/// agree with each other.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when the series is shorter than the minimum required length.
    #[error("series too short: got {len} samples, need at least {min}")]
    TooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when the time span from first to last sample is not positive.
    #[error("time span must be positive, got {span}")]
    NonPositiveSpan {
        /// `t[n-1] - t[0]`.
        span: f64,
    },

    /// Returned when a timestamp does not strictly exceed its predecessor.
    #[error("timestamps must be strictly increasing (violated at index {index})")]
    NonMonotonicTime {
        /// Index of the first offending timestamp.
        index: usize,
    },

    /// Returned when the time span and samples disagree in length.
    #[error("length mismatch: {samples} samples but {times} timestamps")]
    LengthMismatch {
        /// Number of sample rows.
        samples: usize,
        /// Number of timestamps.
        times: usize,
    },

    /// Returned when the number of channel names differs from the channel count.
    #[error("got {names} channel names for {channels} channels")]
    ChannelNamesMismatch {
        /// Number of names supplied.
        names: usize,
        /// Number of sample columns.
        channels: usize,
    },

    /// Returned when the sample matrix has zero columns.
    #[error("series has no channels")]
    NoChannels,

    /// Returned when samples or timestamps contain NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_too_short() {
        let err = SeriesError::TooShort { len: 1, min: 2 };
        assert_eq!(
            err.to_string(),
            "series too short: got 1 samples, need at least 2"
        );
    }

    #[test]
    fn error_non_positive_span() {
        let err = SeriesError::NonPositiveSpan { span: -0.5 };
        assert_eq!(err.to_string(), "time span must be positive, got -0.5");
    }

    #[test]
    fn error_non_monotonic() {
        let err = SeriesError::NonMonotonicTime { index: 4 };
        assert_eq!(
            err.to_string(),
            "timestamps must be strictly increasing (violated at index 4)"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let err = SeriesError::LengthMismatch {
            samples: 10,
            times: 9,
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: 10 samples but 9 timestamps"
        );
    }

    #[test]
    fn error_channel_names() {
        let err = SeriesError::ChannelNamesMismatch {
            names: 1,
            channels: 3,
        };
        assert_eq!(err.to_string(), "got 1 channel names for 3 channels");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SeriesError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SeriesError>();
    }
}
