//! Error types for the tempo-wavelet crate.

/// Error type for all fallible operations in the tempo-wavelet crate.
///
/// Every variant is a configuration problem detected before any transform
/// work starts; a validated series never fails mid-transform.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveletError {
    /// Returned when the frequency list is empty.
    #[error("frequency list is empty")]
    EmptyFrequencies,

    /// Returned when a frequency is non-positive or non-finite.
    #[error("invalid frequency at index {index}: {value} Hz")]
    InvalidFrequency {
        /// Position in the frequency list.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Returned when the Morlet centre frequency is non-positive or non-finite.
    #[error("Morlet omega0 must be positive and finite, got {omega0}")]
    InvalidOmega0 {
        /// Offending value.
        omega0: f64,
    },
}
