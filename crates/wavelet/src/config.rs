//! Transform configuration.

use crate::error::WaveletError;

/// Default Morlet centre frequency (non-dimensional).
pub const DEFAULT_OMEGA0: f64 = 5.0;

/// Lowest frequency of the default grid, in Hz.
pub const DEFAULT_F_MIN: f64 = 1.0;

/// Highest frequency of the default grid, in Hz.
pub const DEFAULT_F_MAX: f64 = 100.0;

/// Number of frequencies in the default grid.
pub const DEFAULT_N_FREQS: usize = 50;

/// Mother wavelet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wavelet {
    /// Complex Morlet with centre frequency `omega0`, including the
    /// admissibility correction term.
    Morlet {
        /// Non-dimensional centre frequency.
        omega0: f64,
    },
}

impl Default for Wavelet {
    fn default() -> Self {
        Self::Morlet {
            omega0: DEFAULT_OMEGA0,
        }
    }
}

/// Configuration for [`cwt`](crate::cwt).
///
/// Use the builder methods to customize the analysis parameters.
///
/// # Example
///
/// ```
/// use tempo_wavelet::CwtConfig;
///
/// let config = CwtConfig::new()
///     .with_log_freqs(2.0, 40.0, 20)
///     .with_omega0(6.0);
/// assert_eq!(config.freqs().len(), 20);
/// assert_eq!(config.omega0(), 6.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CwtConfig {
    /// Analysis frequencies in Hz, in output order.
    freqs: Vec<f64>,
    /// Mother wavelet.
    wavelet: Wavelet,
}

impl CwtConfig {
    /// Creates a config with the default grid (50 log-spaced frequencies
    /// from 1 to 100 Hz) and a Morlet wavelet with `omega0 = 5`.
    pub fn new() -> Self {
        Self {
            freqs: log_spaced(DEFAULT_F_MIN, DEFAULT_F_MAX, DEFAULT_N_FREQS),
            wavelet: Wavelet::default(),
        }
    }

    /// Sets an explicit frequency list. Order is kept.
    pub fn with_freqs(mut self, freqs: Vec<f64>) -> Self {
        self.freqs = freqs;
        self
    }

    /// Sets `n` log-spaced frequencies from `f_min` to `f_max` inclusive.
    pub fn with_log_freqs(mut self, f_min: f64, f_max: f64, n: usize) -> Self {
        self.freqs = log_spaced(f_min, f_max, n);
        self
    }

    /// Sets the mother wavelet.
    pub fn with_wavelet(mut self, wavelet: Wavelet) -> Self {
        self.wavelet = wavelet;
        self
    }

    /// Sets the Morlet centre frequency.
    pub fn with_omega0(mut self, omega0: f64) -> Self {
        self.wavelet = Wavelet::Morlet { omega0 };
        self
    }

    /// Returns the analysis frequencies in Hz.
    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    /// Returns the mother wavelet.
    pub fn wavelet(&self) -> Wavelet {
        self.wavelet
    }

    /// Returns the Morlet centre frequency.
    pub fn omega0(&self) -> f64 {
        match self.wavelet {
            Wavelet::Morlet { omega0 } => omega0,
        }
    }

    /// Checks the frequency list and wavelet parameters.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::EmptyFrequencies`] | no frequencies |
    /// | [`WaveletError::InvalidFrequency`] | a frequency is `<= 0`, NaN or infinite |
    /// | [`WaveletError::InvalidOmega0`] | `omega0 <= 0`, NaN or infinite |
    pub fn validate(&self) -> Result<(), WaveletError> {
        if self.freqs.is_empty() {
            return Err(WaveletError::EmptyFrequencies);
        }
        if let Some((index, &value)) = self
            .freqs
            .iter()
            .enumerate()
            .find(|(_, f)| !(f.is_finite() && **f > 0.0))
        {
            return Err(WaveletError::InvalidFrequency { index, value });
        }
        let omega0 = self.omega0();
        if !(omega0.is_finite() && omega0 > 0.0) {
            return Err(WaveletError::InvalidOmega0 { omega0 });
        }
        Ok(())
    }
}

impl Default for CwtConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `n` geometrically spaced values from `f_min` to `f_max` inclusive.
///
/// Returns `[f_min]` for `n == 1` and an empty vector for `n == 0`.
pub fn log_spaced(f_min: f64, f_max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![f_min],
        _ => {
            let (lo, hi) = (f_min.ln(), f_max.ln());
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| (lo + step * i as f64).exp()).collect()
        }
    }
}
