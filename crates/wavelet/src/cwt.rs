//! Continuous Wavelet Transform (CWT) with the Morlet wavelet.
//!
//! Each frequency gets its own sampled wavelet whose support spans ten
//! periods. The detrended channel is convolved with every wavelet via a
//! zero-padded FFT, keeping the centred `n` samples.

use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::{Array2, ArrayView1};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use tempo_series::TimeSeries;
use tempo_stats::detrend_linear;
use tracing::{debug, warn};

use crate::config::CwtConfig;
use crate::error::WaveletError;
use crate::result::{CwtResult, estimated_bytes};

/// Wavelet support in periods of the analysis frequency.
const CYCLES: f64 = 10.0;

/// Computes the CWT of every channel of `series` at `config.freqs()`.
///
/// Channels are linearly detrended first. Frequencies above Nyquist are
/// accepted with a warning; nothing is resampled.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::EmptyFrequencies`] | no frequencies |
/// | [`WaveletError::InvalidFrequency`] | a frequency is `<= 0`, NaN or infinite |
/// | [`WaveletError::InvalidOmega0`] | `omega0 <= 0`, NaN or infinite |
#[tracing::instrument(
    skip(series, config),
    fields(len = series.len(), channels = series.n_channels(), n_freqs = config.freqs().len())
)]
pub fn cwt(series: &TimeSeries, config: &CwtConfig) -> Result<CwtResult, WaveletError> {
    config.validate()?;

    let fs = series.sample_rate();
    let nyquist = series.nyquist();
    for &f in config.freqs().iter().filter(|&&f| f > nyquist) {
        warn!(freq_hz = f, nyquist, "frequency above Nyquist; coefficients will alias");
    }
    debug!(
        bytes = estimated_bytes(series.len(), config.freqs().len(), series.n_channels()),
        "allocating CWT coefficients"
    );

    let bank = MorletBank::new(series.len(), fs, config);
    let channels = series
        .channels()
        .map(|column| bank.transform(column))
        .collect();

    Ok(CwtResult::from_channels(series, config.freqs().to_vec(), channels))
}

/// Samples the Morlet wavelet on `m` points for analysis width `width`
/// (samples per period).
///
/// `x` runs over `[-2 pi s, 2 pi s]` with `s = m / (2 omega0 width)`, so the
/// oscillation completes one cycle every `width` samples.
fn morlet(m: usize, width: f64, omega0: f64) -> Vec<Complex<f64>> {
    let s = m as f64 / (2.0 * omega0 * width);
    let start = -2.0 * PI * s;
    let step = if m > 1 {
        4.0 * PI * s / (m - 1) as f64
    } else {
        0.0
    };
    let correction = (-0.5 * omega0 * omega0).exp();
    let norm = PI.powf(-0.25);
    (0..m)
        .map(|k| {
            let x = start + step * k as f64;
            let carrier = Complex::from_polar(1.0, omega0 * x) - correction;
            carrier * ((-0.5 * x * x).exp() * norm)
        })
        .collect()
}

/// Number of wavelet samples for `width`, clamped to `[1, n]`.
fn support(width: f64, n: usize) -> usize {
    ((CYCLES * width).floor() as usize).clamp(1, n)
}

/// FFTs of the sampled wavelets for one series length and rate.
struct MorletBank {
    n: usize,
    nfft: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    /// Per frequency: kernel spectrum and the `same`-mode offset.
    kernels: Vec<(Vec<Complex<f64>>, usize)>,
}

impl MorletBank {
    fn new(n: usize, fs: f64, config: &CwtConfig) -> Self {
        let nfft = (2 * n - 1).next_power_of_two();
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(nfft);
        let inverse = planner.plan_fft_inverse(nfft);
        let omega0 = config.omega0();

        let kernels = config
            .freqs()
            .iter()
            .map(|&f| {
                let width = fs / f;
                let m = support(width, n);
                let mut spectrum = morlet(m, width, omega0);
                spectrum.resize(nfft, Complex::default());
                forward.process(&mut spectrum);
                (spectrum, (m - 1) / 2)
            })
            .collect();

        Self {
            n,
            nfft,
            forward,
            inverse,
            kernels,
        }
    }

    /// Transforms one channel into an `(n, n_freqs)` matrix.
    fn transform(&self, column: ArrayView1<'_, f64>) -> Array2<Complex<f64>> {
        let raw: Vec<f64> = column.iter().copied().collect();
        let mut signal: Vec<Complex<f64>> = detrend_linear(&raw)
            .into_iter()
            .map(|v| Complex::new(v, 0.0))
            .collect();
        signal.resize(self.nfft, Complex::default());
        self.forward.process(&mut signal);

        let scale = 1.0 / self.nfft as f64;
        let mut out = Array2::from_elem((self.n, self.kernels.len()), Complex::default());
        let mut product = vec![Complex::default(); self.nfft];
        for (j, (kernel, offset)) in self.kernels.iter().enumerate() {
            for ((p, s), k) in product.iter_mut().zip(&signal).zip(kernel) {
                *p = *s * *k;
            }
            self.inverse.process(&mut product);
            for (t, value) in product[*offset..*offset + self.n].iter().enumerate() {
                out[[t, j]] = *value * scale;
            }
        }
        out
    }
}
