//! FFT-based analytic signal.

use ndarray::ArrayView1;
use num_complex::Complex;
use rustfft::FftPlanner;
use tempo_series::{ComplexTimeSeries, TimeSeries};
use tracing::debug;

/// Analytic signal of one channel: `x + j * H(x)`.
///
/// The real part reproduces `x` and the imaginary part is its Hilbert
/// transform. Uses a full-length FFT, so any length works.
pub fn hilbert(x: &[f64]) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::new();
    hilbert_with(&mut planner, x)
}

/// Analytic signal of every channel of `series`.
///
/// Shape, time span, channel names and layout are preserved.
///
/// # Example
///
/// ```
/// use tempo_analytic::analytic_signal;
/// use tempo_series::TimeSeries;
///
/// let x: Vec<f64> = (0..64).map(|i| (i as f64 * std::f64::consts::PI / 8.0).cos()).collect();
/// let series = TimeSeries::uniform_channel(x, 16.0).unwrap();
/// let z = analytic_signal(&series);
/// assert!((z.channel(0)[5].norm() - 1.0).abs() < 1e-9);
/// ```
pub fn analytic_signal(series: &TimeSeries) -> ComplexTimeSeries {
    debug!(
        len = series.len(),
        channels = series.n_channels(),
        "computing analytic signal"
    );
    let mut planner = FftPlanner::new();
    series.map_channels(|column: ArrayView1<'_, f64>| {
        let x: Vec<f64> = column.iter().copied().collect();
        hilbert_with(&mut planner, &x)
    })
}

fn hilbert_with(planner: &mut FftPlanner<f64>, x: &[f64]) -> Vec<Complex<f64>> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let mut spectrum: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
    planner.plan_fft_forward(n).process(&mut spectrum);

    for (k, bin) in spectrum.iter_mut().enumerate() {
        *bin *= spectral_weight(k, n);
    }

    planner.plan_fft_inverse(n).process(&mut spectrum);
    let scale = 1.0 / n as f64;
    spectrum.iter().map(|c| *c * scale).collect()
}

/// Weight that keeps DC (and Nyquist for even `n`), doubles positive
/// frequencies and zeroes negative ones.
fn spectral_weight(k: usize, n: usize) -> f64 {
    if k == 0 || (n % 2 == 0 && k == n / 2) {
        1.0
    } else if k < n.div_ceil(2) {
        2.0
    } else {
        0.0
    }
}
