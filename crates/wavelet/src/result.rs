//! Transform output.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use num_complex::Complex;
use tempo_series::{Layout, TimeSeries};

/// Coefficients in the caller's shape.
#[derive(Clone, Debug, PartialEq)]
pub enum CwtCoefficients {
    /// `(n_times, n_freqs)` for single-channel input.
    Single(Array2<Complex<f64>>),
    /// `(n_times, n_freqs, n_channels)` for multi-channel input.
    Multi(Array3<Complex<f64>>),
}

/// Result of a continuous wavelet transform.
///
/// Coefficients are always held as `(n_times, n_freqs, n_channels)`;
/// [`CwtResult::into_coefficients`] drops the channel axis again for
/// single-channel input.
#[derive(Clone, Debug)]
pub struct CwtResult {
    /// Complex coefficients `(n_times, n_freqs, n_channels)`.
    coefficients: Array3<Complex<f64>>,
    /// Analysis frequencies in Hz.
    freqs: Vec<f64>,
    /// Timestamps of the input series.
    time_span: Vec<f64>,
    /// Channel names of the input series.
    channel_names: Vec<String>,
    /// Shape the input was supplied in.
    layout: Layout,
}

impl CwtResult {
    /// Assembles a result from per-channel `(n_times, n_freqs)` matrices,
    /// taking time span, names and layout from `series`.
    ///
    /// # Panics
    ///
    /// Panics if the number of channels or any matrix shape disagrees with
    /// `series` and `freqs`.
    pub fn from_channels(
        series: &TimeSeries,
        freqs: Vec<f64>,
        channels: Vec<Array2<Complex<f64>>>,
    ) -> Self {
        assert_eq!(
            channels.len(),
            series.n_channels(),
            "from_channels: channel count mismatch"
        );
        let mut coefficients =
            Array3::from_elem((series.len(), freqs.len(), channels.len()), Complex::default());
        for (i, (mut slot, matrix)) in coefficients.axis_iter_mut(Axis(2)).zip(&channels).enumerate() {
            assert_eq!(
                matrix.dim(),
                (series.len(), freqs.len()),
                "from_channels: channel {i} has the wrong shape"
            );
            slot.assign(matrix);
        }
        Self {
            coefficients,
            freqs,
            time_span: series.time_span().to_vec(),
            channel_names: series.channel_names().to_vec(),
            layout: series.layout(),
        }
    }

    /// Returns the coefficients as `(n_times, n_freqs, n_channels)`.
    pub fn coefficients(&self) -> &Array3<Complex<f64>> {
        &self.coefficients
    }

    /// Consumes the result and returns coefficients in the input's shape.
    pub fn into_coefficients(self) -> CwtCoefficients {
        match self.layout {
            Layout::Single => {
                CwtCoefficients::Single(self.coefficients.index_axis_move(Axis(2), 0))
            }
            Layout::Multi => CwtCoefficients::Multi(self.coefficients),
        }
    }

    /// Returns one channel's `(n_times, n_freqs)` coefficients.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_channels()`.
    pub fn channel(&self, index: usize) -> ArrayView2<'_, Complex<f64>> {
        self.coefficients.index_axis(Axis(2), index)
    }

    /// Returns the analysis frequencies in Hz.
    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    /// Returns the input timestamps.
    pub fn time_span(&self) -> &[f64] {
        &self.time_span
    }

    /// Returns the input channel names.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// Returns the input layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of time points.
    pub fn n_times(&self) -> usize {
        self.coefficients.len_of(Axis(0))
    }

    /// Returns the number of frequencies.
    pub fn n_freqs(&self) -> usize {
        self.coefficients.len_of(Axis(1))
    }

    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.coefficients.len_of(Axis(2))
    }

    /// Wavelet power `|W|^2`, same shape as [`CwtResult::coefficients`].
    pub fn power(&self) -> Array3<f64> {
        self.coefficients.mapv(|c| c.norm_sqr())
    }

    /// Time-averaged power per frequency for one channel.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_channels()`.
    pub fn global_spectrum(&self, index: usize) -> Vec<f64> {
        let n = self.n_times() as f64;
        self.channel(index)
            .axis_iter(Axis(1))
            .map(|column| column.iter().map(|c| c.norm_sqr()).sum::<f64>() / n)
            .collect()
    }
}

/// Bytes needed for `n_times * n_freqs * n_channels` complex coefficients.
pub fn estimated_bytes(n_times: usize, n_freqs: usize, n_channels: usize) -> usize {
    n_times
        .saturating_mul(n_freqs)
        .saturating_mul(n_channels)
        .saturating_mul(std::mem::size_of::<Complex<f64>>())
}
