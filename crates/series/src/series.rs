//! Validated multi-channel time-series container.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use num_complex::Complex;

use crate::error::SeriesError;
use crate::rate::{rate_from_span, sample_rate};

/// Element type that can be stored in a [`TimeSeries`].
pub trait Sample: Copy + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;
}

impl Sample for f64 {
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl Sample for Complex<f64> {
    fn is_finite(self) -> bool {
        Complex::is_finite(self)
    }
}

/// How the caller shaped the samples.
///
/// All storage is `(n, channels)`. The layout only records whether the
/// series came from a bare 1-D vector, so that results can be handed back
/// in the same shape (a 2-D CWT for one channel, 3-D otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Built from a single 1-D channel.
    Single,
    /// Built from an `(n, channels)` matrix, even when `channels == 1`.
    Multi,
}

/// A validated, uniformly sampled, multi-channel time series.
///
/// Guarantees:
/// - at least 2 samples and at least 1 channel
/// - one timestamp per sample, strictly increasing
/// - all timestamps and samples finite
/// - one name per channel
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use tempo_series::TimeSeries;
///
/// let ts = TimeSeries::new(
///     array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]],
///     vec![0.0, 0.5, 1.0],
///     vec!["a".into(), "b".into()],
/// )
/// .unwrap();
/// assert_eq!(ts.len(), 3);
/// assert_eq!(ts.n_channels(), 2);
/// assert!((ts.sample_rate() - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries<T: Sample = f64> {
    samples: Array2<T>,
    time_span: Vec<f64>,
    channel_names: Vec<String>,
    layout: Layout,
}

/// Complex-valued series, as produced by the analytic signal.
pub type ComplexTimeSeries = TimeSeries<Complex<f64>>;

impl<T: Sample> TimeSeries<T> {
    /// Creates a multi-channel series from an `(n, channels)` sample matrix.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::TooShort`] | fewer than 2 samples |
    /// | [`SeriesError::NoChannels`] | zero columns |
    /// | [`SeriesError::LengthMismatch`] | `time_span.len() != n` |
    /// | [`SeriesError::ChannelNamesMismatch`] | one name per channel not supplied |
    /// | [`SeriesError::NonMonotonicTime`] | timestamps not strictly increasing |
    /// | [`SeriesError::NonPositiveSpan`] | first-to-last span not positive |
    /// | [`SeriesError::NonFiniteData`] | NaN or infinity in samples or timestamps |
    pub fn new(
        samples: Array2<T>,
        time_span: Vec<f64>,
        channel_names: Vec<String>,
    ) -> Result<Self, SeriesError> {
        Self::validated(samples, time_span, channel_names, Layout::Multi)
    }

    /// Creates a multi-channel series with default channel names `ch0, ch1, ...`.
    pub fn unnamed(samples: Array2<T>, time_span: Vec<f64>) -> Result<Self, SeriesError> {
        let names = default_names(samples.ncols());
        Self::new(samples, time_span, names)
    }

    /// Creates a single-channel series from a 1-D sample vector.
    pub fn from_channel(samples: Vec<T>, time_span: Vec<f64>) -> Result<Self, SeriesError> {
        let matrix = Array1::from(samples).insert_axis(Axis(1));
        Self::validated(matrix, time_span, default_names(1), Layout::Single)
    }

    /// Creates a multi-channel series sampled at `fs` Hz starting at `t = 0`.
    pub fn uniform(samples: Array2<T>, fs: f64) -> Result<Self, SeriesError> {
        let times = uniform_times(samples.nrows(), fs)?;
        Self::unnamed(samples, times)
    }

    /// Creates a single-channel series sampled at `fs` Hz starting at `t = 0`.
    pub fn uniform_channel(samples: Vec<T>, fs: f64) -> Result<Self, SeriesError> {
        let times = uniform_times(samples.len(), fs)?;
        Self::from_channel(samples, times)
    }

    fn validated(
        samples: Array2<T>,
        time_span: Vec<f64>,
        channel_names: Vec<String>,
        layout: Layout,
    ) -> Result<Self, SeriesError> {
        let n = samples.nrows();
        if n < 2 {
            return Err(SeriesError::TooShort { len: n, min: 2 });
        }
        if samples.ncols() == 0 {
            return Err(SeriesError::NoChannels);
        }
        if time_span.len() != n {
            return Err(SeriesError::LengthMismatch {
                samples: n,
                times: time_span.len(),
            });
        }
        if channel_names.len() != samples.ncols() {
            return Err(SeriesError::ChannelNamesMismatch {
                names: channel_names.len(),
                channels: samples.ncols(),
            });
        }
        if !time_span.iter().all(|t| t.is_finite()) || !samples.iter().all(|v| v.is_finite()) {
            return Err(SeriesError::NonFiniteData);
        }
        sample_rate(&time_span)?;
        if let Some(index) = (1..n).find(|&i| time_span[i] <= time_span[i - 1]) {
            return Err(SeriesError::NonMonotonicTime { index });
        }

        Ok(Self {
            samples,
            time_span,
            channel_names,
            layout,
        })
    }

    /// Returns the `(n, channels)` sample matrix.
    pub fn samples(&self) -> &Array2<T> {
        &self.samples
    }

    /// Consumes the series, returning the sample matrix.
    pub fn into_samples(self) -> Array2<T> {
        self.samples
    }

    /// Returns the timestamps.
    pub fn time_span(&self) -> &[f64] {
        &self.time_span
    }

    /// Returns the channel names.
    pub fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    /// Returns the layout the series was built with.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    /// Returns `true` if the series has no samples.
    ///
    /// Note: a valid `TimeSeries` is never empty (minimum length is 2).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.samples.ncols()
    }

    /// Returns a view of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_channels()`.
    pub fn channel(&self, index: usize) -> ArrayView1<'_, T> {
        self.samples.column(index)
    }

    /// Iterates over the channels in order.
    pub fn channels(&self) -> impl Iterator<Item = ArrayView1<'_, T>> {
        self.samples.axis_iter(Axis(1))
    }

    /// Effective sampling frequency, `(n - 1) / (t[n-1] - t[0])`.
    pub fn sample_rate(&self) -> f64 {
        rate_from_span(self.len(), self.duration())
    }

    /// Half the sampling frequency.
    pub fn nyquist(&self) -> f64 {
        0.5 * self.sample_rate()
    }

    /// Time from the first to the last sample.
    pub fn duration(&self) -> f64 {
        self.time_span[self.len() - 1] - self.time_span[0]
    }

    /// Applies `f` to every channel and assembles the outputs into a series
    /// with the same time span, channel names and layout.
    ///
    /// This is the one place where single- and multi-channel inputs are
    /// handled alike: operations only ever see one channel at a time.
    ///
    /// # Panics
    ///
    /// Panics if `f` returns a channel whose length differs from `len()`.
    pub fn map_channels<U, F>(&self, mut f: F) -> TimeSeries<U>
    where
        U: Sample,
        F: FnMut(ArrayView1<'_, T>) -> Vec<U>,
    {
        let mut out = Array2::from_elem(self.samples.raw_dim(), U::default());
        for (column, mut target) in self.channels().zip(out.axis_iter_mut(Axis(1))) {
            let values = f(column);
            assert_eq!(
                values.len(),
                target.len(),
                "map_channels: channel length changed"
            );
            target.assign(&ArrayView1::from(&values[..]));
        }
        TimeSeries {
            samples: out,
            time_span: self.time_span.clone(),
            channel_names: self.channel_names.clone(),
            layout: self.layout,
        }
    }

    /// Splits the series into one single-channel series per channel.
    ///
    /// Each part keeps the full time span and its channel's name.
    pub fn split_channels(&self) -> Vec<TimeSeries<T>> {
        self.channels()
            .zip(&self.channel_names)
            .map(|(column, name)| TimeSeries {
                samples: column.to_owned().insert_axis(Axis(1)),
                time_span: self.time_span.clone(),
                channel_names: vec![name.clone()],
                layout: Layout::Single,
            })
            .collect()
    }
}

/// Default channel names `ch0, ch1, ...`.
fn default_names(channels: usize) -> Vec<String> {
    (0..channels).map(|i| format!("ch{i}")).collect()
}

fn uniform_times(n: usize, fs: f64) -> Result<Vec<f64>, SeriesError> {
    if !fs.is_finite() || fs <= 0.0 {
        return Err(SeriesError::NonPositiveSpan { span: 1.0 / fs });
    }
    Ok((0..n).map(|i| i as f64 / fs).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn two_channel() -> TimeSeries {
        TimeSeries::new(
            array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0]],
            vec![0.0, 0.1, 0.2, 0.3],
            vec!["left".into(), "right".into()],
        )
        .unwrap()
    }

    #[test]
    fn new_valid_series() {
        let ts = two_channel();
        assert_eq!(ts.len(), 4);
        assert_eq!(ts.n_channels(), 2);
        assert!(!ts.is_empty());
        assert_eq!(ts.layout(), Layout::Multi);
        assert_eq!(ts.channel_names(), &["left".to_string(), "right".to_string()]);
        assert_relative_eq!(ts.sample_rate(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(ts.nyquist(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn from_channel_is_single_layout() {
        let ts = TimeSeries::from_channel(vec![1.0, 2.0, 3.0], vec![0.0, 1.0, 2.0]).unwrap();
        assert_eq!(ts.layout(), Layout::Single);
        assert_eq!(ts.n_channels(), 1);
        assert_eq!(ts.channel_names(), &["ch0".to_string()]);
        assert_eq!(ts.channel(0).to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn one_column_matrix_stays_multi() {
        let ts = TimeSeries::unnamed(array![[1.0], [2.0]], vec![0.0, 1.0]).unwrap();
        assert_eq!(ts.layout(), Layout::Multi);
        assert_eq!(ts.n_channels(), 1);
    }

    #[test]
    fn uniform_builds_time_axis() {
        let ts = TimeSeries::uniform_channel(vec![0.0; 5], 4.0).unwrap();
        assert_eq!(ts.time_span(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_relative_eq!(ts.sample_rate(), 4.0);
    }

    #[test]
    fn uniform_rejects_bad_rate() {
        let err = TimeSeries::uniform_channel(vec![0.0; 5], 0.0).unwrap_err();
        assert!(matches!(err, SeriesError::NonPositiveSpan { .. }));
    }

    #[test]
    fn too_short_rejected() {
        let err = TimeSeries::from_channel(vec![1.0], vec![0.0]).unwrap_err();
        assert_eq!(err, SeriesError::TooShort { len: 1, min: 2 });
        let err = TimeSeries::from_channel(Vec::<f64>::new(), vec![]).unwrap_err();
        assert_eq!(err, SeriesError::TooShort { len: 0, min: 2 });
    }

    #[test]
    fn no_channels_rejected() {
        let samples = Array2::<f64>::zeros((3, 0));
        let err = TimeSeries::new(samples, vec![0.0, 1.0, 2.0], vec![]).unwrap_err();
        assert_eq!(err, SeriesError::NoChannels);
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = TimeSeries::from_channel(vec![1.0, 2.0, 3.0], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            SeriesError::LengthMismatch {
                samples: 3,
                times: 2
            }
        );
    }

    #[test]
    fn channel_names_mismatch_rejected() {
        let err = TimeSeries::new(
            array![[1.0, 2.0], [3.0, 4.0]],
            vec![0.0, 1.0],
            vec!["only".into()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SeriesError::ChannelNamesMismatch {
                names: 1,
                channels: 2
            }
        );
    }

    #[test]
    fn non_monotonic_rejected() {
        let err =
            TimeSeries::from_channel(vec![1.0, 2.0, 3.0, 4.0], vec![0.0, 1.0, 1.0, 2.0])
                .unwrap_err();
        assert_eq!(err, SeriesError::NonMonotonicTime { index: 2 });
    }

    #[test]
    fn nan_sample_rejected() {
        let err = TimeSeries::from_channel(vec![1.0, f64::NAN], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(err, SeriesError::NonFiniteData);
    }

    #[test]
    fn infinite_time_rejected() {
        let err =
            TimeSeries::from_channel(vec![1.0, 2.0], vec![0.0, f64::INFINITY]).unwrap_err();
        assert_eq!(err, SeriesError::NonFiniteData);
    }

    #[test]
    fn complex_series_supported() {
        let ts: ComplexTimeSeries = TimeSeries::from_channel(
            vec![Complex::new(1.0, 0.0), Complex::new(0.0, 1.0)],
            vec![0.0, 1.0],
        )
        .unwrap();
        assert_eq!(ts.len(), 2);
    }

    #[test]
    fn map_channels_preserves_metadata() {
        let ts = two_channel();
        let doubled = ts.map_channels(|c| c.iter().map(|v| v * 2.0).collect());
        assert_eq!(doubled.time_span(), ts.time_span());
        assert_eq!(doubled.channel_names(), ts.channel_names());
        assert_eq!(doubled.layout(), ts.layout());
        assert_eq!(doubled.channel(1).to_vec(), vec![20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn map_channels_changes_element_type() {
        let ts = TimeSeries::from_channel(vec![1.0, -2.0], vec![0.0, 1.0]).unwrap();
        let complex: ComplexTimeSeries = ts.map_channels(|c| {
            c.iter().map(|&v| Complex::new(v, -v)).collect()
        });
        assert_eq!(complex.layout(), Layout::Single);
        assert_eq!(complex.channel(0)[1], Complex::new(-2.0, 2.0));
    }

    #[test]
    #[should_panic(expected = "channel length changed")]
    fn map_channels_rejects_length_change() {
        let ts = two_channel();
        let _ = ts.map_channels(|_| vec![0.0]);
    }

    #[test]
    fn split_channels_keeps_order_and_names() {
        let ts = two_channel();
        let parts = ts.split_channels();
        assert_eq!(parts.len(), 2);
        for (i, part) in parts.iter().enumerate() {
            assert_eq!(part.layout(), Layout::Single);
            assert_eq!(part.n_channels(), 1);
            assert_eq!(part.time_span(), ts.time_span());
            assert_eq!(part.channel_names()[0], ts.channel_names()[i]);
            assert_eq!(part.channel(0), ts.channel(i));
        }
    }

    #[test]
    fn series_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<TimeSeries>();
        assert_impl::<ComplexTimeSeries>();
    }
}
