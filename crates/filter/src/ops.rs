//! One-call filtering of whole series.

use tempo_series::TimeSeries;
use tracing::info;

use crate::design::design_filter;
use crate::error::FilterError;
use crate::spec::FilterSpec;
use crate::zero_phase::apply_zero_phase;

/// Designs `spec` for the series' own sampling rate and applies it with zero
/// phase to every channel.
///
/// The output keeps the input's time span, channel names and layout. Design
/// errors are returned before any channel is touched.
#[tracing::instrument(skip(series), fields(len = series.len(), channels = series.n_channels()))]
pub fn filter_series(series: &TimeSeries, spec: &FilterSpec) -> Result<TimeSeries, FilterError> {
    let fs = series.sample_rate();
    let coeffs = design_filter(spec, fs)?;
    info!(kind = ?spec.kind(), fs, order = coeffs.order(), "filter designed");
    Ok(apply_zero_phase(&coeffs, series))
}

/// Zero-phase Butterworth low-pass.
pub fn lowpass(series: &TimeSeries, cutoff_hz: f64, order: usize) -> Result<TimeSeries, FilterError> {
    filter_series(series, &FilterSpec::Lowpass { cutoff_hz, order })
}

/// Zero-phase Butterworth high-pass.
pub fn highpass(series: &TimeSeries, cutoff_hz: f64, order: usize) -> Result<TimeSeries, FilterError> {
    filter_series(series, &FilterSpec::Highpass { cutoff_hz, order })
}

/// Zero-phase Butterworth band-pass between `low_hz` and `high_hz`.
pub fn bandpass(
    series: &TimeSeries,
    low_hz: f64,
    high_hz: f64,
    order: usize,
) -> Result<TimeSeries, FilterError> {
    filter_series(
        series,
        &FilterSpec::Bandpass {
            low_hz,
            high_hz,
            order,
        },
    )
}

/// Zero-phase notch at `freq_hz`. `bandwidth_hz` is the notch width.
pub fn notch(series: &TimeSeries, freq_hz: f64, bandwidth_hz: f64) -> Result<TimeSeries, FilterError> {
    filter_series(
        series,
        &FilterSpec::Notch {
            freq_hz,
            bandwidth_hz,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use tempo_series::Layout;

    fn tone(freq: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n).map(|i| (2.0 * PI * freq * i as f64 / fs).sin()).collect()
    }

    #[test]
    fn single_channel_layout_survives() {
        let series = TimeSeries::uniform_channel(tone(3.0, 100.0, 300), 100.0).unwrap();
        let out = lowpass(&series, 10.0, 3).unwrap();
        assert_eq!(out.layout(), Layout::Single);
        assert_eq!(out.len(), 300);
    }

    #[test]
    fn design_error_short_circuits() {
        let series = TimeSeries::uniform_channel(tone(3.0, 100.0, 300), 100.0).unwrap();
        let err = bandpass(&series, 60.0, 40.0, 3).unwrap_err();
        assert!(matches!(err, FilterError::InvalidCutoff { .. }));
    }

    #[test]
    fn notch_removes_mains_tone() {
        let fs = 500.0;
        let n = 2000;
        let x: Vec<f64> = tone(50.0, fs, n)
            .iter()
            .zip(tone(5.0, fs, n))
            .map(|(a, b)| a + b)
            .collect();
        let series = TimeSeries::uniform_channel(x, fs).unwrap();
        let out = notch(&series, 50.0, 2.0).unwrap();
        let clean = tone(5.0, fs, n);
        let interior = 400..1600;
        let resid: Vec<f64> = interior
            .clone()
            .map(|i| out.channel(0)[i] - clean[i])
            .collect();
        assert!(tempo_stats::rms(&resid) < 0.05);
    }

    #[test]
    fn highpass_removes_offset() {
        let x: Vec<f64> = tone(20.0, 200.0, 1000).iter().map(|v| v + 3.0).collect();
        let series = TimeSeries::uniform_channel(x, 200.0).unwrap();
        let out = highpass(&series, 5.0, 2).unwrap();
        let mid: Vec<f64> = out.channel(0).iter().skip(200).take(600).copied().collect();
        assert!(tempo_stats::mean(&mid).abs() < 0.01);
    }
}
