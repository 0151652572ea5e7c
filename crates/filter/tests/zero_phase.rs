use std::f64::consts::PI;

use ndarray::Array2;
use tempo_filter::{FilterSpec, bandpass, filter_series, lowpass};
use tempo_series::{Layout, TimeSeries};
use tempo_stats::{rms, xcorr_peak_lag};

fn tone(freq: f64, fs: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| (2.0 * PI * freq * i as f64 / fs).sin()).collect()
}

fn interior(x: &[f64]) -> &[f64] {
    let margin = x.len() / 5;
    &x[margin..x.len() - margin]
}

#[test]
fn passband_tone_keeps_amplitude_and_phase() {
    let fs = 200.0;
    let x = tone(4.0, fs, 1000);
    let series = TimeSeries::uniform_channel(x.clone(), fs).unwrap();
    let y: Vec<f64> = lowpass(&series, 30.0, 4).unwrap().channel(0).to_vec();

    let ratio = rms(interior(&y)) / rms(interior(&x));
    assert!((ratio - 1.0).abs() < 0.05, "amplitude ratio {ratio}");
    assert_eq!(xcorr_peak_lag(interior(&x), interior(&y), 10), Some(0));
}

#[test]
fn lowpass_separates_two_tones() {
    let fs = 100.0;
    let n = 1000;
    let slow = tone(5.0, fs, n);
    let fast = tone(40.0, fs, n);
    let x: Vec<f64> = slow.iter().zip(&fast).map(|(a, b)| a + b).collect();
    let series = TimeSeries::uniform_channel(x, fs).unwrap();
    let y: Vec<f64> = lowpass(&series, 10.0, 3).unwrap().channel(0).to_vec();

    // What is left of the 40 Hz tone after subtracting the 5 Hz one.
    let leak: Vec<f64> = y.iter().zip(&slow).map(|(y, s)| y - s).collect();
    let attenuation_db = 20.0 * (rms(interior(&fast)) / rms(interior(&leak))).log10();
    assert!(attenuation_db > 20.0, "stopband attenuation {attenuation_db} dB");

    let pass_db = 20.0 * (rms(interior(&y)) / rms(interior(&slow))).log10();
    assert!(pass_db.abs() < 1.0, "passband change {pass_db} dB");
}

#[test]
fn bandpass_keeps_only_the_band() {
    let fs = 250.0;
    let n = 2500;
    let alpha = tone(10.0, fs, n);
    let x: Vec<f64> = alpha
        .iter()
        .zip(tone(1.0, fs, n))
        .zip(tone(60.0, fs, n))
        .map(|((a, b), c)| a + b + c)
        .collect();
    let series = TimeSeries::uniform_channel(x, fs).unwrap();
    let y: Vec<f64> = bandpass(&series, 8.0, 13.0, 3).unwrap().channel(0).to_vec();
    let resid: Vec<f64> = y.iter().zip(&alpha).map(|(y, a)| y - a).collect();
    assert!(rms(interior(&resid)) < 0.1);
}

#[test]
fn channels_filtered_independently() {
    let fs = 100.0;
    let n = 600;
    let a = tone(2.0, fs, n);
    let b = tone(45.0, fs, n);
    let samples = Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { a[i] } else { b[i] });
    let series = TimeSeries::uniform(samples, fs).unwrap();
    let out = filter_series(&series, &FilterSpec::lowpass(10.0)).unwrap();

    assert_eq!(out.layout(), Layout::Multi);
    assert_eq!(out.n_channels(), 2);

    let kept: Vec<f64> = out.channel(0).to_vec();
    let killed: Vec<f64> = out.channel(1).to_vec();
    assert!(rms(interior(&kept)) > 0.65);
    assert!(rms(interior(&killed)) < 0.01);

    let single = TimeSeries::uniform_channel(a, fs).unwrap();
    let alone = filter_series(&single, &FilterSpec::lowpass(10.0)).unwrap();
    for (x, y) in alone.channel(0).iter().zip(out.channel(0)) {
        assert!((x - y).abs() < 1e-12);
    }
}
