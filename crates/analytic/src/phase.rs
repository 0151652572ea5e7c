//! Instantaneous amplitude, phase and frequency.

use std::f64::consts::PI;

use ndarray::ArrayView1;
use tempo_series::TimeSeries;

use crate::hilbert::analytic_signal;

/// Instantaneous amplitude `|z|` of every channel.
pub fn amplitude(series: &TimeSeries) -> TimeSeries {
    analytic_signal(series).map_channels(|z| z.iter().map(|c| c.norm()).collect())
}

/// Instantaneous phase `arg(z)` of every channel, in radians within (-pi, pi].
pub fn phase(series: &TimeSeries) -> TimeSeries {
    analytic_signal(series).map_channels(|z| z.iter().map(|c| fold_phase(c.arg())).collect())
}

/// Removes 2 pi jumps between consecutive phase samples.
///
/// Each step is reduced to (-pi, pi] and the corrections are accumulated, so
/// the first sample is unchanged.
pub fn unwrap_phase(phase: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(phase.len());
    let mut correction = 0.0;
    let mut prev: Option<f64> = None;
    for &p in phase {
        if let Some(q) = prev {
            let step = p - q;
            let mut wrapped = (step + PI).rem_euclid(2.0 * PI) - PI;
            if wrapped == -PI && step > 0.0 {
                wrapped = PI;
            }
            if step.abs() >= PI {
                correction += wrapped - step;
            }
        }
        out.push(p + correction);
        prev = Some(p);
    }
    out
}

/// Instantaneous frequency in Hz of every channel.
///
/// The derivative of the unwrapped phase uses central differences inside the
/// series and one-sided differences at both ends.
pub fn instantaneous_frequency(series: &TimeSeries) -> TimeSeries {
    let scale = series.sample_rate() / (2.0 * PI);
    phase(series).map_channels(|column: ArrayView1<'_, f64>| {
        let wrapped: Vec<f64> = column.iter().copied().collect();
        gradient(&unwrap_phase(&wrapped))
            .into_iter()
            .map(|d| d * scale)
            .collect()
    })
}

fn fold_phase(p: f64) -> f64 {
    if p <= -PI { p + 2.0 * PI } else { p }
}

/// Per-sample derivative of `x` with unit spacing.
fn gradient(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..n)
            .map(|i| match i {
                0 => x[1] - x[0],
                i if i == n - 1 => x[n - 1] - x[n - 2],
                i => 0.5 * (x[i + 1] - x[i - 1]),
            })
            .collect(),
    }
}
