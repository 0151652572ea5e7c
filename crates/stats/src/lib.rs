//! Statistical helper functions shared by the tempo crates.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Root mean square of a slice. Returns 0.0 if empty.
pub fn rms(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    (data.iter().map(|&x| x * x).sum::<f64>() / data.len() as f64).sqrt()
}

/// Least-squares line through `(i, data[i])`, returned as `(slope, intercept)`.
///
/// The abscissa is the sample index, not time, so the fit does not depend on
/// the sampling rate. Returns `(0.0, mean)` for fewer than 2 elements.
pub fn linear_fit(data: &[f64]) -> (f64, f64) {
    let n = data.len();
    if n < 2 {
        return (0.0, mean(data));
    }
    let nf = n as f64;
    let x_mean = (nf - 1.0) / 2.0;
    let y_mean = mean(data);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in data.iter().enumerate() {
        let dx = i as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    (slope, y_mean - slope * x_mean)
}

/// Removes the least-squares line from `data`.
///
/// The residual has zero mean and no linear component.
pub fn detrend_linear(data: &[f64]) -> Vec<f64> {
    let (slope, intercept) = linear_fit(data);
    data.iter()
        .enumerate()
        .map(|(i, &y)| y - (intercept + slope * i as f64))
        .collect()
}

/// Index of the largest value, ignoring NaN. Returns `None` if no finite-comparable
/// value exists.
pub fn argmax(data: &[f64]) -> Option<usize> {
    data.iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
}

/// Lag (in samples, within `-max_lag..=max_lag`) at which the cross-correlation
/// `sum_t x[t] * y[t + lag]` peaks.
///
/// Returns `None` if either input is empty.
pub fn xcorr_peak_lag(x: &[f64], y: &[f64], max_lag: usize) -> Option<isize> {
    let n = x.len().min(y.len());
    if n == 0 {
        return None;
    }
    let max_lag = max_lag.min(n - 1) as isize;
    (-max_lag..=max_lag)
        .map(|lag| {
            let sum: f64 = (0..n as isize)
                .filter_map(|t| {
                    let u = t + lag;
                    (u >= 0 && u < n as isize).then(|| x[t as usize] * y[u as usize])
                })
                .sum();
            (lag, sum)
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(lag, _)| lag)
}
