//! Forward-backward (zero-phase) IIR filtering.

use ndarray::ArrayView1;
use tempo_series::TimeSeries;
use tracing::{debug, warn};

use crate::coefficients::FilterCoefficients;

/// Number of samples reflected onto each end before filtering.
///
/// Three times the tap count, capped at `n - 1` so short series can still be
/// filtered.
pub fn pad_len(coeffs: &FilterCoefficients, n: usize) -> usize {
    let taps = coeffs.b().len().max(coeffs.a().len());
    (3 * taps).min(n.saturating_sub(1))
}

/// Applies `coeffs` forwards then backwards along `x`.
///
/// The result has zero phase shift and squared magnitude response. Ends are
/// handled by odd extension and steady-state initial conditions, so a
/// constant input passes through a unity-DC-gain filter unchanged.
pub fn filtfilt(coeffs: &FilterCoefficients, x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let b = coeffs.b();
    let a = coeffs.a();
    let padlen = pad_len(coeffs, n);
    let ext = odd_extend(x, padlen);
    let zi = lfilter_zi(b, a);

    let scaled = |x0: f64| -> Vec<f64> { zi.iter().map(|z| z * x0).collect() };

    let forward = lfilter(b, a, &ext, &scaled(ext[0]));
    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    let y0 = reversed[0];
    reversed = lfilter(b, a, &reversed, &scaled(y0));
    reversed.reverse();

    reversed[padlen..padlen + n].to_vec()
}

/// Zero-phase filters every channel of `series`, keeping its time span,
/// names and layout.
pub fn apply_zero_phase(coeffs: &FilterCoefficients, series: &TimeSeries) -> TimeSeries {
    debug!(
        order = coeffs.order(),
        channels = series.n_channels(),
        len = series.len(),
        "zero-phase filtering"
    );
    series.map_channels(|column: ArrayView1<'_, f64>| {
        let x: Vec<f64> = column.iter().copied().collect();
        filtfilt(coeffs, &x)
    })
}

/// Direct-form II transposed IIR filter with initial state `zi`.
///
/// Assumes `a[0] == 1`, `b.len() == a.len()` and `zi.len() == a.len() - 1`.
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64], zi: &[f64]) -> Vec<f64> {
    let m = b.len();
    let mut z = zi.to_vec();
    let mut y = Vec::with_capacity(x.len());
    for &xn in x {
        let yn = b[0] * xn + z.first().copied().unwrap_or(0.0);
        for i in 0..m.saturating_sub(2) {
            z[i] = b[i + 1] * xn + z[i + 1] - a[i + 1] * yn;
        }
        if m >= 2 {
            z[m - 2] = b[m - 1] * xn - a[m - 1] * yn;
        }
        y.push(yn);
    }
    y
}

/// Steady-state filter state for a unit step input.
///
/// Solves `(I - A^T) zi = b[1..] - a[1..] * b[0]` where `A` is the companion
/// matrix of `a`.
pub fn lfilter_zi(b: &[f64], a: &[f64]) -> Vec<f64> {
    let n = a.len().saturating_sub(1);
    if n == 0 {
        return Vec::new();
    }

    let mut matrix = vec![vec![0.0; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = 1.0;
        row[0] += a[i + 1];
        if i + 1 < n {
            row[i + 1] -= 1.0;
        }
    }
    let rhs: Vec<f64> = (0..n).map(|i| b[i + 1] - a[i + 1] * b[0]).collect();

    match solve(matrix, rhs) {
        Some(zi) => zi,
        None => {
            // Only reachable with a pole at z = 1, which stable coefficients exclude.
            warn!("singular steady-state system; starting from rest");
            vec![0.0; n]
        }
    }
}

/// Odd extension: `2 * x[0] - x[padlen..0]` before and
/// `2 * x[n-1] - x[n-2..n-2-padlen]` after.
fn odd_extend(x: &[f64], padlen: usize) -> Vec<f64> {
    let n = x.len();
    let first = x[0];
    let last = x[n - 1];
    let mut ext = Vec::with_capacity(n + 2 * padlen);
    ext.extend((1..=padlen).rev().map(|i| 2.0 * first - x[i]));
    ext.extend_from_slice(x);
    ext.extend((1..=padlen).map(|i| 2.0 * last - x[n - 1 - i]));
    ext
}

/// Gaussian elimination with partial pivoting. Returns `None` if singular.
fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| {
            matrix[i][col]
                .abs()
                .partial_cmp(&matrix[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if matrix[pivot][col].abs() < 1e-14 {
            return None;
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in col + 1..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| matrix[row][k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / matrix[row][row];
    }
    Some(x)
}
