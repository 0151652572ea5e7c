//! Validated transfer-function coefficients.

use num_complex::Complex;
use std::f64::consts::PI;

use crate::error::FilterError;
use crate::roots;

/// Numerator `b` and denominator `a` of a stable IIR filter.
///
/// The only way to obtain a value is [`FilterCoefficients::new`] (or the
/// design functions, which go through it), so holding one means:
///
/// - `b` and `a` have equal, non-zero length
/// - `a[0] == 1`
/// - every coefficient is finite
/// - every root of `a` lies strictly inside the unit circle
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// Validates and normalises a coefficient pair.
    ///
    /// Both vectors are divided by `a[0]`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::MalformedCoefficients`] | empty, unequal lengths, or `a[0] == 0` |
    /// | [`FilterError::NonFiniteCoefficients`] | NaN or infinite entry |
    /// | [`FilterError::UnstableFilter`] | a root of `a` has magnitude >= 1 |
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<Self, FilterError> {
        if b.is_empty() || b.len() != a.len() || a[0] == 0.0 {
            return Err(FilterError::MalformedCoefficients {
                b: b.len(),
                a: a.len(),
            });
        }
        if b.iter().chain(&a).any(|v| !v.is_finite()) {
            return Err(FilterError::NonFiniteCoefficients);
        }

        let a0 = a[0];
        let b: Vec<f64> = b.into_iter().map(|v| v / a0).collect();
        let a: Vec<f64> = a.into_iter().map(|v| v / a0).collect();
        if b.iter().chain(&a).any(|v| !v.is_finite()) {
            return Err(FilterError::NonFiniteCoefficients);
        }

        let max_pole_magnitude = roots::max_root_magnitude(&a);
        if max_pole_magnitude.is_nan() || max_pole_magnitude >= 1.0 {
            return Err(FilterError::UnstableFilter { max_pole_magnitude });
        }

        Ok(Self { b, a })
    }

    /// Numerator coefficients.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients (`a[0] == 1`).
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Filter order (number of taps minus one).
    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// Roots of the denominator polynomial.
    pub fn poles(&self) -> Vec<Complex<f64>> {
        roots::poly_roots(&self.a)
    }

    /// Magnitude of the single-pass frequency response at `freq_hz`.
    ///
    /// A zero-phase application squares this value.
    pub fn gain_at(&self, freq_hz: f64, fs: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / fs;
        let eval = |coeffs: &[f64]| -> Complex<f64> {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| Complex::from_polar(c, -omega * k as f64))
                .sum()
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }
}
