//! Butterworth and notch filter design.
//!
//! Butterworth filters go through the usual analogue pipeline: prototype
//! poles, frequency transformation, bilinear transform, then expansion of
//! zeros and poles into polynomials. Everything is computed with the sampling
//! frequency normalised to 2 (Nyquist = 1).

use num_complex::Complex;
use std::f64::consts::PI;
use tracing::debug;

use crate::coefficients::FilterCoefficients;
use crate::error::FilterError;
use crate::spec::FilterSpec;

type C64 = Complex<f64>;

/// Butterworth band type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandType {
    /// One cutoff, passes below it.
    Lowpass,
    /// One cutoff, passes above it.
    Highpass,
    /// Two band edges, passes between them.
    Bandpass,
}

impl BandType {
    fn n_cutoffs(self) -> usize {
        match self {
            Self::Lowpass | Self::Highpass => 1,
            Self::Bandpass => 2,
        }
    }
}

/// Zeros, poles and gain of a transfer function.
#[derive(Clone, Debug)]
struct Zpk {
    zeros: Vec<C64>,
    poles: Vec<C64>,
    gain: f64,
}

/// Designs the filter described by `spec` for sampling rate `fs`.
pub fn design_filter(spec: &FilterSpec, fs: f64) -> Result<FilterCoefficients, FilterError> {
    match *spec {
        FilterSpec::Lowpass { cutoff_hz, order } => {
            butterworth(BandType::Lowpass, order, &[cutoff_hz], fs)
        }
        FilterSpec::Highpass { cutoff_hz, order } => {
            butterworth(BandType::Highpass, order, &[cutoff_hz], fs)
        }
        FilterSpec::Bandpass {
            low_hz,
            high_hz,
            order,
        } => butterworth(BandType::Bandpass, order, &[low_hz, high_hz], fs),
        FilterSpec::Notch {
            freq_hz,
            bandwidth_hz,
        } => notch(freq_hz, bandwidth_hz, fs),
    }
}

/// Designs a digital Butterworth filter.
///
/// `cutoffs_hz` holds one frequency for low/high-pass and two band edges for
/// band-pass. Each is divided by the Nyquist frequency `fs / 2` and must land
/// strictly inside (0, 1).
///
/// The result is expanded into transfer-function polynomials `(b, a)`, whose
/// roots are very sensitive to rounding at high orders. Designs with a
/// cutoff very close to 0 or 1 (for example order 6 at `Wn = 0.001`) can
/// therefore fail the stability check even though the analog poles are
/// stable; lower the order or move the cutoff inwards.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FilterError::InvalidOrder`] | `order == 0` |
/// | [`FilterError::InvalidCutoff`] | wrong cutoff count, normalised cutoff outside (0, 1), or band edges not increasing |
/// | [`FilterError::UnstableFilter`] | resulting denominator has a root on or outside the unit circle |
#[tracing::instrument(level = "debug", skip(cutoffs_hz), fields(cutoffs_hz = ?cutoffs_hz))]
pub fn butterworth(
    band: BandType,
    order: usize,
    cutoffs_hz: &[f64],
    fs: f64,
) -> Result<FilterCoefficients, FilterError> {
    if order == 0 {
        return Err(FilterError::InvalidOrder { order });
    }
    let wn = normalize(cutoffs_hz, fs)?;
    if wn.len() != band.n_cutoffs() {
        return Err(FilterError::InvalidCutoff {
            normalized: wn,
            reason: match band {
                BandType::Bandpass => "band-pass needs exactly two band edges",
                _ => "low/high-pass needs exactly one cutoff",
            },
        });
    }
    if band == BandType::Bandpass && wn[0] >= wn[1] {
        return Err(FilterError::InvalidCutoff {
            normalized: wn,
            reason: "band-pass low edge must be below the high edge",
        });
    }

    // Pre-warp so the digital cutoffs land where requested after the bilinear map.
    let fs_norm = 2.0;
    let warped: Vec<f64> = wn
        .iter()
        .map(|&w| 2.0 * fs_norm * (PI * w / fs_norm).tan())
        .collect();

    let proto = butter_prototype(order);
    let analog = match band {
        BandType::Lowpass => lp_to_lp(proto, warped[0]),
        BandType::Highpass => lp_to_hp(proto, warped[0]),
        BandType::Bandpass => {
            let bw = warped[1] - warped[0];
            let wo = (warped[0] * warped[1]).sqrt();
            lp_to_bp(proto, wo, bw)
        }
    };
    let digital = bilinear(analog, fs_norm);
    let (b, a) = zpk_to_tf(&digital);
    debug!(taps = b.len(), "butterworth coefficients expanded");

    FilterCoefficients::new(b, a)
}

/// Designs a second-order notch centred on `freq_hz` with width `bandwidth_hz`.
///
/// The pole radius is `1 - 1.5 * bw` with `bw` the Nyquist-normalised
/// bandwidth, so very wide notches push the poles out of the unit circle and
/// are rejected as unstable.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`FilterError::InvalidCutoff`] | normalised centre frequency outside (0, 1) |
/// | [`FilterError::InvalidBandwidth`] | `bandwidth_hz` not positive and finite |
/// | [`FilterError::UnstableFilter`] | bandwidth so wide that the pole radius reaches 1 |
#[tracing::instrument(level = "debug")]
pub fn notch(freq_hz: f64, bandwidth_hz: f64, fs: f64) -> Result<FilterCoefficients, FilterError> {
    let f = normalize(&[freq_hz], fs)?[0];
    if !bandwidth_hz.is_finite() || bandwidth_hz <= 0.0 {
        return Err(FilterError::InvalidBandwidth { bandwidth_hz });
    }
    let bw = bandwidth_hz / (0.5 * fs);

    let r = 1.0 - 1.5 * bw;
    let cos_f = (PI * f).cos();
    let k = (1.0 - 2.0 * r * cos_f + r * r) / (2.0 - 2.0 * cos_f);
    let a = vec![1.0, -2.0 * r * cos_f, r * r];
    let b = vec![k, -2.0 * k * cos_f, k];
    debug!(pole_radius = r, "notch coefficients computed");

    FilterCoefficients::new(b, a)
}

fn normalize(cutoffs_hz: &[f64], fs: f64) -> Result<Vec<f64>, FilterError> {
    let nyq = 0.5 * fs;
    let wn: Vec<f64> = cutoffs_hz.iter().map(|f| f / nyq).collect();
    if wn.iter().any(|&w| !(w > 0.0 && w < 1.0)) {
        return Err(FilterError::InvalidCutoff {
            normalized: wn,
            reason: "must lie strictly between 0 and 1",
        });
    }
    Ok(wn)
}

/// Analogue low-pass prototype with cutoff 1 rad/s.
fn butter_prototype(order: usize) -> Zpk {
    let n = order as i64;
    let poles = (-n + 1..n)
        .step_by(2)
        .map(|m| -C64::from_polar(1.0, PI * m as f64 / (2.0 * order as f64)))
        .collect();
    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

fn lp_to_lp(proto: Zpk, wo: f64) -> Zpk {
    let degree = proto.poles.len() - proto.zeros.len();
    Zpk {
        zeros: proto.zeros.iter().map(|z| *z * wo).collect(),
        poles: proto.poles.iter().map(|p| *p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

fn lp_to_hp(proto: Zpk, wo: f64) -> Zpk {
    let degree = proto.poles.len() - proto.zeros.len();
    let num: C64 = proto.zeros.iter().map(|z| -*z).product();
    let den: C64 = proto.poles.iter().map(|p| -*p).product();

    let mut zeros: Vec<C64> = proto.zeros.iter().map(|z| wo / *z).collect();
    zeros.extend(std::iter::repeat_n(C64::new(0.0, 0.0), degree));
    Zpk {
        zeros,
        poles: proto.poles.iter().map(|p| wo / *p).collect(),
        gain: proto.gain * (num / den).re,
    }
}

fn lp_to_bp(proto: Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.poles.len() - proto.zeros.len();
    let split = |r: &C64| -> [C64; 2] {
        let half = *r * (bw / 2.0);
        let disc = (half * half - wo * wo).sqrt();
        [half + disc, half - disc]
    };

    let mut zeros: Vec<C64> = proto.zeros.iter().flat_map(split).collect();
    zeros.extend(std::iter::repeat_n(C64::new(0.0, 0.0), degree));
    Zpk {
        zeros,
        poles: proto.poles.iter().flat_map(split).collect(),
        gain: proto.gain * bw.powi(degree as i32),
    }
}

fn bilinear(analog: Zpk, fs: f64) -> Zpk {
    let fs2 = C64::new(2.0 * fs, 0.0);
    let degree = analog.poles.len() - analog.zeros.len();
    let num: C64 = analog.zeros.iter().map(|z| fs2 - *z).product();
    let den: C64 = analog.poles.iter().map(|p| fs2 - *p).product();

    let mut zeros: Vec<C64> = analog.zeros.iter().map(|z| (fs2 + *z) / (fs2 - *z)).collect();
    zeros.extend(std::iter::repeat_n(C64::new(-1.0, 0.0), degree));
    Zpk {
        zeros,
        poles: analog.poles.iter().map(|p| (fs2 + *p) / (fs2 - *p)).collect(),
        gain: analog.gain * (num / den).re,
    }
}

/// Expands `prod(x - r)` into descending-power coefficients.
fn poly(roots: &[C64]) -> Vec<C64> {
    let mut coeffs = vec![C64::new(1.0, 0.0)];
    for r in roots {
        let mut next = coeffs.clone();
        next.push(C64::new(0.0, 0.0));
        for (i, c) in coeffs.iter().enumerate() {
            next[i + 1] -= *r * *c;
        }
        coeffs = next;
    }
    coeffs
}

fn zpk_to_tf(zpk: &Zpk) -> (Vec<f64>, Vec<f64>) {
    // Roots come in conjugate pairs, so imaginary parts are rounding noise.
    let b = poly(&zpk.zeros).iter().map(|c| zpk.gain * c.re).collect();
    let a = poly(&zpk.poles).iter().map(|c| c.re).collect();
    (b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_slices_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < tol, "index {i}: {a} vs {e}");
        }
    }

    #[test]
    fn prototype_poles_on_left_unit_semicircle() {
        let proto = butter_prototype(4);
        assert_eq!(proto.poles.len(), 4);
        for p in &proto.poles {
            assert_relative_eq!(p.norm(), 1.0, epsilon = 1e-12);
            assert!(p.re < 0.0);
        }
    }

    #[test]
    fn poly_expands_roots() {
        let c = poly(&[C64::new(1.0, 0.0), C64::new(2.0, 0.0)]);
        let re: Vec<f64> = c.iter().map(|c| c.re).collect();
        assert_eq!(re, vec![1.0, -3.0, 2.0]);
    }

    #[test]
    fn lowpass_order2_quarter_band() {
        // Reference values for a 2nd-order Butterworth at Wn = 0.5.
        let c = butterworth(BandType::Lowpass, 2, &[25.0], 100.0).unwrap();
        assert_slices_close(
            c.b(),
            &[0.29289321881345254, 0.5857864376269051, 0.29289321881345254],
            1e-12,
        );
        assert_slices_close(c.a(), &[1.0, 0.0, 0.17157287525380990], 1e-12);
    }

    #[test]
    fn highpass_order1() {
        // Reference values for a 1st-order Butterworth high-pass at Wn = 0.5.
        let c = butterworth(BandType::Highpass, 1, &[25.0], 100.0).unwrap();
        assert_slices_close(c.b(), &[0.5, -0.5], 1e-12);
        assert_slices_close(c.a(), &[1.0, 0.0], 1e-12);
    }

    #[test]
    fn lowpass_unity_dc_gain() {
        for order in 1..=8 {
            let c = butterworth(BandType::Lowpass, order, &[10.0], 250.0).unwrap();
            assert_relative_eq!(c.gain_at(0.0, 250.0), 1.0, epsilon = 1e-9);
            assert_relative_eq!(
                c.gain_at(10.0, 250.0),
                std::f64::consts::FRAC_1_SQRT_2,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn highpass_unity_nyquist_gain() {
        let c = butterworth(BandType::Highpass, 4, &[20.0], 200.0).unwrap();
        assert_relative_eq!(c.gain_at(100.0, 200.0), 1.0, epsilon = 1e-9);
        assert!(c.gain_at(0.0, 200.0) < 1e-9);
    }

    #[test]
    fn bandpass_doubles_order_and_passes_centre() {
        let c = butterworth(BandType::Bandpass, 3, &[8.0, 13.0], 100.0).unwrap();
        assert_eq!(c.order(), 6);
        assert_relative_eq!(c.gain_at(8.0, 100.0), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert_relative_eq!(c.gain_at(13.0, 100.0), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-9);
        assert!(c.gain_at(1.0, 100.0) < 0.01);
        assert!(c.gain_at(40.0, 100.0) < 0.01);
    }

    #[test]
    fn zero_order_rejected() {
        let err = butterworth(BandType::Lowpass, 0, &[10.0], 100.0).unwrap_err();
        assert_eq!(err, FilterError::InvalidOrder { order: 0 });
    }

    #[test]
    fn cutoff_at_or_above_nyquist_rejected() {
        for cutoff in [50.0, 60.0, 0.0, -1.0, f64::NAN] {
            let err = butterworth(BandType::Lowpass, 2, &[cutoff], 100.0).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidCutoff { .. }),
                "cutoff {cutoff}: {err:?}"
            );
        }
    }

    #[test]
    fn wrong_cutoff_count_rejected() {
        let err = butterworth(BandType::Bandpass, 2, &[10.0], 100.0).unwrap_err();
        assert!(matches!(err, FilterError::InvalidCutoff { .. }));
        let err = butterworth(BandType::Lowpass, 2, &[10.0, 20.0], 100.0).unwrap_err();
        assert!(matches!(err, FilterError::InvalidCutoff { .. }));
    }

    #[test]
    fn notch_zero_on_centre() {
        let c = notch(50.0, 1.0, 500.0).unwrap();
        assert!(c.gain_at(50.0, 500.0) < 1e-9);
        assert_relative_eq!(c.gain_at(0.0, 500.0), 1.0, epsilon = 1e-9);
        assert!(c.gain_at(150.0, 500.0) > 0.98);
    }

    #[test]
    fn notch_bandwidth_validated() {
        for bw in [0.0, -2.0, f64::INFINITY] {
            let err = notch(50.0, bw, 500.0).unwrap_err();
            assert!(matches!(err, FilterError::InvalidBandwidth { .. }), "{bw}");
        }
    }

    #[test]
    fn design_filter_dispatches() {
        let c = design_filter(&FilterSpec::notch(60.0), 1000.0).unwrap();
        assert_eq!(c.order(), 2);
        let c = design_filter(&FilterSpec::bandpass(5.0, 15.0).with_order(2), 100.0).unwrap();
        assert_eq!(c.order(), 4);
    }
}
