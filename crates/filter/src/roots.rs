//! Polynomial root finding for the stability check.
//!
//! Uses Aberth-Ehrlich simultaneous iteration, which converges cubically for
//! simple roots and needs nothing beyond complex arithmetic.

use num_complex::Complex;
use std::f64::consts::PI;

const MAX_ITER: usize = 500;
const TOL: f64 = 1e-14;

/// Returns all complex roots of `coeffs[0] * z^n + coeffs[1] * z^(n-1) + ... + coeffs[n]`.
///
/// Leading zeros are ignored; trailing zeros contribute roots at the origin.
/// Returns an empty vector for a constant (or all-zero) polynomial.
pub fn poly_roots(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let Some(first) = coeffs.iter().position(|&c| c != 0.0) else {
        return Vec::new();
    };
    let trimmed = &coeffs[first..];
    let at_origin = trimmed.iter().rev().take_while(|&&c| c == 0.0).count();
    let trimmed = &trimmed[..trimmed.len() - at_origin];

    let mut roots = vec![Complex::new(0.0, 0.0); at_origin];
    if trimmed.len() < 2 {
        return roots;
    }

    let lead = trimmed[0];
    let monic: Vec<Complex<f64>> = trimmed
        .iter()
        .map(|&c| Complex::new(c / lead, 0.0))
        .collect();
    roots.extend(aberth(&monic));
    roots
}

/// Largest root magnitude of `coeffs`, or 0.0 when there are no roots.
pub fn max_root_magnitude(coeffs: &[f64]) -> f64 {
    poly_roots(coeffs)
        .iter()
        .map(|r| r.norm())
        .fold(0.0, f64::max)
}

/// Evaluates a monic polynomial and its derivative at `z` (Horner).
fn horner(coeffs: &[Complex<f64>], z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let mut p = coeffs[0];
    let mut dp = Complex::new(0.0, 0.0);
    for &c in &coeffs[1..] {
        dp = dp * z + p;
        p = p * z + c;
    }
    (p, dp)
}

fn aberth(monic: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let degree = monic.len() - 1;
    // Geometric mean of the root magnitudes; the constant term is non-zero here.
    let radius = monic[degree].norm().powf(1.0 / degree as f64);
    let mut z: Vec<Complex<f64>> = (0..degree)
        .map(|k| Complex::from_polar(radius, 2.0 * PI * k as f64 / degree as f64 + 0.4))
        .collect();

    for _ in 0..MAX_ITER {
        let mut converged = true;
        for i in 0..degree {
            let (p, dp) = horner(monic, z[i]);
            if p.norm() == 0.0 {
                continue;
            }
            let ratio = p / dp;
            let repulsion: Complex<f64> = (0..degree)
                .filter(|&j| j != i)
                .map(|j| (z[i] - z[j]).inv())
                .sum();
            let step = ratio / (Complex::new(1.0, 0.0) - ratio * repulsion);
            if !step.is_finite() {
                // Stationary point or collision: nudge off it and keep going.
                z[i] *= Complex::new(1.0 + 1e-6, 1e-6);
                converged = false;
                continue;
            }
            z[i] -= step;
            if step.norm() > TOL * (1.0 + z[i].norm()) {
                converged = false;
            }
        }
        if converged {
            break;
        }
    }
    z
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_by_re_im(mut roots: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
        roots.sort_by(|a, b| {
            a.re.partial_cmp(&b.re)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.im.partial_cmp(&b.im).unwrap_or(std::cmp::Ordering::Equal))
        });
        roots
    }

    fn assert_close(a: Complex<f64>, b: Complex<f64>, tol: f64) {
        assert!((a - b).norm() < tol, "{a} != {b}");
    }

    #[test]
    fn linear() {
        let r = poly_roots(&[2.0, -1.0]);
        assert_eq!(r.len(), 1);
        assert_close(r[0], Complex::new(0.5, 0.0), 1e-12);
    }

    #[test]
    fn quadratic_real_roots() {
        // (z - 1)(z - 3) = z^2 - 4z + 3
        let r = sorted_by_re_im(poly_roots(&[1.0, -4.0, 3.0]));
        assert_close(r[0], Complex::new(1.0, 0.0), 1e-10);
        assert_close(r[1], Complex::new(3.0, 0.0), 1e-10);
    }

    #[test]
    fn quadratic_complex_roots() {
        // z^2 + 1
        let r = sorted_by_re_im(poly_roots(&[1.0, 0.0, 1.0]));
        assert_close(r[0], Complex::new(0.0, -1.0), 1e-10);
        assert_close(r[1], Complex::new(0.0, 1.0), 1e-10);
    }

    #[test]
    fn leading_and_trailing_zeros() {
        // 0*z^3 + z^2 - z + 0 -> roots {0, 1}
        let r = sorted_by_re_im(poly_roots(&[0.0, 1.0, -1.0, 0.0]));
        assert_eq!(r.len(), 2);
        assert_close(r[0], Complex::new(0.0, 0.0), 1e-12);
        assert_close(r[1], Complex::new(1.0, 0.0), 1e-10);
    }

    #[test]
    fn constant_has_no_roots() {
        assert!(poly_roots(&[5.0]).is_empty());
        assert!(poly_roots(&[0.0, 0.0]).is_empty());
        assert!(poly_roots(&[]).is_empty());
    }

    #[test]
    fn residuals_vanish_for_degree_eight() {
        let coeffs = [1.0, -0.5, 0.3, 0.2, -0.1, 0.05, 0.01, -0.02, 0.003];
        let roots = poly_roots(&coeffs);
        assert_eq!(roots.len(), 8);
        let monic: Vec<Complex<f64>> = coeffs.iter().map(|&c| Complex::new(c, 0.0)).collect();
        for r in roots {
            let (p, _) = horner(&monic, r);
            assert!(p.norm() < 1e-10, "p({r}) = {p}");
        }
    }

    #[test]
    fn clustered_roots_near_unit_circle() {
        // (z - 0.99)(z - 0.98)(z - 0.97)
        let coeffs = [1.0, -2.94, 2.8811, -0.941094];
        assert!((max_root_magnitude(&coeffs) - 0.99).abs() < 1e-6);
    }

    #[test]
    fn max_magnitude_of_unstable() {
        // (z - 1.5)(z + 0.2)
        let coeffs = [1.0, -1.3, -0.3];
        assert!((max_root_magnitude(&coeffs) - 1.5).abs() < 1e-10);
        assert_eq!(max_root_magnitude(&[1.0]), 0.0);
    }
}
