//! Fractional Brownian surface via circulant embedding.
//!
//! Samples a stationary Gaussian random field with the fractional Brownian
//! covariance exactly, by embedding the covariance into a block-circulant
//! matrix that a 2D Fourier transform diagonalizes. The Hurst parameter H
//! controls roughness: lower H is noisier, higher H is smoother.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::num_complex::Complex;

use crate::error::GenError;
use crate::field::Field;
use crate::synthesis::fourier::fft2_forward;

/// Domain extension factor of the embedding: the covariance lives on
/// [0,R]^2 and only the [0,R/2]^2 quadrant is extracted.
const R: f64 = 2.0;

/// Coefficients of the piecewise covariance function, solved so the
/// function and its first two derivatives are continuous at r = 1.
struct CovCoeffs {
    beta: f64,
    c2: f64,
    c0: f64,
}

impl CovCoeffs {
    fn for_alpha(alpha: f64) -> Self {
        if alpha <= 1.5 {
            Self {
                beta: 0.0,
                c2: alpha / 2.0,
                c0: 1.0 - alpha / 2.0,
            }
        } else {
            let beta = alpha * (2.0 - alpha) / (3.0 * R * (R * R - 1.0));
            let c2 = (alpha - beta * (R - 1.0).powi(2) * (R + 2.0)) / 2.0;
            Self {
                beta,
                c2,
                c0: beta * (R - 1.0).powi(3) + 1.0 - c2,
            }
        }
    }

    /// Isotropic covariance at lattice distance `r`: a power-law core for
    /// r <= 1, a cubic-decay blend out to R, zero beyond.
    fn rho(&self, r: f64, alpha: f64) -> f64 {
        if r <= 1.0 {
            self.c0 - r.powf(alpha) + self.c2 * r * r
        } else if r <= R {
            self.beta * (R - r).powi(3) / r
        } else {
            0.0
        }
    }
}

/// Synthesize a `size x size` fractional Brownian surface.
///
/// Rejects `hurst` outside the open interval (0, 1); the covariance is
/// undefined there.
pub fn brownian_surface(size: usize, seed: u64, hurst: f64) -> Result<Field, GenError> {
    if !(hurst > 0.0 && hurst < 1.0) {
        return Err(GenError::HurstOutOfRange(hurst));
    }
    if size == 0 {
        return Err(GenError::EmptyGrid { width: 0, height: 0 });
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = StandardNormal;

    let alpha = 2.0 * hurst;
    let coeffs = CovCoeffs::for_alpha(alpha);

    // Embedding grid: [0,R] sampled at n points per axis, so the extracted
    // quadrant has side n/2 = size.
    let n = 2 * size;
    let ts: Vec<f64> = (0..n).map(|i| R * i as f64 / (n - 1) as f64).collect();

    // Covariance of every lattice point against the origin.
    let mut rows = vec![0.0; n * n];
    for j in 0..n {
        for i in 0..n {
            let r = (ts[i] * ts[i] + ts[j] * ts[j]).sqrt();
            rows[j * n + i] = coeffs.rho(r, alpha);
        }
    }

    // Tile into the doubled block-circulant matrix, mirrored about both axes.
    let m = 2 * n - 2;
    let mirror = |idx: usize| if idx < n { idx } else { 2 * n - 1 - idx };
    let mut circ = vec![Complex::new(0.0, 0.0); m * m];
    for j in 0..m {
        for i in 0..m {
            circ[j * m + i].re = rows[mirror(j) * n + mirror(i)];
        }
    }

    // Diagonalize; the eigenvalues are the (real) transform coefficients.
    // The embedding is only guaranteed positive-semidefinite for suitable
    // H and R, so numerical negatives are clipped before the square root.
    fft2_forward(&mut circ, m, m);
    let denom = 4.0 * ((n - 1) * (n - 1)) as f64;
    let lam: Vec<f64> = circ
        .iter()
        .map(|c| (c.re / denom).max(0.0).sqrt())
        .collect();

    // Correlated surface: sqrt-eigenvalues times complex Gaussian white
    // noise, transformed back to the spatial domain.
    let mut z: Vec<Complex<f64>> = lam
        .iter()
        .map(|&l| {
            let re: f64 = normal.sample(&mut rng);
            let im: f64 = normal.sample(&mut rng);
            Complex::new(re, im) * l
        })
        .collect();
    fft2_forward(&mut z, m, m);

    // Boundary correction: an outer product of random linear ramps along
    // each axis restores the c2*r^2 covariance term lost at the edges.
    let ramp_x: f64 = normal.sample(&mut rng);
    let ramp_y: f64 = normal.sample(&mut rng);
    let ramp_scale = (2.0 * coeffs.c2).sqrt();

    let mut data = vec![0.0; size * size];
    for j in 0..size {
        for i in 0..size {
            let correction = ts[j] * ramp_y * ts[i] * ramp_x * ramp_scale;
            data[j * size + i] = z[j * m + i].re + correction;
        }
    }

    Ok(Field::from_vec(size, size, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_hurst() {
        assert_eq!(
            brownian_surface(16, 0, 0.0).unwrap_err(),
            GenError::HurstOutOfRange(0.0)
        );
        assert_eq!(
            brownian_surface(16, 0, 1.0).unwrap_err(),
            GenError::HurstOutOfRange(1.0)
        );
        assert!(brownian_surface(16, 0, 1.5).is_err());
        assert!(brownian_surface(16, 0, -0.2).is_err());
    }

    #[test]
    fn test_dimensions_for_valid_hurst() {
        for hurst in [0.2, 0.5, 0.8] {
            let field = brownian_surface(20, 0, hurst).unwrap();
            assert_eq!(field.width, 20);
            assert_eq!(field.height, 20);
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let a = brownian_surface(16, 42, 0.7).unwrap();
        let b = brownian_surface(16, 42, 0.7).unwrap();
        assert_eq!(a.values(), b.values());

        let c = brownian_surface(16, 43, 0.7).unwrap();
        assert_ne!(a.values(), c.values());
    }

    #[test]
    fn test_surface_has_structure() {
        let field = brownian_surface(32, 1, 0.5).unwrap();
        let (min, max) = field.min_max();
        assert!(max > min);
        assert!(field.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_coefficients_continuous_at_one() {
        // Both regimes of the piecewise covariance must agree at r = 1.
        for alpha in [0.4, 1.0, 1.5, 1.6, 1.9] {
            let coeffs = CovCoeffs::for_alpha(alpha);
            let inner = coeffs.c0 - 1.0 + coeffs.c2;
            let outer = coeffs.beta * (R - 1.0).powi(3);
            assert!(
                (inner - outer).abs() < 1e-12,
                "discontinuity at alpha = {}",
                alpha
            );
        }
    }
}
