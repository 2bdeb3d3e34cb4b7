//! Gaussian random field with a power-law power spectrum.
//!
//! White complex noise is drawn in frequency space, shaped by
//! `sqrt(amplitude * k^spectral_index)`, and inverse-transformed; the real
//! part is the field. Lower (more negative) spectral indices suppress
//! small-scale structure and yield smoother continents.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use rustfft::num_complex::Complex;
use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use crate::field::Field;
use crate::synthesis::fourier::{fft2_inverse, fft_freq};

/// Synthesize a spectral (Gaussian random) field.
///
/// The DC bin carries no contribution, so `k = 0` never reaches the
/// power law and the field has zero mean by construction.
pub fn spectral_field(
    width: usize,
    height: usize,
    seed: u64,
    amplitude: f64,
    spectral_index: f64,
) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = StandardNormal;

    let mut spectrum = vec![Complex::new(0.0, 0.0); width * height];
    for j in 0..height {
        for i in 0..width {
            // Spatial frequency magnitude; the unit cell has length 1/boxsize.
            let kx = fft_freq(i, width);
            let ky = fft_freq(j, height);
            let k = TAU * (kx * kx + ky * ky).sqrt();
            if k == 0.0 {
                continue;
            }
            let power = amplitude * k.powf(spectral_index);
            let re: f64 = normal.sample(&mut rng);
            let im: f64 = normal.sample(&mut rng);
            spectrum[j * width + i] = Complex::new(re, im) * (FRAC_1_SQRT_2 * power.sqrt());
        }
    }

    fft2_inverse(&mut spectrum, width, height);
    Field::from_vec(width, height, spectrum.iter().map(|c| c.re).collect())
}
