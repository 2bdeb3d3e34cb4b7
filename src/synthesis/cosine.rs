//! Cosine-superposition noise.
//!
//! Sums `octaves` randomly oriented plane waves with persistence-decayed
//! amplitudes and lacunarity-grown frequencies. A coarser approximation
//! than the lattice kinds; terrain comes out banded and wavy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;

use crate::config::OctaveParams;
use crate::field::Field;

/// Base spatial frequency of the first octave, in cycles per scale unit.
const BASE_FREQUENCY: f64 = 5.0;

pub fn cosine_field(width: usize, height: usize, seed: u64, params: &OctaveParams) -> Field {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut field = Field::new(width, height);

    for octave in 0..params.octaves {
        let amplitude: f64 = rng.gen();
        let freq_x = TAU * BASE_FREQUENCY * rng.gen_range(-1.0..1.0);
        let freq_y = TAU * BASE_FREQUENCY * rng.gen_range(-1.0..1.0);
        let phase = TAU * rng.gen::<f64>();

        let decay = params.persistence.powi(octave as i32);
        let growth = params.lacunarity.powi(octave as i32);

        for y in 0..height {
            for x in 0..width {
                let wave = amplitude
                    * (freq_x * growth * (x as f64 / params.scale)
                        + freq_y * growth * (y as f64 / params.scale)
                        + phase)
                        .cos();
                field.set(x, y, field.get(x, y) + decay * wave);
            }
        }
    }

    field
}
