//! Noise field synthesizers.
//!
//! Five interchangeable strategies produce an unnormalized scalar grid from
//! a seed and kind-specific parameters:
//! - `Spectral`: Gaussian random field with a power-law power spectrum
//! - `Lattice`: octave-summed gradient noise
//! - `WarpedLattice`: lattice noise with domain warping
//! - `CosineSum`: superposition of random cosine waves
//! - `FractionalBrownian`: self-similar surface via circulant embedding
//!
//! Every synthesizer owns a `ChaCha8Rng` seeded from the call's seed; no
//! process-wide random state is touched, so calls are independent and safe
//! to run concurrently.

pub mod brownian;
pub mod cosine;
mod fourier;
pub mod lattice;
pub mod spectral;

use crate::config::NoiseSpec;
use crate::error::GenError;
use crate::field::Field;

/// Synthesize a raw `width x height` noise field.
///
/// Pure given its inputs: the same (spec, seed, dimensions) always yields
/// the same field. The fractional Brownian surface is intrinsically
/// square; for rectangular requests it is synthesized at the larger side
/// and cropped.
pub fn synthesize(
    spec: &NoiseSpec,
    seed: u64,
    width: usize,
    height: usize,
) -> Result<Field, GenError> {
    if width == 0 || height == 0 {
        return Err(GenError::EmptyGrid { width, height });
    }
    spec.validate()?;
    match spec {
        NoiseSpec::Spectral {
            amplitude,
            spectral_index,
        } => Ok(spectral::spectral_field(
            width,
            height,
            seed,
            *amplitude,
            *spectral_index,
        )),
        NoiseSpec::Lattice(params) => Ok(lattice::lattice_field(width, height, seed, params)),
        NoiseSpec::WarpedLattice {
            lattice: params,
            warp_amplitude,
        } => Ok(lattice::warped_lattice_field(
            width,
            height,
            seed,
            params,
            *warp_amplitude,
        )),
        NoiseSpec::CosineSum(params) => Ok(cosine::cosine_field(width, height, seed, params)),
        NoiseSpec::FractionalBrownian { hurst } => {
            let side = width.max(height);
            let square = brownian::brownian_surface(side, seed, *hurst)?;
            if width == height {
                return Ok(square);
            }
            let mut data = Vec::with_capacity(width * height);
            for y in 0..height {
                for x in 0..width {
                    data.push(square.get(x, y));
                }
            }
            Ok(Field::from_vec(width, height, data))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OctaveParams;

    #[test]
    fn test_rejects_empty_grid() {
        let spec = NoiseSpec::Lattice(OctaveParams::default());
        assert!(matches!(
            synthesize(&spec, 0, 0, 10),
            Err(GenError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn test_every_kind_produces_requested_dimensions() {
        let specs = [
            NoiseSpec::Spectral {
                amplitude: 1.0,
                spectral_index: -3.0,
            },
            NoiseSpec::Lattice(OctaveParams::default()),
            NoiseSpec::WarpedLattice {
                lattice: OctaveParams::default(),
                warp_amplitude: Some(10.0),
            },
            NoiseSpec::CosineSum(OctaveParams::default()),
            NoiseSpec::FractionalBrownian { hurst: 0.5 },
        ];
        for spec in &specs {
            let field = synthesize(spec, 0, 24, 24).expect("synthesis failed");
            assert_eq!(field.width, 24, "kind {}", spec.kind_name());
            assert_eq!(field.height, 24, "kind {}", spec.kind_name());
        }
    }

    #[test]
    fn test_brownian_rectangular_crop() {
        let spec = NoiseSpec::FractionalBrownian { hurst: 0.5 };
        let field = synthesize(&spec, 0, 20, 12).unwrap();
        assert_eq!(field.width, 20);
        assert_eq!(field.height, 12);
        // Crop of the square synthesis at the same seed
        let square = synthesize(&spec, 0, 20, 20).unwrap();
        assert_eq!(field.get(5, 5), square.get(5, 5));
    }

    #[test]
    fn test_rejects_undefined_parameters_at_boundary() {
        // Misconfigurations fail here, never as a silent NaN field.
        let zero_octaves = NoiseSpec::Lattice(OctaveParams {
            octaves: 0,
            ..OctaveParams::default()
        });
        assert_eq!(
            synthesize(&zero_octaves, 0, 8, 8).unwrap_err(),
            GenError::ZeroOctaves
        );

        let negative_amplitude = NoiseSpec::Spectral {
            amplitude: -1.0,
            spectral_index: -3.0,
        };
        assert!(matches!(
            synthesize(&negative_amplitude, 0, 8, 8).unwrap_err(),
            GenError::AmplitudeOutOfRange(_)
        ));
    }

    #[test]
    fn test_synthesized_fields_are_finite() {
        let specs = [
            NoiseSpec::Spectral {
                amplitude: 1.0,
                spectral_index: -3.0,
            },
            NoiseSpec::Lattice(OctaveParams::default()),
            NoiseSpec::WarpedLattice {
                lattice: OctaveParams::default(),
                warp_amplitude: None,
            },
            NoiseSpec::CosineSum(OctaveParams::default()),
            NoiseSpec::FractionalBrownian { hurst: 0.5 },
        ];
        for spec in &specs {
            let field = synthesize(spec, 1, 24, 24).unwrap();
            assert!(
                field.values().iter().all(|v| v.is_finite()),
                "non-finite values from {}",
                spec.kind_name()
            );
        }
    }

    #[test]
    fn test_invalid_hurst_propagates() {
        let spec = NoiseSpec::FractionalBrownian { hurst: 2.0 };
        assert_eq!(
            synthesize(&spec, 0, 8, 8).unwrap_err(),
            GenError::HurstOutOfRange(2.0)
        );
    }
}
