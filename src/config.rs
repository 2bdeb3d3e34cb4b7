use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Parameters shared by the layered (octave-summed) noise kinds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OctaveParams {
    /// Rescales grid coordinates into the noise function's native domain
    /// (larger = bigger land features).
    pub scale: f64,
    /// Number of summed noise layers.
    pub octaves: u32,
    /// Amplitude decay per octave (layer i contributes persistence^i).
    pub persistence: f64,
    /// Frequency growth per octave (layer i samples at lacunarity^i).
    pub lacunarity: f64,
}

impl OctaveParams {
    /// Reject parameter values the octave sum is undefined for: zero
    /// octaves make the normalization 0/0, a non-positive scale makes the
    /// sample coordinates non-finite.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.octaves == 0 {
            return Err(GenError::ZeroOctaves);
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(GenError::ScaleOutOfRange(self.scale));
        }
        Ok(())
    }
}

impl Default for OctaveParams {
    fn default() -> Self {
        Self {
            scale: 500.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// The active noise model and its parameters.
///
/// Exactly one variant is active per generation request; the enum makes
/// an unknown kind or a mismatched parameter record unrepresentable.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum NoiseSpec {
    /// Gaussian random field with power spectrum `amplitude * k^spectral_index`.
    /// More negative indices suppress small-scale structure.
    Spectral { amplitude: f64, spectral_index: f64 },
    /// Octave-summed gradient noise ("Perlin-like").
    Lattice(OctaveParams),
    /// Lattice noise evaluated at coordinates displaced by two auxiliary
    /// lattice fields. When `warp_amplitude` is `None` one is drawn
    /// uniformly from [0, 30) per synthesis call.
    WarpedLattice {
        lattice: OctaveParams,
        warp_amplitude: Option<f64>,
    },
    /// Superposition of randomly oriented cosine waves. Coarser than the
    /// lattice kinds; produces banded, wavy terrain.
    CosineSum(OctaveParams),
    /// Statistically self-similar surface via circulant embedding,
    /// controlled by the Hurst parameter (lower = rougher).
    FractionalBrownian { hurst: f64 },
}

impl NoiseSpec {
    /// Short name used in log output and file names.
    pub fn kind_name(&self) -> &'static str {
        match self {
            NoiseSpec::Spectral { .. } => "spectral",
            NoiseSpec::Lattice(_) => "lattice",
            NoiseSpec::WarpedLattice { .. } => "warped_lattice",
            NoiseSpec::CosineSum(_) => "cosine",
            NoiseSpec::FractionalBrownian { .. } => "fbm",
        }
    }

    /// Reject parameter values the synthesizers are undefined for, rather
    /// than letting a NaN field propagate through the pipeline.
    pub fn validate(&self) -> Result<(), GenError> {
        match *self {
            NoiseSpec::Spectral {
                amplitude,
                spectral_index,
            } => {
                if !(amplitude > 0.0 && amplitude.is_finite()) {
                    return Err(GenError::AmplitudeOutOfRange(amplitude));
                }
                if !spectral_index.is_finite() {
                    return Err(GenError::SpectralIndexNotFinite(spectral_index));
                }
            }
            NoiseSpec::Lattice(params) | NoiseSpec::CosineSum(params) => params.validate()?,
            NoiseSpec::WarpedLattice { lattice, .. } => lattice.validate()?,
            NoiseSpec::FractionalBrownian { hurst } => {
                if !(hurst > 0.0 && hurst < 1.0) {
                    return Err(GenError::HurstOutOfRange(hurst));
                }
            }
        }
        Ok(())
    }
}

/// Full configuration for one map generation request.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Active noise model.
    pub noise: NoiseSpec,
    /// Side length of the synthesis grid, in cells.
    pub boxsize: usize,
    /// Standard deviation of the Gaussian smoothing applied after resampling.
    pub sigma: f64,
    /// Sea level: cells below this (after normalization) become sea.
    pub threshold: f64,
    /// Multiply by a centered Gaussian mask so the map edges are sea.
    pub make_island: bool,
    /// Side length of the resampled output grid. Defaults to `2 * boxsize`,
    /// the classic high-resolution grid.
    pub output_size: Option<usize>,
}

impl MapConfig {
    pub fn new(noise: NoiseSpec, boxsize: usize) -> Self {
        Self {
            noise,
            boxsize,
            sigma: 5.0,
            threshold: 0.6,
            make_island: false,
            output_size: None,
        }
    }

    /// The resolved output grid side length.
    pub fn output_resolution(&self) -> usize {
        self.output_size.unwrap_or(2 * self.boxsize)
    }

    /// Check every parameter the pipeline depends on.
    pub fn validate(&self) -> Result<(), GenError> {
        self.noise.validate()?;
        if self.boxsize == 0 || self.output_resolution() == 0 {
            return Err(GenError::EmptyGrid {
                width: self.boxsize,
                height: self.boxsize,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(GenError::ThresholdOutOfRange(self.threshold));
        }
        if self.sigma < 0.0 || !self.sigma.is_finite() {
            return Err(GenError::NegativeSigma(self.sigma));
        }
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(
            NoiseSpec::Spectral {
                amplitude: 1.0,
                spectral_index: -3.0,
            },
            500,
        )
    }
}
