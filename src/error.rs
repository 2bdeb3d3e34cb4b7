use thiserror::Error;

/// Errors reported by the generation core.
///
/// All failures are immediate; there is nothing to retry and no silent
/// fallback field for a bad configuration.
#[derive(Debug, Error, PartialEq)]
pub enum GenError {
    /// The Hurst parameter of a fractional Brownian surface must lie in
    /// the open interval (0, 1).
    #[error("Hurst parameter must lie in (0, 1), got {0}")]
    HurstOutOfRange(f64),

    /// Sea-level threshold is a probability-like value.
    #[error("sea-level threshold must lie in [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// Smoothing strength cannot be negative.
    #[error("smoothing sigma must be non-negative, got {0}")]
    NegativeSigma(f64),

    /// Layered noise needs at least one octave; an empty octave sum is
    /// 0/0.
    #[error("octave count must be at least 1")]
    ZeroOctaves,

    /// The coordinate scale divides sample coordinates.
    #[error("coordinate scale must be positive and finite, got {0}")]
    ScaleOutOfRange(f64),

    /// The power spectrum is only defined for positive amplitude.
    #[error("spectral amplitude must be positive and finite, got {0}")]
    AmplitudeOutOfRange(f64),

    /// A non-finite spectral index poisons every frequency bin.
    #[error("spectral index must be finite, got {0}")]
    SpectralIndexNotFinite(f64),

    /// Zero-sized grids are rejected up front.
    #[error("field dimensions must be non-zero, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
}
