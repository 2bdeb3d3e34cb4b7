//! Terrain pipeline: raw noise in, elevation field out.
//!
//! Fixed stage order: synthesize -> normalize -> optional island mask ->
//! resample + smooth -> sea-level threshold. Every stage is a pure
//! function returning a new field, so each is independently testable and
//! the determinism of the whole chain follows from the determinism of the
//! synthesizer.

use crate::config::MapConfig;
use crate::error::GenError;
use crate::field::{ElevationField, Field};
use crate::synthesis;

/// Linearly rescale to [0, 1] using the field's own min/max.
///
/// A perfectly flat field has no meaningful rescaling; the explicit policy
/// is to return an all-zero field of the same dimensions.
pub fn normalize(field: &Field) -> Field {
    let (min, max) = field.min_max();
    if min == max {
        return Field::new(field.width, field.height);
    }
    let span = max - min;
    Field::from_fn_par(field.width, field.height, |x, y| {
        (field.get(x, y) - min) / span
    })
}

/// Multiply pointwise by a centered isotropic Gaussian mask, forcing the
/// grid boundary toward zero so the map edges are guaranteed sea.
///
/// `sigma` defaults to half the grid's linear size.
pub fn island_mask(field: &Field, sigma: Option<f64>) -> Field {
    let sigma = sigma.unwrap_or(field.width as f64 / 2.0);
    let cx = field.width as f64 / 2.0;
    let cy = field.height as f64 / 2.0;
    let denom = 2.0 * sigma * sigma;
    Field::from_fn_par(field.width, field.height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        field.get(x, y) * (-(dx * dx + dy * dy) / denom).exp()
    })
}

/// Bilinearly interpolate onto an output grid of the requested size.
pub fn resample(field: &Field, out_width: usize, out_height: usize) -> Field {
    let scale_x = if out_width > 1 {
        (field.width - 1) as f64 / (out_width - 1) as f64
    } else {
        0.0
    };
    let scale_y = if out_height > 1 {
        (field.height - 1) as f64 / (out_height - 1) as f64
    } else {
        0.0
    };
    Field::from_fn_par(out_width, out_height, |x, y| {
        field.sample_bilinear(x as f64 * scale_x, y as f64 * scale_y)
    })
}

/// Isotropic Gaussian blur with standard deviation `sigma`.
///
/// Separable convolution, kernel truncated at 4 sigma, borders reflected.
/// `sigma == 0` is the identity.
pub fn smooth(field: &Field, sigma: f64) -> Field {
    if sigma == 0.0 {
        return field.clone();
    }
    let radius = (4.0 * sigma + 0.5) as usize;
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    for k in -(radius as i64)..=(radius as i64) {
        kernel.push((-(k * k) as f64 / (2.0 * sigma * sigma)).exp());
    }
    let total: f64 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= total;
    }

    let reflect = |idx: i64, n: i64| -> usize {
        let mut i = idx;
        loop {
            if i < 0 {
                i = -i - 1;
            } else if i >= n {
                i = 2 * n - i - 1;
            } else {
                break;
            }
        }
        i as usize
    };

    // Horizontal pass, then vertical.
    let horizontal = Field::from_fn_par(field.width, field.height, |x, y| {
        let mut acc = 0.0;
        for (k, w) in kernel.iter().enumerate() {
            let sx = reflect(x as i64 + k as i64 - radius as i64, field.width as i64);
            acc += w * field.get(sx, y);
        }
        acc
    });
    Field::from_fn_par(field.width, field.height, |x, y| {
        let mut acc = 0.0;
        for (k, w) in kernel.iter().enumerate() {
            let sy = reflect(y as i64 + k as i64 - radius as i64, field.height as i64);
            acc += w * horizontal.get(x, sy);
        }
        acc
    })
}

/// Partition sea from mainland: cells below `threshold` become exactly 0,
/// cells at or above keep their value.
pub fn apply_sea_level(field: &Field, threshold: f64) -> Field {
    Field::from_fn_par(field.width, field.height, |x, y| {
        let v = field.get(x, y);
        if v < threshold {
            0.0
        } else {
            v
        }
    })
}

/// Run the full terrain pipeline for one seed.
pub fn build_elevation_field(config: &MapConfig, seed: u64) -> Result<ElevationField, GenError> {
    config.validate()?;

    let raw = synthesis::synthesize(&config.noise, seed, config.boxsize, config.boxsize)?;
    let mut field = normalize(&raw);
    if config.make_island {
        field = island_mask(&field, None);
    }
    let out = config.output_resolution();
    field = resample(&field, out, out);
    field = smooth(&field, config.sigma);
    field = apply_sea_level(&field, config.threshold);

    Ok(ElevationField::new(field, config.threshold))
}
