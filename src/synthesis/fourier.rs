//! Minimal 2D FFT helpers on row-major complex buffers.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// In-place forward 2D FFT (unnormalized, matching the numpy convention).
pub(crate) fn fft2_forward(data: &mut [Complex<f64>], width: usize, height: usize) {
    fft2(data, width, height, false);
}

/// In-place inverse 2D FFT, normalized by `1 / (width * height)`.
pub(crate) fn fft2_inverse(data: &mut [Complex<f64>], width: usize, height: usize) {
    fft2(data, width, height, true);
    let norm = 1.0 / (width * height) as f64;
    for v in data.iter_mut() {
        *v *= norm;
    }
}

fn fft2(data: &mut [Complex<f64>], width: usize, height: usize, inverse: bool) {
    assert_eq!(data.len(), width * height);
    let mut planner = FftPlanner::new();

    // Transform rows, then columns through a scratch buffer.
    let row_fft = if inverse {
        planner.plan_fft_inverse(width)
    } else {
        planner.plan_fft_forward(width)
    };
    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    let col_fft = if inverse {
        planner.plan_fft_inverse(height)
    } else {
        planner.plan_fft_forward(height)
    };
    let mut column = vec![Complex::new(0.0, 0.0); height];
    for x in 0..width {
        for y in 0..height {
            column[y] = data[y * width + x];
        }
        col_fft.process(&mut column);
        for y in 0..height {
            data[y * width + x] = column[y];
        }
    }
}

/// Frequency of bin `i` in a length-`n` transform, in cycles per sample
/// (the numpy `fftfreq` layout: non-negative bins first, then negative).
pub(crate) fn fft_freq(i: usize, n: usize) -> f64 {
    if i < (n + 1) / 2 {
        i as f64 / n as f64
    } else {
        (i as f64 - n as f64) / n as f64
    }
}
