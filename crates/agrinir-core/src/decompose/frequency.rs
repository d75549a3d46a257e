use ndarray::Array2;
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::{AgrinirError, Result};

/// Keep only the spatial frequencies inside a disk around DC.
///
/// The disk radius is `floor(radius_ratio * min(h, w))` bins, measured in
/// the centred (zero-frequency-in-the-middle) spectrum. The inverse transform
/// is returned as its complex magnitude, so the output is non-negative.
///
/// `radius_ratio = 0` keeps the DC bin alone and yields a constant field equal
/// to the absolute mean; a radius covering the whole spectrum returns the
/// input (up to floating-point error) when the input is non-negative.
pub fn frequency_lowpass(data: &Array2<f32>, radius_ratio: f32) -> Result<Array2<f32>> {
    if !radius_ratio.is_finite() || radius_ratio < 0.0 {
        return Err(AgrinirError::InvalidConfig(format!(
            "radius ratio must be finite and >= 0, got {}",
            radius_ratio
        )));
    }

    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return Ok(data.clone());
    }

    let radius = (h.min(w) as f64 * radius_ratio as f64).floor();
    let radius_sq = radius * radius;

    let mut spectrum = fft2d(data);
    for row in 0..h {
        let dy = centered_offset(row, h) as f64;
        for col in 0..w {
            let dx = centered_offset(col, w) as f64;
            if dy * dy + dx * dx > radius_sq {
                spectrum[[row, col]] = Complex::new(0.0, 0.0);
            }
        }
    }

    let restored = ifft2d(&spectrum);
    Ok(restored.mapv(|c| c.norm() as f32))
}

/// Signed distance of FFT bin `k` from the zero-frequency bin once the
/// spectrum is shifted so that DC sits at index `n / 2`.
fn centered_offset(k: usize, n: usize) -> isize {
    if k < n - n / 2 {
        k as isize
    } else {
        k as isize - n as isize
    }
}

/// 2D FFT: row-wise FFT, then column-wise FFT.
fn fft2d(data: &Array2<f32>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let fft_row = planner.plan_fft_forward(w);
    let fft_col = planner.plan_fft_forward(h);

    let mut result = data.mapv(|v| Complex::new(v as f64, 0.0));

    let mut row_data = vec![Complex::new(0.0, 0.0); w];
    for row in 0..h {
        for col in 0..w {
            row_data[col] = result[[row, col]];
        }
        fft_row.process(&mut row_data);
        for col in 0..w {
            result[[row, col]] = row_data[col];
        }
    }

    let mut col_data = vec![Complex::new(0.0, 0.0); h];
    for col in 0..w {
        for row in 0..h {
            col_data[row] = result[[row, col]];
        }
        fft_col.process(&mut col_data);
        for row in 0..h {
            result[[row, col]] = col_data[row];
        }
    }

    result
}

/// Inverse 2D FFT, normalized by 1/(h*w). Keeps the complex result.
fn ifft2d(data: &Array2<Complex<f64>>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    let mut planner = FftPlanner::new();
    let ifft_row = planner.plan_fft_inverse(w);
    let ifft_col = planner.plan_fft_inverse(h);

    let mut work = data.clone();

    let mut col_data = vec![Complex::new(0.0, 0.0); h];
    for col in 0..w {
        for row in 0..h {
            col_data[row] = work[[row, col]];
        }
        ifft_col.process(&mut col_data);
        for row in 0..h {
            work[[row, col]] = col_data[row];
        }
    }

    let mut row_data = vec![Complex::new(0.0, 0.0); w];
    for row in 0..h {
        for col in 0..w {
            row_data[col] = work[[row, col]];
        }
        ifft_row.process(&mut row_data);
        for col in 0..w {
            work[[row, col]] = row_data[col];
        }
    }

    let scale = 1.0 / (h * w) as f64;
    work.mapv_inplace(|c| c * scale);
    work
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_offset_even_and_odd() {
        let even: Vec<isize> = (0..4).map(|k| centered_offset(k, 4)).collect();
        assert_eq!(even, vec![0, 1, -2, -1]);
        let odd: Vec<isize> = (0..5).map(|k| centered_offset(k, 5)).collect();
        assert_eq!(odd, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn fft_roundtrip_is_identity() {
        let data = Array2::from_shape_fn((6, 7), |(r, c)| (r * 7 + c) as f32);
        let back = ifft2d(&fft2d(&data));
        for (a, b) in data.iter().zip(back.iter()) {
            assert!((*a as f64 - b.re).abs() < 1e-9);
            assert!(b.im.abs() < 1e-9);
        }
    }
}
