//! Two-level separable Haar approximation.
//!
//! Rows are reduced with a pairwise kernel, then the columns of that result,
//! keeping only the approximation half each time. The coarse field is then
//! bilinearly upsampled back to the input resolution.
//!
//! Odd lengths: the trailing unpaired sample is dropped from the reduction.
//! A line of length 1 has no pair and passes through unchanged.

use ndarray::{Array2, Axis};

/// One level of the pairwise Haar kernel on a 1D signal.
///
/// For each pair `(a, b)` returns `approx = (a + b) / 2` and
/// `detail = (a - b) / 2`, so `a = approx + detail` and `b = approx - detail`.
/// The averaging normalization keeps the approximation in the input's value
/// range.
pub fn haar_pairs(signal: &[f32]) -> (Vec<f32>, Vec<f32>) {
    if signal.len() == 1 {
        return (signal.to_vec(), Vec::new());
    }
    signal
        .chunks_exact(2)
        .map(|pair| ((pair[0] + pair[1]) * 0.5, (pair[0] - pair[1]) * 0.5))
        .unzip()
}

/// Low-frequency approximation band at full resolution.
pub fn multires_approx(data: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    if h == 0 || w == 0 {
        return data.clone();
    }

    let rows_reduced = reduce_axis(data, Axis(1));
    let coarse = reduce_axis(&rows_reduced, Axis(0));

    let factor_y = if h == 1 { 1.0 } else { 2.0 };
    let factor_x = if w == 1 { 1.0 } else { 2.0 };
    upsample_bilinear(&coarse, (h, w), factor_y, factor_x)
}

/// Apply `haar_pairs` to every lane along `axis`, keeping the approximation.
fn reduce_axis(data: &Array2<f32>, axis: Axis) -> Array2<f32> {
    let len = data.len_of(axis);
    let reduced_len = if len == 1 { 1 } else { len / 2 };

    let mut shape = [data.nrows(), data.ncols()];
    shape[axis.index()] = reduced_len;
    let mut result = Array2::<f32>::zeros((shape[0], shape[1]));

    for (lane, mut out) in data.lanes(axis).into_iter().zip(result.lanes_mut(axis)) {
        let samples: Vec<f32> = lane.iter().copied().collect();
        let (approx, _detail) = haar_pairs(&samples);
        for (dst, src) in out.iter_mut().zip(approx) {
            *dst = src;
        }
    }

    result
}

/// Bilinear upsampling with half-pixel centres and clamped edges.
///
/// `factor_y` / `factor_x` give how many output samples one coarse sample
/// spans, so coarse samples stay centred on the pairs they summarize.
fn upsample_bilinear(
    coarse: &Array2<f32>,
    (out_h, out_w): (usize, usize),
    factor_y: f32,
    factor_x: f32,
) -> Array2<f32> {
    let (ch, cw) = coarse.dim();

    let row_taps: Vec<(usize, usize, f32)> =
        (0..out_h).map(|r| source_taps(r, factor_y, ch)).collect();
    let col_taps: Vec<(usize, usize, f32)> =
        (0..out_w).map(|c| source_taps(c, factor_x, cw)).collect();

    Array2::from_shape_fn((out_h, out_w), |(r, c)| {
        let (y0, y1, fy) = row_taps[r];
        let (x0, x1, fx) = col_taps[c];
        let top = coarse[[y0, x0]] * (1.0 - fx) + coarse[[y0, x1]] * fx;
        let bottom = coarse[[y1, x0]] * (1.0 - fx) + coarse[[y1, x1]] * fx;
        top * (1.0 - fy) + bottom * fy
    })
}

/// Two neighbouring source indices and the interpolation fraction.
fn source_taps(out_idx: usize, factor: f32, src_len: usize) -> (usize, usize, f32) {
    let max = (src_len - 1) as f32;
    let src = ((out_idx as f32 + 0.5) / factor - 0.5).clamp(0.0, max);
    let i0 = src.floor() as usize;
    let i1 = (i0 + 1).min(src_len - 1);
    (i0, i1, src - i0 as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haar_pairs_reconstruct_each_pair() {
        let signal = [3.0f32, 1.0, 10.0, 4.0];
        let (approx, detail) = haar_pairs(&signal);
        assert_eq!(approx, vec![2.0, 7.0]);
        assert_eq!(detail, vec![1.0, 3.0]);
        for (i, (a, d)) in approx.iter().zip(&detail).enumerate() {
            assert_eq!(a + d, signal[2 * i]);
            assert_eq!(a - d, signal[2 * i + 1]);
        }
    }

    #[test]
    fn haar_pairs_drops_trailing_odd_sample() {
        let (approx, detail) = haar_pairs(&[2.0, 4.0, 100.0]);
        assert_eq!(approx, vec![3.0]);
        assert_eq!(detail, vec![-1.0]);
    }

    #[test]
    fn haar_pairs_single_sample_passes_through() {
        let (approx, detail) = haar_pairs(&[5.0]);
        assert_eq!(approx, vec![5.0]);
        assert!(detail.is_empty());
    }

    #[test]
    fn reduce_axis_halves_requested_axis() {
        let data = Array2::from_shape_fn((4, 7), |(r, c)| (r * 7 + c) as f32);
        assert_eq!(reduce_axis(&data, Axis(1)).dim(), (4, 3));
        assert_eq!(reduce_axis(&data, Axis(0)).dim(), (2, 7));
    }

    #[test]
    fn source_taps_clamp_at_edges() {
        assert_eq!(source_taps(0, 2.0, 4), (0, 1, 0.0));
        let (i0, i1, f) = source_taps(7, 2.0, 4);
        assert_eq!((i0, i1), (3, 3));
        assert_eq!(f, 0.0);
    }
}
