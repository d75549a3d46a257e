use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{MAX_MEDIAN_WINDOW, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{AgrinirError, Result};

/// Square median filter with replicated borders.
///
/// `window` must be odd and at most [`MAX_MEDIAN_WINDOW`]; 1 returns a copy.
/// Parallelizes at the row level for large images.
pub fn median_filter(data: &Array2<u8>, window: usize) -> Result<Array2<u8>> {
    validate_window(window)?;
    if window == 1 {
        return Ok(data.clone());
    }

    let (h, w) = data.dim();
    let radius = window / 2;
    let taps = window.checked_mul(window).ok_or_else(|| {
        AgrinirError::InvalidConfig(format!("median window {} is too large", window))
    })?;

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<u8>> = (0..h)
            .into_par_iter()
            .map(|row| {
                let mut values = Vec::with_capacity(taps);
                (0..w)
                    .map(|col| window_median(data, row, col, radius, &mut values))
                    .collect()
            })
            .collect();

        let mut result = Array2::<u8>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        Ok(result)
    } else {
        let mut result = Array2::<u8>::zeros((h, w));
        let mut values = Vec::with_capacity(taps);
        for row in 0..h {
            for col in 0..w {
                result[[row, col]] = window_median(data, row, col, radius, &mut values);
            }
        }
        Ok(result)
    }
}

/// Odd, at least 1 and no larger than [`MAX_MEDIAN_WINDOW`].
pub fn validate_window(window: usize) -> Result<()> {
    if window == 0 || window % 2 == 0 {
        return Err(AgrinirError::InvalidConfig(format!(
            "median window must be odd and >= 1, got {}",
            window
        )));
    }
    if window > MAX_MEDIAN_WINDOW {
        return Err(AgrinirError::InvalidConfig(format!(
            "median window must be <= {}, got {}",
            MAX_MEDIAN_WINDOW, window
        )));
    }
    Ok(())
}

fn window_median(
    data: &Array2<u8>,
    row: usize,
    col: usize,
    radius: usize,
    values: &mut Vec<u8>,
) -> u8 {
    let (h, w) = data.dim();
    values.clear();
    for dr in -(radius as isize)..=radius as isize {
        let r = (row as isize + dr).clamp(0, h as isize - 1) as usize;
        for dc in -(radius as isize)..=radius as isize {
            let c = (col as isize + dc).clamp(0, w as isize - 1) as usize;
            values.push(data[[r, c]]);
        }
    }
    // Odd window, so the count is odd and the middle element is the median.
    let mid = values.len() / 2;
    *values.select_nth_unstable(mid).1
}
