//! Conversions from float fields to displayable bytes.

use ndarray::Array2;

/// Byte produced by a ratio of exactly zero.
pub const NEUTRAL_INDEX: u8 = 127;

/// Map a value from [-1, 1] to [0, 255].
///
/// Out-of-range values are clamped and the result truncated, so zero maps to
/// [`NEUTRAL_INDEX`]. NaN becomes 0.
#[inline]
pub fn unit_to_u8(v: f32) -> u8 {
    ((v + 1.0) * 127.5).clamp(0.0, 255.0) as u8
}

/// Rescale a signed ratio field from [-1, 1] to [0, 255].
pub fn signed_unit_to_u8(data: &Array2<f32>) -> Array2<u8> {
    data.mapv(unit_to_u8)
}

/// Min-max normalize to [0, 255]: `(x - min) / (max - min + eps) * 255`,
/// rounded to the nearest byte.
///
/// A constant field maps to 0 everywhere.
pub fn min_max_to_u8(data: &Array2<f32>, epsilon: f32) -> Array2<u8> {
    let (min, max) = min_max(data);
    let scale = 255.0 / (max - min + epsilon);
    data.mapv(|v| ((v - min) * scale).round().clamp(0.0, 255.0) as u8)
}

/// Smallest and largest finite values; (0, 0) when there are none.
pub fn min_max(data: &Array2<f32>) -> (f32, f32) {
    let (min, max) = data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_to_u8_endpoints() {
        assert_eq!(unit_to_u8(-1.0), 0);
        assert_eq!(unit_to_u8(0.0), NEUTRAL_INDEX);
        assert_eq!(unit_to_u8(1.0), 255);
        assert_eq!(unit_to_u8(-7.0), 0);
        assert_eq!(unit_to_u8(42.0), 255);
        assert_eq!(unit_to_u8(f32::NAN), 0);
    }

    #[test]
    fn min_max_ignores_non_finite() {
        let data = Array2::from_shape_vec((1, 4), vec![3.0, f32::NAN, -2.0, f32::INFINITY])
            .unwrap();
        assert_eq!(min_max(&data), (-2.0, 3.0));
    }

    #[test]
    fn min_max_to_u8_spans_full_range() {
        let data = Array2::from_shape_vec((1, 3), vec![10.0, 20.0, 30.0]).unwrap();
        let bytes = min_max_to_u8(&data, 1e-6);
        assert_eq!(bytes[[0, 0]], 0);
        assert_eq!(bytes[[0, 2]], 255);
        assert!((126..=128).contains(&bytes[[0, 1]]));
    }
}
