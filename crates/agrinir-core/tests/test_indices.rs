mod common;

use ndarray::Array2;

use agrinir_core::config::FusionWeights;
use agrinir_core::consts::DEFAULT_EPSILON;
use agrinir_core::error::AgrinirError;
use agrinir_core::estimate_nir;
use agrinir_core::indices::{exg, exg_raw, ndvi, ndvi_array, ndvi_ratio, vari, vari_ratio};
use agrinir_core::normalize::NEUTRAL_INDEX;

const EPS: f32 = DEFAULT_EPSILON;

#[test]
fn test_all_zero_frame_is_neutral() {
    let frame = common::uniform_frame(12, 16, [0, 0, 0]);
    let estimate = estimate_nir(&frame, 0.08, FusionWeights::default()).unwrap();

    let ndvi_map = ndvi(&estimate.fused, &frame, EPS).unwrap();
    let vari_map = vari(&frame, EPS);
    let exg_map = exg(&frame, EPS);

    assert!(ndvi_map.iter().all(|&v| v == NEUTRAL_INDEX));
    assert!(vari_map.iter().all(|&v| v == NEUTRAL_INDEX));
    // Min-max of a constant field collapses to the bottom of the range.
    assert!(exg_map.iter().all(|&v| v == 0));
}

#[test]
fn test_gray_frame_vari_is_flat_midpoint() {
    let frame = common::uniform_frame(10, 10, [128, 128, 128]);
    let vari_map = vari(&frame, EPS);
    assert!(vari_map.iter().all(|&v| v == NEUTRAL_INDEX));
}

#[test]
fn test_ndvi_extremes() {
    let nir = Array2::from_shape_vec((1, 3), vec![200.0f32, 0.0, 50.0]).unwrap();
    let red = Array2::from_shape_vec((1, 3), vec![0.0f32, 200.0, 50.0]).unwrap();
    let map = ndvi_array(&nir, &red, EPS).unwrap();
    assert_eq!(map[[0, 0]], 255);
    assert_eq!(map[[0, 1]], 0);
    assert_eq!(map[[0, 2]], NEUTRAL_INDEX);
}

#[test]
fn test_ndvi_ratio_range() {
    let nir = Array2::from_shape_fn((8, 8), |(r, c)| (r * 30) as f32 + c as f32);
    let red = Array2::from_shape_fn((8, 8), |(r, c)| (c * 30) as f32 + r as f32);
    let ratio = ndvi_ratio(&nir, &red, EPS).unwrap();
    assert!(ratio.iter().all(|&v| (-1.0..=1.0).contains(&v)));
}

#[test]
fn test_ndvi_negative_nir_stays_in_range() {
    // Edge-residual components can push the estimate below zero.
    let nir = Array2::from_shape_vec((1, 3), vec![-300.0f32, -0.5, 1e9]).unwrap();
    let red = Array2::from_shape_vec((1, 3), vec![10.0f32, 0.5, 0.0]).unwrap();
    let map = ndvi_array(&nir, &red, EPS).unwrap();
    assert_eq!(map.dim(), (1, 3));
    assert_eq!(map[[0, 2]], 255);
}

#[test]
fn test_ndvi_shape_mismatch() {
    let frame = common::uniform_frame(4, 5, [1, 2, 3]);
    let nir = Array2::<f32>::zeros((5, 4));
    let err = ndvi(&nir, &frame, EPS).unwrap_err();
    match err {
        AgrinirError::ShapeMismatch { expected, actual, .. } => {
            assert_eq!(expected, "(4, 5)");
            assert_eq!(actual, "(5, 4)");
        }
        other => panic!("expected ShapeMismatch, got {other:?}"),
    }
}

#[test]
fn test_vari_green_vegetation_above_midpoint() {
    let frame = common::uniform_frame(4, 4, [40, 180, 60]);
    // (180 - 60) / (180 + 60 - 40) = 0.6
    let ratio = vari_ratio(&frame, EPS);
    assert!(ratio.iter().all(|&v| (v - 0.6).abs() < 1e-5));
    let map = vari(&frame, EPS);
    // (0.6 + 1) * 127.5 = 204
    assert!(map.iter().all(|&v| v == 204));
}

#[test]
fn test_vari_zero_denominator_is_finite() {
    // g + r - b == 0
    let frame = common::uniform_frame(3, 3, [100, 50, 50]);
    let ratio = vari_ratio(&frame, EPS);
    assert!(ratio.iter().all(|v| v.is_finite()));
    let map = vari(&frame, EPS);
    assert!(map.iter().all(|&v| v == NEUTRAL_INDEX));

    // g + r - b == 0 with g != r: the ratio is driven by epsilon alone.
    let greener = common::uniform_frame(3, 3, [100, 60, 40]);
    let ratio = vari_ratio(&greener, EPS);
    assert!(ratio.iter().all(|v| v.is_finite() && *v > 1.0));
    assert!(vari(&greener, EPS).iter().all(|&v| v == 255));

    let redder = common::uniform_frame(3, 3, [100, 40, 60]);
    let ratio = vari_ratio(&redder, EPS);
    assert!(ratio.iter().all(|v| v.is_finite() && *v < -1.0));
    assert!(vari(&redder, EPS).iter().all(|&v| v == 0));
}

#[test]
fn test_exg_spans_full_range() {
    let frame = common::random_frame(32, 32, 17);
    let map = exg(&frame, EPS);
    assert_eq!(map.iter().copied().min(), Some(0));
    assert_eq!(map.iter().copied().max(), Some(255));
}

#[test]
fn test_exg_raw_formula() {
    let frame = common::uniform_frame(2, 2, [10, 100, 30]);
    let raw = exg_raw(&frame);
    assert!(raw.iter().all(|&v| v == 160.0));
}

#[test]
fn test_indices_random_frame_shapes() {
    let frame = common::random_frame(24, 18, 8);
    let estimate = estimate_nir(&frame, 0.08, FusionWeights::default()).unwrap();
    assert_eq!(ndvi(&estimate.fused, &frame, EPS).unwrap().dim(), (24, 18));
    assert_eq!(vari(&frame, EPS).dim(), (24, 18));
    assert_eq!(exg(&frame, EPS).dim(), (24, 18));
}
