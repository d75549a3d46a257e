//! Vegetation indices from the fused NIR field and the visible channels.
//!
//! Every ratio adds `epsilon` to its denominator instead of branching on
//! zero, and every byte map is clamped into 0-255, so outputs are finite
//! for any input.

use ndarray::{Array2, Zip};

use crate::error::{ensure_same_shape, Result};
use crate::frame::BgrFrame;
use crate::normalize::{min_max_to_u8, signed_unit_to_u8};

/// Raw NDVI ratio `(nir - red) / (nir + red + eps)`.
pub fn ndvi_ratio(nir: &Array2<f32>, red: &Array2<f32>, epsilon: f32) -> Result<Array2<f32>> {
    ensure_same_shape("ndvi", red.dim(), nir.dim())?;
    Ok(Zip::from(nir)
        .and(red)
        .map_collect(|&n, &r| (n - r) / (n + r + epsilon)))
}

/// NDVI from raw channels, rescaled from [-1, 1] to [0, 255].
pub fn ndvi_array(nir: &Array2<f32>, red: &Array2<f32>, epsilon: f32) -> Result<Array2<u8>> {
    Ok(signed_unit_to_u8(&ndvi_ratio(nir, red, epsilon)?))
}

/// NDVI of an estimated NIR field against the frame's red channel.
pub fn ndvi(nir: &Array2<f32>, frame: &BgrFrame, epsilon: f32) -> Result<Array2<u8>> {
    ndvi_array(nir, &frame.red(), epsilon)
}

/// Raw VARI ratio `(g - r) / (g + r - b + eps)`.
pub fn vari_ratio(frame: &BgrFrame, epsilon: f32) -> Array2<f32> {
    let ch = frame.channels();
    Zip::from(&ch.green)
        .and(&ch.red)
        .and(&ch.blue)
        .map_collect(|&g, &r, &b| (g - r) / (g + r - b + epsilon))
}

/// VARI rescaled from [-1, 1] to [0, 255].
pub fn vari(frame: &BgrFrame, epsilon: f32) -> Array2<u8> {
    signed_unit_to_u8(&vari_ratio(frame, epsilon))
}

/// Raw excess-green `2g - r - b`.
pub fn exg_raw(frame: &BgrFrame) -> Array2<f32> {
    let ch = frame.channels();
    Zip::from(&ch.green)
        .and(&ch.red)
        .and(&ch.blue)
        .map_collect(|&g, &r, &b| 2.0 * g - r - b)
}

/// Excess-green, min-max normalized to [0, 255].
pub fn exg(frame: &BgrFrame, epsilon: f32) -> Array2<u8> {
    min_max_to_u8(&exg_raw(frame), epsilon)
}

/// All three index maps for one frame.
#[derive(Clone, Debug)]
pub struct IndexMaps {
    pub ndvi: Array2<u8>,
    pub vari: Array2<u8>,
    pub exg: Array2<u8>,
}

/// Compute NDVI, VARI and EXG together.
pub fn compute_all(nir: &Array2<f32>, frame: &BgrFrame, epsilon: f32) -> Result<IndexMaps> {
    Ok(IndexMaps {
        ndvi: ndvi(nir, frame, epsilon)?,
        vari: vari(frame, epsilon),
        exg: exg(frame, epsilon),
    })
}
