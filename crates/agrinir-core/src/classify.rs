use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::consts::{BACKGROUND_BGR, HEALTHY_BGR, MASK_OFF, MASK_ON, UNHEALTHY_BGR};
use crate::error::{ensure_same_shape, AgrinirError, Result};
use crate::filters::median::median_filter;

/// Crop-health category of a single pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthClass {
    Healthy,
    Unhealthy,
    Background,
}

impl HealthClass {
    /// BGR color used in the categorical map.
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Healthy => HEALTHY_BGR,
            Self::Unhealthy => UNHEALTHY_BGR,
            Self::Background => BACKGROUND_BGR,
        }
    }

    /// Inverse of `color`; `None` for any other color.
    pub fn from_color(bgr: [u8; 3]) -> Option<Self> {
        [Self::Healthy, Self::Unhealthy, Self::Background]
            .into_iter()
            .find(|class| class.color() == bgr)
    }

    /// Classify one NDVI byte. Healthy wins when the thresholds overlap.
    pub fn classify(ndvi: u8, config: &ClassifierConfig) -> Self {
        if ndvi >= config.healthy_threshold {
            Self::Healthy
        } else if ndvi <= config.unhealthy_threshold {
            Self::Unhealthy
        } else {
            Self::Background
        }
    }
}

impl std::fmt::Display for HealthClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Unhealthy => write!(f, "Unhealthy"),
            Self::Background => write!(f, "Background"),
        }
    }
}

/// Binary weed mask: EXG above the cut value, cleaned by a median filter.
///
/// Output values are exactly `0` or `255`.
pub fn weed_mask(exg_map: &Array2<u8>, config: &ClassifierConfig) -> Result<Array2<u8>> {
    let threshold = config.weed_threshold;
    let raw = exg_map.mapv(|v| if v > threshold { MASK_ON } else { MASK_OFF });
    // Median of a two-valued window is one of those values.
    median_filter(&raw, config.median_window)
}

/// Categorical crop-health map, shape = (height, width, 3), BGR.
pub fn crop_health_map(ndvi_map: &Array2<u8>, config: &ClassifierConfig) -> Array3<u8> {
    let (h, w) = ndvi_map.dim();
    let mut result = Array3::<u8>::zeros((h, w, 3));
    for ((row, col), &v) in ndvi_map.indexed_iter() {
        let color = HealthClass::classify(v, config).color();
        for (c, &value) in color.iter().enumerate() {
            result[[row, col, c]] = value;
        }
    }
    result
}

/// Fraction of the frame in each category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthCoverage {
    pub healthy: f64,
    pub unhealthy: f64,
    pub background: f64,
    pub weeds: f64,
}

/// Summarize a health map and weed mask of the same frame.
pub fn health_coverage(health_map: &Array3<u8>, weed_mask: &Array2<u8>) -> Result<HealthCoverage> {
    let (h, w, c) = health_map.dim();
    if c != 3 {
        return Err(AgrinirError::shape_mismatch(
            "health map",
            (h, w, 3),
            (h, w, c),
        ));
    }
    ensure_same_shape("weed mask", (h, w), weed_mask.dim())?;

    let total = (h * w) as f64;
    if total == 0.0 {
        return Ok(HealthCoverage::default());
    }

    let mut healthy = 0usize;
    let mut unhealthy = 0usize;
    let mut background = 0usize;
    for row in 0..h {
        for col in 0..w {
            let bgr = [
                health_map[[row, col, 0]],
                health_map[[row, col, 1]],
                health_map[[row, col, 2]],
            ];
            match HealthClass::from_color(bgr) {
                Some(HealthClass::Healthy) => healthy += 1,
                Some(HealthClass::Unhealthy) => unhealthy += 1,
                _ => background += 1,
            }
        }
    }
    let weeds = weed_mask.iter().filter(|&&v| v == MASK_ON).count();

    Ok(HealthCoverage {
        healthy: healthy as f64 / total,
        unhealthy: unhealthy as f64 / total,
        background: background as f64 / total,
        weeds: weeds as f64 / total,
    })
}
