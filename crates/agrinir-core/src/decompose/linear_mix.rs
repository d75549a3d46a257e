use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIX_BLUE, DEFAULT_MIX_GREEN, DEFAULT_MIX_RED};
use crate::error::{ensure_same_shape, Result};

/// Per-channel weights of the linear NIR proxy.
///
/// The defaults are a starting point; replace them with regression
/// coefficients once ground-truth NIR captures are available.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixCoefficients {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for MixCoefficients {
    fn default() -> Self {
        Self {
            red: DEFAULT_MIX_RED,
            green: DEFAULT_MIX_GREEN,
            blue: DEFAULT_MIX_BLUE,
        }
    }
}

impl MixCoefficients {
    pub fn is_finite(&self) -> bool {
        self.red.is_finite() && self.green.is_finite() && self.blue.is_finite()
    }
}

/// `red·R + green·G + blue·B`, pixel by pixel.
pub fn linear_mix(
    blue: &Array2<f32>,
    green: &Array2<f32>,
    red: &Array2<f32>,
    coeffs: &MixCoefficients,
) -> Result<Array2<f32>> {
    ensure_same_shape("linear mix (green)", red.dim(), green.dim())?;
    ensure_same_shape("linear mix (blue)", red.dim(), blue.dim())?;

    let mut result = Array2::<f32>::zeros(red.dim());
    Zip::from(&mut result)
        .and(blue)
        .and(green)
        .and(red)
        .for_each(|out, &b, &g, &r| {
            *out = coeffs.red * r + coeffs.green * g + coeffs.blue * b;
        });
    Ok(result)
}
