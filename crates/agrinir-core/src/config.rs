use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_EPSILON, DEFAULT_HEALTHY_THRESHOLD, DEFAULT_MEDIAN_WINDOW, DEFAULT_RADIUS_RATIO,
    DEFAULT_UNHEALTHY_THRESHOLD, DEFAULT_WEED_THRESHOLD, FOUR_METHOD_WEIGHTS,
    THREE_METHOD_WEIGHTS,
};
use crate::decompose::{DecompositionMethod, LaplacianKernel, MixCoefficients};
use crate::error::{AgrinirError, Result};
use crate::filters::median::validate_window;

/// Everything needed to analyze one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingConfig {
    #[serde(default)]
    pub estimator: EstimatorConfig,
    #[serde(default)]
    pub indices: IndexConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl ProcessingConfig {
    /// Parse a (possibly partial) TOML document; missing sections use defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| AgrinirError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AgrinirError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.estimator.validate()?;
        self.indices.validate()?;
        self.classifier.validate()
    }
}

/// Relative weight of each decomposition method in the fused estimate.
///
/// Weights need not sum to one; fusion divides by their sum. A weight of zero
/// keeps a method's component in the diagnostics without letting it
/// contribute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionWeights {
    pub basic: f32,
    pub frequency: f32,
    pub multi_resolution: f32,
    pub edge_residual: f32,
}

impl Default for FusionWeights {
    fn default() -> Self {
        let [basic, frequency, multi_resolution, edge_residual] = FOUR_METHOD_WEIGHTS;
        Self {
            basic,
            frequency,
            multi_resolution,
            edge_residual,
        }
    }
}

impl FusionWeights {
    /// Weights of the estimator variant without the multi-resolution method.
    pub fn three_method() -> Self {
        let [basic, frequency, edge_residual] = THREE_METHOD_WEIGHTS;
        Self {
            basic,
            frequency,
            multi_resolution: 0.0,
            edge_residual,
        }
    }

    pub fn weight(&self, method: DecompositionMethod) -> f32 {
        match method {
            DecompositionMethod::LinearMix => self.basic,
            DecompositionMethod::FrequencyLowPass => self.frequency,
            DecompositionMethod::MultiResolution => self.multi_resolution,
            DecompositionMethod::EdgeResidual => self.edge_residual,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Methods to run. Duplicates are rejected.
    pub methods: Vec<DecompositionMethod>,
    /// Low-pass disk radius as a fraction of `min(height, width)`.
    pub radius_ratio: f32,
    pub laplacian: LaplacianKernel,
    /// Added to the weight sum before dividing.
    pub epsilon: f32,
    pub weights: FusionWeights,
    pub mix: MixCoefficients,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::four_method()
    }
}

impl EstimatorConfig {
    /// Linear mix, frequency low-pass, multi-resolution and edge residual.
    pub fn four_method() -> Self {
        Self {
            methods: DecompositionMethod::ALL.to_vec(),
            radius_ratio: DEFAULT_RADIUS_RATIO,
            laplacian: LaplacianKernel::default(),
            epsilon: DEFAULT_EPSILON,
            weights: FusionWeights::default(),
            mix: MixCoefficients::default(),
        }
    }

    /// Linear mix, frequency low-pass and edge residual.
    pub fn three_method() -> Self {
        Self {
            methods: vec![
                DecompositionMethod::LinearMix,
                DecompositionMethod::FrequencyLowPass,
                DecompositionMethod::EdgeResidual,
            ],
            weights: FusionWeights::three_method(),
            ..Self::four_method()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.methods.is_empty() {
            return Err(AgrinirError::InvalidConfig(
                "at least one decomposition method is required".into(),
            ));
        }
        for (i, method) in self.methods.iter().enumerate() {
            if self.methods[..i].contains(method) {
                return Err(AgrinirError::InvalidConfig(format!(
                    "decomposition method '{}' listed twice",
                    method.key()
                )));
            }
            let w = self.weights.weight(*method);
            if !w.is_finite() || w < 0.0 {
                return Err(AgrinirError::InvalidConfig(format!(
                    "fusion weight for '{}' must be finite and >= 0, got {}",
                    method.key(),
                    w
                )));
            }
        }
        if !self.radius_ratio.is_finite() || self.radius_ratio < 0.0 {
            return Err(AgrinirError::InvalidConfig(format!(
                "radius ratio must be finite and >= 0, got {}",
                self.radius_ratio
            )));
        }
        if !self.mix.is_finite() {
            return Err(AgrinirError::InvalidConfig(
                "linear mix coefficients must be finite".into(),
            ));
        }
        validate_epsilon(self.epsilon)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Added to every index denominator.
    pub epsilon: f32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        validate_epsilon(self.epsilon)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// EXG values strictly above this become weed candidates.
    pub weed_threshold: u8,
    /// Odd side length of the median filter applied to the weed mask.
    pub median_window: usize,
    /// NDVI at or above this is healthy.
    pub healthy_threshold: u8,
    /// NDVI at or below this is unhealthy.
    pub unhealthy_threshold: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            weed_threshold: DEFAULT_WEED_THRESHOLD,
            median_window: DEFAULT_MEDIAN_WINDOW,
            healthy_threshold: DEFAULT_HEALTHY_THRESHOLD,
            unhealthy_threshold: DEFAULT_UNHEALTHY_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        validate_window(self.median_window)
    }
}

fn validate_epsilon(epsilon: f32) -> Result<()> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(AgrinirError::InvalidConfig(format!(
            "epsilon must be finite and > 0, got {}",
            epsilon
        )));
    }
    Ok(())
}
