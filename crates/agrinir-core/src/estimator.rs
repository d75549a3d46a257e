use std::collections::BTreeMap;

use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{EstimatorConfig, FusionWeights};
use crate::decompose::{
    edge_residual_base, frequency_lowpass, linear_mix, multires_approx, DecompositionMethod,
};
use crate::error::{ensure_same_shape, Result};
use crate::frame::{BgrChannels, BgrFrame};

/// Fused NIR field plus the per-method candidates it was built from.
#[derive(Clone, Debug)]
pub struct NirEstimate {
    /// Weighted mean of the components, shape = (height, width).
    pub fused: Array2<f32>,
    /// One entry per enabled method, each the same shape as `fused`.
    pub components: BTreeMap<DecompositionMethod, Array2<f32>>,
}

impl NirEstimate {
    pub fn component(&self, method: DecompositionMethod) -> Option<&Array2<f32>> {
        self.components.get(&method)
    }

    /// Look up a component by its `DecompositionMethod::key()` name.
    pub fn component_by_key(&self, key: &str) -> Option<&Array2<f32>> {
        self.components
            .iter()
            .find(|(method, _)| method.key() == key)
            .map(|(_, data)| data)
    }

    pub fn component_keys(&self) -> Vec<&'static str> {
        self.components.keys().map(|m| m.key()).collect()
    }
}

/// Runs the configured decomposition methods over a frame and fuses them.
///
/// Holds only its validated configuration; `estimate` is a pure function of
/// the frame, so one estimator can be shared across threads.
#[derive(Clone, Debug)]
pub struct SpectralEstimator {
    config: EstimatorConfig,
}

impl SpectralEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate NIR for one frame.
    ///
    /// LinearMix reads all three channels; the other methods read red only.
    /// Fusion is `Σ(wᵢ·cᵢ) / (Σwᵢ + ε)` over the enabled methods.
    pub fn estimate(&self, frame: &BgrFrame) -> Result<NirEstimate> {
        let shape = frame.dim();
        debug!(
            height = shape.0,
            width = shape.1,
            methods = self.config.methods.len(),
            "Estimating NIR"
        );

        let channels = frame.channels();

        let computed: Vec<(DecompositionMethod, Array2<f32>)> = self
            .config
            .methods
            .par_iter()
            .map(|&method| {
                let component = self.run_method(method, &channels)?;
                trace!(method = method.key(), "Component computed");
                Ok((method, component))
            })
            .collect::<Result<_>>()?;

        let mut fused = Array2::<f32>::zeros(shape);
        let mut weight_sum = 0.0f32;
        for (method, component) in &computed {
            ensure_same_shape(method.key(), shape, component.dim())?;
            let weight = self.config.weights.weight(*method);
            fused.scaled_add(weight, component);
            weight_sum += weight;
        }
        let denom = weight_sum + self.config.epsilon;
        fused.mapv_inplace(|v| v / denom);

        Ok(NirEstimate {
            fused,
            components: computed.into_iter().collect(),
        })
    }

    fn run_method(
        &self,
        method: DecompositionMethod,
        channels: &BgrChannels,
    ) -> Result<Array2<f32>> {
        match method {
            DecompositionMethod::LinearMix => linear_mix(
                &channels.blue,
                &channels.green,
                &channels.red,
                &self.config.mix,
            ),
            DecompositionMethod::FrequencyLowPass => {
                frequency_lowpass(&channels.red, self.config.radius_ratio)
            }
            DecompositionMethod::EdgeResidual => {
                Ok(edge_residual_base(&channels.red, self.config.laplacian))
            }
            DecompositionMethod::MultiResolution => Ok(multires_approx(&channels.red)),
        }
    }
}

/// Four-method NIR estimate with default mix coefficients and kernel.
pub fn estimate_nir(
    frame: &BgrFrame,
    radius_ratio: f32,
    weights: FusionWeights,
) -> Result<NirEstimate> {
    let config = EstimatorConfig {
        radius_ratio,
        weights,
        ..EstimatorConfig::four_method()
    };
    SpectralEstimator::new(config)?.estimate(frame)
}
