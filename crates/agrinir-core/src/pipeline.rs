use std::collections::BTreeMap;

use ndarray::{Array2, Array3};
use rayon::prelude::*;
use tracing::debug;

use crate::classify::{crop_health_map, health_coverage, weed_mask, HealthCoverage};
use crate::config::ProcessingConfig;
use crate::consts::PARALLEL_FRAME_THRESHOLD;
use crate::decompose::DecompositionMethod;
use crate::error::Result;
use crate::estimator::SpectralEstimator;
use crate::frame::BgrFrame;
use crate::indices;

/// Every per-frame output of the estimation and classification chain.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub nir: Array2<f32>,
    pub components: BTreeMap<DecompositionMethod, Array2<f32>>,
    pub ndvi: Array2<u8>,
    pub vari: Array2<u8>,
    pub exg: Array2<u8>,
    pub weed_mask: Array2<u8>,
    pub health_map: Array3<u8>,
}

impl FrameAnalysis {
    pub fn coverage(&self) -> Result<HealthCoverage> {
        health_coverage(&self.health_map, &self.weed_mask)
    }
}

/// Validated configuration plus the estimator built from it.
#[derive(Clone, Debug)]
pub struct FrameAnalyzer {
    config: ProcessingConfig,
    estimator: SpectralEstimator,
}

impl FrameAnalyzer {
    pub fn new(config: ProcessingConfig) -> Result<Self> {
        config.validate()?;
        let estimator = SpectralEstimator::new(config.estimator.clone())?;
        Ok(Self { config, estimator })
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// frame -> NIR estimate -> indices -> masks.
    pub fn analyze(&self, frame: &BgrFrame) -> Result<FrameAnalysis> {
        let estimate = self.estimator.estimate(frame)?;
        debug!("NIR estimate ready");

        let maps = indices::compute_all(&estimate.fused, frame, self.config.indices.epsilon)?;
        debug!("Index maps ready");

        let weeds = weed_mask(&maps.exg, &self.config.classifier)?;
        let health = crop_health_map(&maps.ndvi, &self.config.classifier);
        debug!("Classification masks ready");

        Ok(FrameAnalysis {
            nir: estimate.fused,
            components: estimate.components,
            ndvi: maps.ndvi,
            vari: maps.vari,
            exg: maps.exg,
            weed_mask: weeds,
            health_map: health,
        })
    }

    /// Analyze independent frames, in parallel when there are several.
    ///
    /// Results keep the input order.
    pub fn analyze_all(&self, frames: &[BgrFrame]) -> Result<Vec<FrameAnalysis>> {
        if frames.len() >= PARALLEL_FRAME_THRESHOLD {
            frames.par_iter().map(|f| self.analyze(f)).collect()
        } else {
            frames.iter().map(|f| self.analyze(f)).collect()
        }
    }
}

/// One-shot analysis of a single frame.
pub fn analyze_frame(frame: &BgrFrame, config: &ProcessingConfig) -> Result<FrameAnalysis> {
    FrameAnalyzer::new(config.clone())?.analyze(frame)
}

/// One-shot analysis of several independent frames.
pub fn analyze_frames(frames: &[BgrFrame], config: &ProcessingConfig) -> Result<Vec<FrameAnalysis>> {
    FrameAnalyzer::new(config.clone())?.analyze_all(frames)
}
