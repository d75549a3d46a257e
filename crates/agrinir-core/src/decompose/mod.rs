//! Single-field transforms that each produce a "NIR-like" candidate.
//!
//! Every transform returns a freshly allocated field with exactly the
//! shape of its input.

pub mod edge_residual;
pub mod frequency;
pub mod linear_mix;
pub mod multires;

use serde::{Deserialize, Serialize};

pub use edge_residual::{edge_residual_base, laplacian, LaplacianKernel};
pub use frequency::frequency_lowpass;
pub use linear_mix::{linear_mix, MixCoefficients};
pub use multires::{haar_pairs, multires_approx};

/// The enumerated set of NIR estimation strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecompositionMethod {
    /// Weighted sum of the three visible channels.
    LinearMix,
    /// Disk low-pass in the 2D frequency domain.
    FrequencyLowPass,
    /// Red channel minus its Laplacian.
    EdgeResidual,
    /// Haar approximation band, upsampled back to full resolution.
    MultiResolution,
}

impl DecompositionMethod {
    pub const ALL: [DecompositionMethod; 4] = [
        Self::LinearMix,
        Self::FrequencyLowPass,
        Self::EdgeResidual,
        Self::MultiResolution,
    ];

    /// Stable component name used in diagnostics and output file names.
    pub fn key(&self) -> &'static str {
        match self {
            Self::LinearMix => "nir_basic",
            Self::FrequencyLowPass => "nir_fft",
            Self::EdgeResidual => "nir_lap",
            Self::MultiResolution => "nir_multires",
        }
    }
}

impl std::fmt::Display for DecompositionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearMix => write!(f, "Linear mix"),
            Self::FrequencyLowPass => write!(f, "Frequency low-pass"),
            Self::EdgeResidual => write!(f, "Edge residual"),
            Self::MultiResolution => write!(f, "Multi-resolution"),
        }
    }
}
