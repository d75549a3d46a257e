pub mod classify;
pub mod config;
pub mod consts;
pub mod decompose;
pub mod error;
pub mod estimator;
pub mod filters;
pub mod frame;
pub mod indices;
pub mod io;
pub mod normalize;
pub mod pipeline;

pub use estimator::{estimate_nir, NirEstimate, SpectralEstimator};
pub use frame::BgrFrame;
