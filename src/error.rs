//! The ways signal conditioning and peak extraction can fail.
use std::fmt;

use thiserror::Error;

/// All the ways a single processing stage can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    /// A tuning parameter was outside of its legal domain, e.g. a zero-width
    /// smoothing window or an unsupported filter kind
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// The computation is undefined or ill-conditioned for this input, e.g. a
    /// singular polynomial fit or the standard error of a single sample
    #[error("Numerical error: {0}")]
    NumericalError(String),
    /// Two sequences that must be aligned sample-for-sample were not
    #[error("Expected a sequence of length {expected}, received {received}")]
    ShapeMismatch { expected: usize, received: usize },
    /// A named channel was requested from a channel set that does not contain it
    #[error("The channel {0:?} was not found")]
    MissingChannel(String),
}

impl SignalError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        Self::NumericalError(message.into())
    }
}

/// Check that two paired sequences have the same length
pub(crate) fn check_aligned(expected: usize, received: usize) -> Result<(), SignalError> {
    if expected != received {
        Err(SignalError::ShapeMismatch { expected, received })
    } else {
        Ok(())
    }
}

/// The step of [`Pipeline::run`](crate::pipeline::Pipeline::run) that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validation,
    Smoothing,
    Detrending,
    PeakDetection,
    NoiseEstimation,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Validation => "validation",
            PipelineStage::Smoothing => "smoothing",
            PipelineStage::Detrending => "detrending",
            PipelineStage::PeakDetection => "peak detection",
            PipelineStage::NoiseEstimation => "noise estimation",
        };
        f.write_str(name)
    }
}

/// A failed pipeline run, carrying the stage that failed and why
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Pipeline failed during {stage}: {source}")]
pub struct PipelineError {
    pub stage: PipelineStage,
    #[source]
    pub source: SignalError,
}

impl PipelineError {
    pub fn new(stage: PipelineStage, source: SignalError) -> Self {
        Self { stage, source }
    }
}
