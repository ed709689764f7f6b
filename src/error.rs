//! Failure taxonomy shared by the pipeline stages.
//!
//! Every failure is local and deterministic: a stage either returns its
//! output or one of these variants, never a placeholder value. An
//! uncomputable width is *not* an error — see
//! [`crate::width::WidthEstimate::Undetermined`].

use crate::image::{DepthMap, LabelMask};

/// Reasons why a pipeline stage may refuse to produce an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstimateError {
    /// Mask and depth map dimensions differ; checked before any processing.
    ShapeMismatch {
        mask: (usize, usize),
        depth: (usize, usize),
    },
    /// No pixel carries the requested sidewalk label.
    EmptyRegion { label: u32 },
    /// Density clustering classified every point as noise.
    DegenerateClustering { points: usize },
}

impl std::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateError::ShapeMismatch { mask, depth } => write!(
                f,
                "mask dimensions {}x{} do not match depth map {}x{}",
                mask.0, mask.1, depth.0, depth.1
            ),
            EstimateError::EmptyRegion { label } => {
                write!(f, "no pixels carry sidewalk label {label}")
            }
            EstimateError::DegenerateClustering { points } => write!(
                f,
                "density clustering found no dense cluster among {points} points"
            ),
        }
    }
}

impl std::error::Error for EstimateError {}

/// Fail fast when mask and depth map shapes disagree.
pub(crate) fn check_dims(mask: &LabelMask, depth: &DepthMap) -> Result<(), EstimateError> {
    if mask.dims() != depth.dims() {
        return Err(EstimateError::ShapeMismatch {
            mask: mask.dims(),
            depth: depth.dims(),
        });
    }
    Ok(())
}
