#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod estimator;
pub mod image;

// Stage-level modules – public so callers can compose the pipeline by hand.
pub mod centroid;
pub mod cluster;
pub mod components;
pub mod morphology;
pub mod outliers;
pub mod width;

// --- High-level re-exports -------------------------------------------------

// Main entry points: estimator + results.
pub use crate::diagnostics::SidewalkReport;
pub use crate::estimator::{SidewalkEstimator, SidewalkParams};

// Core value types used across stage boundaries.
pub use crate::centroid::{Centroid, CentroidOptions, CentroidStrategy};
pub use crate::error::EstimateError;
pub use crate::image::{DepthMap, LabelMask};
pub use crate::width::{UndeterminedReason, WidthEstimate};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use sidewalk_geometry::prelude::*;
///
/// let mask = LabelMask::new(64, 64);
/// let depth = DepthMap::new(64, 64);
/// let estimator = SidewalkEstimator::new(SidewalkParams::default());
/// // An all-background mask has no sidewalk region to estimate.
/// assert!(estimator.process(&mask, &depth).is_err());
/// ```
pub mod prelude {
    pub use crate::image::{DepthMap, LabelMask};
    pub use crate::{
        Centroid, EstimateError, SidewalkEstimator, SidewalkParams, SidewalkReport, WidthEstimate,
    };
}
