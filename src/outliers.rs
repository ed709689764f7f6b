//! Depth-outlier rejection against the nominal sidewalk depth.
//!
//! The filter computes the mean depth of the sidewalk-labeled pixels and
//! drops every pixel (regardless of label) whose depth deviates from that
//! mean beyond a threshold. It never adds pixels, so the labeled pixel count
//! can only shrink. It surfaces useful diagnostics (pixel counts, the mean
//! depth it anchored on) and does not re-run component analysis.
use crate::error::{check_dims, EstimateError};
use crate::image::{DepthMap, LabelMask};
use log::debug;
use serde::Deserialize;

/// Parameters for the depth-outlier filter.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct OutlierOptions {
    /// Maximum deviation (meters) from the mean sidewalk depth.
    pub depth_threshold: f32,
}

impl Default for OutlierOptions {
    fn default() -> Self {
        Self {
            depth_threshold: 0.25,
        }
    }
}

/// Diagnostics emitted by the depth-outlier filter.
#[derive(Clone, Copy, Debug, Default)]
pub struct OutlierDiagnostics {
    /// Foreground pixels before filtering.
    pub before: usize,
    /// Foreground pixels after filtering.
    pub after: usize,
    /// Pixels dropped to background.
    pub removed: usize,
    /// Mean depth (meters) of the sidewalk-labeled pixels.
    pub mean_depth: f32,
}

/// Zero out every pixel whose depth deviates from the mean depth of the
/// `sidewalk_label` pixels by more than the threshold.
pub fn filter_depth_outliers(
    mask: &LabelMask,
    depth: &DepthMap,
    sidewalk_label: u32,
    opts: &OutlierOptions,
) -> Result<(LabelMask, OutlierDiagnostics), EstimateError> {
    check_dims(mask, depth)?;

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for (i, &label) in mask.data.iter().enumerate() {
        if label == sidewalk_label {
            sum += f64::from(depth.data[i]);
            count += 1;
        }
    }
    if count == 0 {
        return Err(EstimateError::EmptyRegion {
            label: sidewalk_label,
        });
    }
    let mean_depth = (sum / count as f64) as f32;

    let mut out = mask.clone();
    let mut removed = 0usize;
    for (i, v) in out.data.iter_mut().enumerate() {
        if *v != 0 && (depth.data[i] - mean_depth).abs() > opts.depth_threshold {
            *v = 0;
            removed += 1;
        }
    }

    let diag = OutlierDiagnostics {
        before: mask.foreground_count(),
        after: mask.foreground_count() - removed,
        removed,
        mean_depth,
    };
    debug!(
        "filter_depth_outliers: mean depth {:.3} m, removed {} of {} pixels",
        diag.mean_depth, diag.removed, diag.before
    );
    Ok((out, diag))
}
