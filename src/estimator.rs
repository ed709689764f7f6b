//! Pipeline orchestration: clean → merge → filter → centroid → width.
use crate::centroid::{estimate_centroid, CentroidOptions};
use crate::components::{merge_components, MergeOptions};
use crate::diagnostics::{SidewalkReport, StageCounts, TimingBreakdown};
use crate::error::{check_dims, EstimateError};
use crate::image::{DepthMap, LabelMask};
use crate::morphology::{clean_mask, CleaningOptions};
use crate::outliers::{filter_depth_outliers, OutlierOptions};
use crate::width::estimate_width;
use log::debug;
use serde::Deserialize;
use std::time::Instant;

/// Pipeline-wide parameters; defaults carry the documented values.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SidewalkParams {
    /// Label of the sidewalk class in the mask.
    pub sidewalk_label: u32,
    pub cleaning: CleaningOptions,
    pub merge: MergeOptions,
    pub outlier: OutlierOptions,
    pub centroid: CentroidOptions,
}

impl Default for SidewalkParams {
    fn default() -> Self {
        Self {
            sidewalk_label: 1,
            cleaning: CleaningOptions::default(),
            merge: MergeOptions::default(),
            outlier: OutlierOptions::default(),
            centroid: CentroidOptions::default(),
        }
    }
}

/// Fused label map plus the counters gathered while producing it.
#[derive(Clone, Debug)]
pub struct Fusion {
    pub mask: LabelMask,
    pub counts: StageCounts,
    /// Mean depth (meters) the outlier filter anchored on.
    pub mean_depth: f32,
}

/// Runs the mask/depth fusion pipeline on one observation at a time.
///
/// Holds no state across observations; every call allocates fresh outputs.
pub struct SidewalkEstimator {
    params: SidewalkParams,
}

impl SidewalkEstimator {
    pub fn new(params: SidewalkParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SidewalkParams {
        &self.params
    }

    /// Fuse mask and depth into a cleaned label map.
    ///
    /// Exposed separately so callers can inspect or persist the fused mask;
    /// [`process`](Self::process) builds on it.
    pub fn fuse(&self, mask: &LabelMask, depth: &DepthMap) -> Result<Fusion, EstimateError> {
        check_dims(mask, depth)?;
        let p = &self.params;
        let mut counts = StageCounts::default();

        let cleaned = clean_mask(mask, &p.cleaning);
        counts.cleaned_foreground = cleaned.foreground_count();
        debug!(
            "fuse: cleaning kept {} of {} foreground pixels",
            counts.cleaned_foreground,
            mask.foreground_count()
        );

        let (merged, merge_diag) = merge_components(&cleaned, depth, &p.merge)?;
        counts.components = merge_diag.components;
        counts.merged_components = merge_diag.merged;

        let (filtered, outlier_diag) =
            filter_depth_outliers(&merged, depth, p.sidewalk_label, &p.outlier)?;
        counts.outliers_removed = outlier_diag.removed;
        counts.sidewalk_pixels = filtered.count(p.sidewalk_label);

        Ok(Fusion {
            mask: filtered,
            counts,
            mean_depth: outlier_diag.mean_depth,
        })
    }

    /// Run the full pipeline and produce a report.
    ///
    /// Width failure modes surface inside the report as
    /// [`WidthEstimate::Undetermined`](crate::width::WidthEstimate); only
    /// shape mismatches, empty regions and degenerate clustering are errors.
    pub fn process(
        &self,
        mask: &LabelMask,
        depth: &DepthMap,
    ) -> Result<SidewalkReport, EstimateError> {
        let t_total = Instant::now();
        let mut timing = TimingBreakdown::default();
        let p = &self.params;

        let t = Instant::now();
        let fusion = self.fuse(mask, depth)?;
        timing.record("fuse", t);

        let t = Instant::now();
        let centroid = estimate_centroid(&fusion.mask, depth, p.sidewalk_label, &p.centroid)?;
        timing.record("centroid", t);
        debug!("process: centroid at ({:.1}, {:.1})", centroid.x, centroid.y);

        let t = Instant::now();
        let width = estimate_width(&fusion.mask, depth, centroid)?;
        timing.record("width", t);
        debug!("process: width {width}");

        timing.total_ms = t_total.elapsed().as_secs_f64() * 1000.0;
        Ok(SidewalkReport {
            centroid: [centroid.x, centroid.y],
            width,
            mean_depth: fusion.mean_depth,
            counts: fusion.counts,
            timing,
        })
    }
}
