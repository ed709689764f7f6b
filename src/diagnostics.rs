//! Serializable report emitted by a full pipeline run.
use crate::width::WidthEstimate;
use serde::Serialize;
use std::time::Instant;

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub stage: String,
    pub elapsed_ms: f64,
}

/// Aggregated timing trace for one observation.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record the time elapsed since `since` under `stage`.
    pub fn record(&mut self, stage: &str, since: Instant) {
        self.stages.push(StageTiming {
            stage: stage.to_string(),
            elapsed_ms: since.elapsed().as_secs_f64() * 1000.0,
        });
    }
}

/// Per-stage counters describing how much of the mask survived fusion.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCounts {
    /// Foreground pixels after morphological cleaning.
    pub cleaned_foreground: usize,
    /// Connected components found before depth merging.
    pub components: usize,
    /// Distinct label groups after depth merging.
    pub merged_components: usize,
    /// Pixels dropped by the depth-outlier filter.
    pub outliers_removed: usize,
    /// Pixels carrying the sidewalk label after fusion.
    pub sidewalk_pixels: usize,
}

/// Result of a full clean → merge → filter → centroid → width run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidewalkReport {
    /// Representative sidewalk location, pixel coordinates (x, y).
    pub centroid: [f32; 2],
    /// Estimated width, or an explicit undetermined marker.
    pub width: WidthEstimate,
    /// Mean depth (meters) the outlier filter anchored on.
    pub mean_depth: f32,
    pub counts: StageCounts,
    pub timing: TimingBreakdown,
}
