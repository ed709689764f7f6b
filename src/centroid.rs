//! Representative centroid of the sidewalk-labeled pixels.
//!
//! Two strategies, selected by configuration rather than detected at runtime:
//!
//! - `Median` (default): per-axis median of the pixel coordinates. Robust to
//!   elongated or skewed region shapes; the two axes are independent, so the
//!   result need not lie on a labeled pixel. Even-sized axes average the two
//!   middle values.
//! - `DensityClustering`: DBSCAN over (x, y, depth) points; noise points are
//!   excluded and the arithmetic mean of the largest cluster is returned.
//!   Pixel units and depth meters combine unscaled — callers needing a
//!   different balance must rescale depth beforehand.
use crate::cluster::{dbscan, DbscanOptions};
use crate::error::{check_dims, EstimateError};
use crate::image::{DepthMap, LabelMask};
use log::debug;
use nalgebra::{Vector2, Vector3};
use serde::Deserialize;

/// Representative (x, y) location in pixel coordinates.
pub type Centroid = Vector2<f32>;

/// Centroid estimation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidStrategy {
    /// Coordinate-wise median of the labeled pixels.
    #[default]
    Median,
    /// Mean of the largest DBSCAN cluster in (x, y, depth) space.
    DensityClustering,
}

/// Parameters for the centroid stage.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CentroidOptions {
    pub strategy: CentroidStrategy,
    /// DBSCAN parameters, used only by `DensityClustering`.
    pub dbscan: DbscanOptions,
}

/// Estimate the centroid of the pixels carrying `sidewalk_label`.
pub fn estimate_centroid(
    mask: &LabelMask,
    depth: &DepthMap,
    sidewalk_label: u32,
    opts: &CentroidOptions,
) -> Result<Centroid, EstimateError> {
    check_dims(mask, depth)?;

    let mut points: Vec<Vector3<f32>> = Vec::new();
    for y in 0..mask.h {
        for x in 0..mask.w {
            if mask.get(x, y) == sidewalk_label {
                points.push(Vector3::new(x as f32, y as f32, depth.get(x, y)));
            }
        }
    }
    if points.is_empty() {
        return Err(EstimateError::EmptyRegion {
            label: sidewalk_label,
        });
    }

    match opts.strategy {
        CentroidStrategy::Median => {
            let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
            Ok(Centroid::new(median(xs), median(ys)))
        }
        CentroidStrategy::DensityClustering => {
            let clustering = dbscan(&points, &opts.dbscan);
            let Some(winner) = clustering.largest_cluster() else {
                return Err(EstimateError::DegenerateClustering {
                    points: points.len(),
                });
            };
            let mut sum = Vector3::zeros();
            let mut count = 0usize;
            for (p, label) in points.iter().zip(&clustering.labels) {
                if *label == Some(winner) {
                    sum += *p;
                    count += 1;
                }
            }
            debug!(
                "estimate_centroid: cluster {winner} of {} wins with {count} of {} points",
                clustering.clusters,
                points.len()
            );
            // The mean depth of the cluster is available in `sum.z` but the
            // centroid is a 2D pixel location.
            let mean = sum / count as f32;
            Ok(Centroid::new(mean.x, mean.y))
        }
    }
}

/// Median with averaging of the two middle values for even counts.
fn median(mut values: Vec<f32>) -> f32 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let m = values.len();
    if m % 2 == 1 {
        values[m / 2]
    } else {
        0.5 * (values[m / 2 - 1] + values[m / 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_scene(x0: usize, x1: usize, y0: usize, y1: usize) -> (LabelMask, DepthMap) {
        let (w, h) = (40, 30);
        let mut mask = LabelMask::new(w, h);
        let depth = DepthMap::from_raw(w, h, vec![3.0; w * h]);
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.set(x, y, 1);
            }
        }
        (mask, depth)
    }

    #[test]
    fn median_centroid_of_rectangle_is_its_center() {
        let (mask, depth) = rect_scene(10, 20, 5, 15);
        let c = estimate_centroid(&mask, &depth, 1, &CentroidOptions::default()).unwrap();
        assert_eq!(c, Centroid::new(15.0, 10.0));

        // Even pixel counts per axis: center falls between pixels.
        let (mask, depth) = rect_scene(10, 21, 5, 16);
        let c = estimate_centroid(&mask, &depth, 1, &CentroidOptions::default()).unwrap();
        assert_eq!(c, Centroid::new(15.5, 10.5));
    }

    #[test]
    fn clustering_excludes_isolated_noise() {
        let (mut mask, depth) = rect_scene(10, 20, 5, 15);
        mask.set(35, 25, 1); // isolated speck far from the rectangle
        let opts = CentroidOptions {
            strategy: CentroidStrategy::DensityClustering,
            dbscan: DbscanOptions {
                eps: 2.0,
                min_samples: 10,
            },
        };
        let c = estimate_centroid(&mask, &depth, 1, &opts).unwrap();
        assert!((c.x - 15.0).abs() < 1e-4);
        assert!((c.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn all_noise_is_a_degenerate_clustering_error() {
        let (w, h) = (30, 30);
        let mut mask = LabelMask::new(w, h);
        // Pixels spaced 10 apart never reach min_samples at eps 1.5.
        for i in 0..3 {
            mask.set(5 + i * 10, 5, 1);
        }
        let depth = DepthMap::from_raw(w, h, vec![3.0; w * h]);
        let opts = CentroidOptions {
            strategy: CentroidStrategy::DensityClustering,
            dbscan: DbscanOptions {
                eps: 1.5,
                min_samples: 10,
            },
        };
        let err = estimate_centroid(&mask, &depth, 1, &opts).unwrap_err();
        assert!(matches!(err, EstimateError::DegenerateClustering { .. }));
    }

    #[test]
    fn empty_region_is_an_explicit_error() {
        let (w, h) = (10, 10);
        let mask = LabelMask::new(w, h);
        let depth = DepthMap::new(w, h);
        let err = estimate_centroid(&mask, &depth, 1, &CentroidOptions::default()).unwrap_err();
        assert_eq!(err, EstimateError::EmptyRegion { label: 1 });
    }

    #[test]
    fn shape_mismatch_fails_fast() {
        let mask = LabelMask::new(10, 10);
        let depth = DepthMap::new(10, 11);
        let err = estimate_centroid(&mask, &depth, 1, &CentroidOptions::default()).unwrap_err();
        assert!(matches!(err, EstimateError::ShapeMismatch { .. }));
    }
}
