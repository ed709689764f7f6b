mod common;

use common::synthetic::{add_specks, ground_plane_depth, sidewalk_band};
use sidewalk_geometry::centroid::{estimate_centroid, CentroidOptions, CentroidStrategy};
use sidewalk_geometry::cluster::DbscanOptions;
use sidewalk_geometry::outliers::OutlierOptions;
use sidewalk_geometry::{SidewalkEstimator, SidewalkParams, WidthEstimate};

/// Parameters with the outlier gate relaxed: the synthetic ground plane
/// spans more than the default 0.25 m of depth across the band.
fn relaxed_params() -> SidewalkParams {
    SidewalkParams {
        outlier: OutlierOptions {
            depth_threshold: 5.0,
        },
        ..Default::default()
    }
}

#[test]
fn full_pipeline_recovers_band_centroid_and_width() {
    let (w, h) = (101, 101);
    let mut mask = sidewalk_band(w, h, 30, 70, 1);
    add_specks(&mut mask, &[(5, 5), (95, 10), (4, 90)], 1);
    // Camera over column 50, 3 m above the plane, 0.1 m per pixel laterally.
    let depth = ground_plane_depth(w, h, 50, 3.0, 0.1);

    let estimator = SidewalkEstimator::new(relaxed_params());
    let report = estimator.process(&mask, &depth).unwrap();

    // Specks are cleaned away, the band is one component.
    assert_eq!(report.counts.components, 1);
    assert_eq!(report.counts.merged_components, 1);
    assert_eq!(report.centroid, [50.0, 50.0]);

    // Edge columns sit 2.0 m from the center ray on both sides.
    let width = report.width.meters().expect("width should be determined");
    assert!(
        (width - 2.0).abs() < 1e-3,
        "expected ~2.0 m width, got {width}"
    );
}

#[test]
fn density_clustering_ignores_speckle_in_the_centroid() {
    let (w, h) = (101, 101);
    let mut mask = sidewalk_band(w, h, 30, 70, 1);
    add_specks(&mut mask, &[(5, 5), (95, 95)], 1);
    let depth = ground_plane_depth(w, h, 50, 3.0, 0.1);

    let opts = CentroidOptions {
        strategy: CentroidStrategy::DensityClustering,
        dbscan: DbscanOptions {
            eps: 2.0,
            min_samples: 10,
        },
    };
    let centroid = estimate_centroid(&mask, &depth, 1, &opts).unwrap();
    assert!((centroid.x - 50.0).abs() < 1e-3);
    assert!((centroid.y - 50.0).abs() < 1e-3);
}

#[test]
fn undetermined_width_is_reported_not_an_error() {
    let (w, h) = (41, 41);
    // Narrow band whose edge pixels are closer to the camera than the
    // centroid pixel: the right triangle has no real solution.
    let mask = sidewalk_band(w, h, 18, 22, 1);
    let mut depth = sidewalk_geometry::DepthMap::from_raw(w, h, vec![2.0; w * h]);
    for y in 0..h {
        depth.set(20, y, 3.0);
    }

    let estimator = SidewalkEstimator::new(relaxed_params());
    let report = estimator.process(&mask, &depth).unwrap();
    assert!(matches!(report.width, WidthEstimate::Undetermined(_)));
}

#[test]
fn split_band_merges_across_an_occlusion() {
    let (w, h) = (101, 101);
    let mut mask = sidewalk_band(w, h, 30, 70, 1);
    // An occluding stripe splits the band into two components on the
    // same ground plane.
    for x in 30..=70 {
        for y in 48..=52 {
            mask.set(x, y, 0);
        }
    }
    let depth = ground_plane_depth(w, h, 50, 3.0, 0.01);

    let estimator = SidewalkEstimator::new(relaxed_params());
    let report = estimator.process(&mask, &depth).unwrap();
    assert_eq!(report.counts.components, 2);
    assert_eq!(report.counts.merged_components, 1);
}
