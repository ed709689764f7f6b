use sidewalk_geometry::image::{DepthMap, LabelMask};
use sidewalk_geometry::{SidewalkEstimator, SidewalkParams};

fn main() {
    // Demo stub: a synthetic sidewalk band on a flat depth plane.
    let (w, h) = (160usize, 120usize);
    let mut mask = LabelMask::new(w, h);
    let mut depth = DepthMap::new(w, h);
    for y in 0..h {
        for x in 50..110 {
            mask.set(x, y, 1);
        }
        for x in 0..w {
            let lateral = 0.05 * (x as f32 - 80.0);
            depth.set(x, y, (9.0 + lateral * lateral).sqrt());
        }
    }

    let estimator = SidewalkEstimator::new(SidewalkParams::default());
    match estimator.process(&mask, &depth) {
        Ok(report) => println!(
            "centroid=({:.1}, {:.1}) width={} latency_ms={:.3}",
            report.centroid[0], report.centroid[1], report.width, report.timing.total_ms
        ),
        Err(err) => eprintln!("estimation failed: {err}"),
    }
}
