use sidewalk_geometry::config::{self, RuntimeConfig};
use sidewalk_geometry::diagnostics::SidewalkReport;
use sidewalk_geometry::image::io::{load_depth_map, load_mask, save_mask_png, write_json_file};
use sidewalk_geometry::SidewalkEstimator;
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "sidewalk_demo".to_string());
    let config: RuntimeConfig = config::parse_cli(&program)?;

    let mask = load_mask(&config.mask_path)?;
    let depth = load_depth_map(&config.depth.path, config.depth.width, config.depth.height)?;
    let depth = if depth.dims() != mask.dims() {
        depth.resize_nearest(mask.w, mask.h)
    } else {
        depth
    };

    let estimator = SidewalkEstimator::new(config.params);

    if let Some(path) = &config.output.mask_out {
        let fusion = estimator
            .fuse(&mask, &depth)
            .map_err(|e| format!("Fusion failed: {e}"))?;
        save_mask_png(&fusion.mask, path)?;
        println!("Fused mask written to {}", path.display());
    }

    let report = estimator
        .process(&mask, &depth)
        .map_err(|e| format!("Estimation failed: {e}"))?;
    print_text_summary(&report);

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_text_summary(report: &SidewalkReport) {
    println!(
        "Centroid: ({:.1}, {:.1}) px",
        report.centroid[0], report.centroid[1]
    );
    println!("Width: {}", report.width);
    println!("Mean sidewalk depth: {:.2} m", report.mean_depth);
    println!(
        "Components: {} -> {} after merging, {} outlier px removed, {} sidewalk px",
        report.counts.components,
        report.counts.merged_components,
        report.counts.outliers_removed,
        report.counts.sidewalk_pixels
    );
    println!("Latency: {:.3} ms", report.timing.total_ms);
}
