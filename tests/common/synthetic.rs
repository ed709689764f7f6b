use sidewalk_geometry::image::{DepthMap, LabelMask};

/// Vertical sidewalk band: columns `x0..=x1` labeled across every row.
pub fn sidewalk_band(width: usize, height: usize, x0: usize, x1: usize, label: u32) -> LabelMask {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(x0 <= x1 && x1 < width, "band must lie inside the image");

    let mut mask = LabelMask::new(width, height);
    for y in 0..height {
        for x in x0..=x1 {
            mask.set(x, y, label);
        }
    }
    mask
}

/// Depth map modeling a flat ground plane seen from a camera centered on
/// column `cx`: the perpendicular distance is `side` and each column's depth
/// is the hypotenuse for a lateral offset of `meters_per_px * |x - cx|`.
pub fn ground_plane_depth(
    width: usize,
    height: usize,
    cx: usize,
    side: f32,
    meters_per_px: f32,
) -> DepthMap {
    let mut depth = DepthMap::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let lateral = meters_per_px * (x as f32 - cx as f32);
            depth.set(x, y, (side * side + lateral * lateral).sqrt());
        }
    }
    depth
}

/// Sprinkle isolated speck pixels onto a mask.
pub fn add_specks(mask: &mut LabelMask, specks: &[(usize, usize)], label: u32) {
    for &(x, y) in specks {
        mask.set(x, y, label);
    }
}
