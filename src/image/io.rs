//! I/O helpers for masks, depth maps and JSON reports.
//!
//! - `load_mask`: read a PNG/JPEG/etc. into a `LabelMask` via 8-bit grayscale.
//! - `load_depth_map`: read a raw little-endian f32 buffer and reshape it
//!   into rows × columns.
//! - `save_mask_png`: write a mask to a grayscale PNG (labels clamped to 255).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{DepthMap, LabelMask, Raster};
use image::GrayImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert to 8-bit grayscale and widen to labels.
pub fn load_mask(path: &Path) -> Result<LabelMask, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(LabelMask::from_u8(width, height, &data))
}

/// Load a raw binary depth map: `w * h` little-endian f32 values in meters.
pub fn load_depth_map(path: &Path, w: usize, h: usize) -> Result<DepthMap, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    depth_from_le_bytes(w, h, &bytes)
        .map_err(|e| format!("Invalid depth buffer {}: {e}", path.display()))
}

/// Reshape a little-endian f32 byte buffer into a `w × h` depth map.
pub fn depth_from_le_bytes(w: usize, h: usize, bytes: &[u8]) -> Result<DepthMap, String> {
    let expected = w * h * std::mem::size_of::<f32>();
    if bytes.len() != expected {
        return Err(format!(
            "expected {expected} bytes for {w}x{h} f32 depth map, got {}",
            bytes.len()
        ));
    }
    let data = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(DepthMap::from_raw(w, h, data))
}

/// Save a mask to a grayscale PNG. Labels above 255 are clamped; intended
/// for visual inspection, not as a lossless label store.
pub fn save_mask_png(mask: &LabelMask, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &label) in row.iter().enumerate() {
            let v = label.min(255) as u8;
            out.put_pixel(x as u32, y as u32, image::Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_from_le_bytes_rejects_wrong_length() {
        let bytes = vec![0u8; 4 * 3];
        assert!(depth_from_le_bytes(2, 2, &bytes).is_err());
    }

    #[test]
    fn depth_from_le_bytes_reshapes_row_major() {
        let values = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut bytes = Vec::new();
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let depth = depth_from_le_bytes(3, 2, &bytes).unwrap();
        assert_eq!(depth.get(0, 0), 1.0);
        assert_eq!(depth.get(2, 0), 3.0);
        assert_eq!(depth.get(0, 1), 4.0);
        assert_eq!(depth.get(2, 1), 6.0);
    }
}
