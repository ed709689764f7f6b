//! Morphological mask cleaning with a square structuring element.
//!
//! Purpose
//! - Remove small isolated foreground specks (opening: erosion then
//!   dilation) and fill small background gaps inside foreground regions
//!   (closing: dilation then erosion) before any depth fusion runs.
//!
//! Design
//! - The mask is binarized first: any non-zero pixel counts as foreground.
//!   After cleaning, surviving pixels are restored to the most frequent
//!   non-zero label of the input. Cleaning is therefore defined for
//!   effectively-binary masks; multi-class masks collapse to their dominant
//!   label and should be split per class by the caller beforehand.
//! - Erosion and dilation use separable min/max passes (horizontal then
//!   vertical), which for a square structuring element equal the full 2D
//!   operator. Borders are handled by clamping the window to the image.
//!
//! Complexity
//! - O(W·H·k) per operation for kernel side `k`.
use crate::image::LabelMask;
use serde::Deserialize;

/// Parameters for the morphological cleaning stage.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CleaningOptions {
    /// Side of the square structuring element, odd and positive.
    pub kernel_size: usize,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self { kernel_size: 5 }
    }
}

/// Apply morphological opening then closing to a mask.
///
/// Shape and label dtype are preserved; the output is a fresh mask.
pub fn clean_mask(mask: &LabelMask, opts: &CleaningOptions) -> LabelMask {
    let radius = opts.kernel_size / 2;
    let label = mask.dominant_label().unwrap_or(0);

    let fg: Vec<bool> = mask.data.iter().map(|&v| v != 0).collect();
    let opened = dilate(&erode(&fg, mask.w, mask.h, radius), mask.w, mask.h, radius);
    let closed = erode(
        &dilate(&opened, mask.w, mask.h, radius),
        mask.w,
        mask.h,
        radius,
    );

    let data = closed.iter().map(|&on| if on { label } else { 0 }).collect();
    LabelMask::from_raw(mask.w, mask.h, data)
}

fn erode(fg: &[bool], w: usize, h: usize, radius: usize) -> Vec<bool> {
    window_pass(fg, w, h, radius, true)
}

fn dilate(fg: &[bool], w: usize, h: usize, radius: usize) -> Vec<bool> {
    window_pass(fg, w, h, radius, false)
}

/// Separable binary min (`all = true`) or max (`all = false`) filter.
fn window_pass(fg: &[bool], w: usize, h: usize, radius: usize, all: bool) -> Vec<bool> {
    if radius == 0 || w == 0 || h == 0 {
        return fg.to_vec();
    }
    let mut tmp = vec![false; w * h];
    // horizontal
    for y in 0..h {
        let row = &fg[y * w..(y + 1) * w];
        for x in 0..w {
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(w - 1);
            let window = &row[x0..=x1];
            tmp[y * w + x] = if all {
                window.iter().all(|&v| v)
            } else {
                window.iter().any(|&v| v)
            };
        }
    }
    // vertical
    let mut out = vec![false; w * h];
    for y in 0..h {
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(h - 1);
        for x in 0..w {
            let mut acc = all;
            for yy in y0..=y1 {
                let v = tmp[yy * w + x];
                if all {
                    acc &= v;
                } else {
                    acc |= v;
                }
            }
            out[y * w + x] = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(w: usize, h: usize, pixels: &[(usize, usize)]) -> LabelMask {
        let mut mask = LabelMask::new(w, h);
        for &(x, y) in pixels {
            mask.set(x, y, 1);
        }
        mask
    }

    #[test]
    fn clean_preserves_shape_and_dtype() {
        let mask = mask_with(17, 11, &[(3, 3), (4, 3)]);
        let cleaned = clean_mask(&mask, &CleaningOptions::default());
        assert_eq!(cleaned.dims(), mask.dims());
        assert_eq!(cleaned.data.len(), mask.data.len());
    }

    #[test]
    fn opening_removes_small_specks() {
        // 2x2 speck, well below a 5x5 kernel
        let mask = mask_with(21, 21, &[(10, 10), (11, 10), (10, 11), (11, 11)]);
        let cleaned = clean_mask(&mask, &CleaningOptions { kernel_size: 5 });
        assert_eq!(cleaned.foreground_count(), 0);
    }

    #[test]
    fn closing_fills_small_holes() {
        let mut mask = LabelMask::new(25, 25);
        for y in 5..20 {
            for x in 5..20 {
                mask.set(x, y, 1);
            }
        }
        mask.set(12, 12, 0); // 1-pixel hole
        let cleaned = clean_mask(&mask, &CleaningOptions { kernel_size: 5 });
        assert_eq!(cleaned.get(12, 12), 1, "hole should be filled");
    }

    #[test]
    fn large_regions_survive_and_keep_their_label() {
        let mut mask = LabelMask::new(30, 30);
        for y in 5..25 {
            for x in 5..25 {
                mask.set(x, y, 7);
            }
        }
        let cleaned = clean_mask(&mask, &CleaningOptions { kernel_size: 5 });
        assert_eq!(cleaned.get(15, 15), 7);
        assert!(cleaned.foreground_count() > 0);
    }
}
