//! Owned single-channel f32 depth map in row-major layout (stride == width).
//!
//! Values are distances from the camera in meters. Zero or negative depths
//! receive no special handling here.

/// Per-pixel distance-from-camera grid, in meters.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthMap {
    /// Map width in pixels
    pub w: usize,
    /// Map height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl DepthMap {
    /// Construct a zero-initialized map of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Construct from raw values; `data.len()` must equal `w * h`.
    pub fn from_raw(w: usize, h: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), w * h, "depth buffer does not match dimensions");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the depth at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the depth at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    /// Nearest-neighbor resample to `nw × nh`.
    ///
    /// Used to bring a raw sensor-resolution depth map onto the mask grid
    /// before fusion. Sample positions are scaled by the dimension ratio and
    /// clamped to the source bounds.
    pub fn resize_nearest(&self, nw: usize, nh: usize) -> DepthMap {
        let mut out = DepthMap::new(nw, nh);
        if self.w == 0 || self.h == 0 || nw == 0 || nh == 0 {
            return out;
        }
        let sx = self.w as f32 / nw as f32;
        let sy = self.h as f32 / nh as f32;
        for y in 0..nh {
            let src_y = ((y as f32 * sy) as usize).min(self.h - 1);
            for x in 0..nw {
                let src_x = ((x as f32 * sx) as usize).min(self.w - 1);
                out.set(x, y, self.get(src_x, src_y));
            }
        }
        out
    }
}

impl crate::image::traits::Raster for DepthMap {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_nearest_preserves_corners_and_shape() {
        let mut src = DepthMap::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                src.set(x, y, (y * 4 + x) as f32);
            }
        }
        let out = src.resize_nearest(2, 2);
        assert_eq!(out.dims(), (2, 2));
        assert_eq!(out.get(0, 0), src.get(0, 0));
        assert_eq!(out.get(1, 1), src.get(2, 2));

        let up = src.resize_nearest(8, 8);
        assert_eq!(up.dims(), (8, 8));
        assert_eq!(up.get(0, 0), src.get(0, 0));
        assert_eq!(up.get(7, 7), src.get(3, 3));
    }
}
