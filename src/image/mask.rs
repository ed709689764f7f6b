//! Owned 2D label grid in row-major layout (stride == width).
//!
//! Label 0 is background. Input masks are 8-bit grayscale and widen to `u32`
//! on load; connected-component labeling can hand out more than 255 labels,
//! so the label type stays `u32` through the whole pipeline.

/// Integer-labeled mask identifying which pixels belong to which class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelMask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    /// Number of elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<u32>,
}

impl LabelMask {
    /// Construct an all-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    /// Construct from raw labels; `data.len()` must equal `w * h`.
    pub fn from_raw(w: usize, h: usize, data: Vec<u32>) -> Self {
        assert_eq!(data.len(), w * h, "label buffer does not match dimensions");
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Widen an 8-bit label buffer (e.g. a grayscale image) into a mask.
    pub fn from_u8(w: usize, h: usize, data: &[u8]) -> Self {
        assert_eq!(data.len(), w * h, "label buffer does not match dimensions");
        Self {
            w,
            h,
            stride: w,
            data: data.iter().map(|&v| u32::from(v)).collect(),
        }
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the label at (x, y).
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the label at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: u32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    /// Number of pixels carrying exactly `label`.
    pub fn count(&self, label: u32) -> usize {
        self.data.iter().filter(|&&v| v == label).count()
    }

    /// Number of non-background pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Most frequent non-background label, if any foreground exists.
    pub fn dominant_label(&self) -> Option<u32> {
        let mut counts: std::collections::HashMap<u32, usize> = std::collections::HashMap::new();
        for &v in &self.data {
            if v != 0 {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map(|(label, _)| label)
    }
}

impl crate::image::traits::Raster for LabelMask {
    type Pixel = u32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}
