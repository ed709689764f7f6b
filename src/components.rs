//! Connected-component labeling and depth-guided component merging.
//!
//! Labeling is the classic two-pass algorithm over 8-connected non-background
//! pixels with a union-find equivalence table; final labels are compacted to
//! `1..=n` in first-pixel scan order (0 stays background).
//!
//! Merging computes each component's mean depth and unions every pair whose
//! means differ by less than the threshold. The disjoint-set closure makes
//! the result deterministic and independent of enumeration order: components
//! chained by overlapping depth ranges merge transitively. Each merged group
//! is relabeled to the smallest pre-merge label in the group, so the
//! first-scanned sidewalk component keeps label 1.
use crate::error::{check_dims, EstimateError};
use crate::image::{DepthMap, LabelMask};
use log::debug;
use serde::Deserialize;

/// Parameters for depth-guided component merging.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MergeOptions {
    /// Maximum mean-depth difference (meters) for two components to merge.
    pub depth_threshold: f32,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            depth_threshold: 0.5,
        }
    }
}

/// Counters emitted by the merge stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct MergeDiagnostics {
    /// Components found before merging.
    pub components: usize,
    /// Distinct labels remaining after merging.
    pub merged: usize,
}

/// Disjoint-set over component labels `1..=n` (index 0 unused).
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..=n as u32).collect(),
        }
    }

    fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Smaller root wins so merged groups keep the lowest label.
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi as usize] = lo;
        }
    }
}

const NEIGH_BEHIND: [(isize, isize); 4] = [(-1, -1), (0, -1), (1, -1), (-1, 0)];

/// Label 8-connected components of the non-background pixels.
///
/// Returns the component count and a label image with labels `1..=n`.
pub fn label_components(mask: &LabelMask) -> (u32, LabelMask) {
    let (w, h) = mask.dims();
    let mut labels = LabelMask::new(w, h);
    let mut ds = DisjointSet::new(0);
    let mut next = 1u32;

    for y in 0..h {
        for x in 0..w {
            if mask.get(x, y) == 0 {
                continue;
            }
            let mut assigned = 0u32;
            for (dx, dy) in NEIGH_BEHIND {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize {
                    continue;
                }
                let neigh = labels.get(nx as usize, ny as usize);
                if neigh == 0 {
                    continue;
                }
                if assigned == 0 {
                    assigned = neigh;
                } else if neigh != assigned {
                    ds.union(assigned, neigh);
                }
            }
            if assigned == 0 {
                assigned = next;
                next += 1;
                ds.parent.push(assigned);
            }
            labels.set(x, y, assigned);
        }
    }

    // Compact equivalence roots to 1..=n in first-appearance order.
    let mut compact = vec![0u32; next as usize];
    let mut n = 0u32;
    for v in labels.data.iter_mut() {
        if *v == 0 {
            continue;
        }
        let root = ds.find(*v);
        if compact[root as usize] == 0 {
            n += 1;
            compact[root as usize] = n;
        }
        *v = compact[root as usize];
    }
    (n, labels)
}

/// Mean depth per component label `1..=n`.
fn component_mean_depths(labels: &LabelMask, depth: &DepthMap, n: u32) -> Vec<f32> {
    let mut sums = vec![0.0f64; n as usize + 1];
    let mut counts = vec![0usize; n as usize + 1];
    for (i, &label) in labels.data.iter().enumerate() {
        if label != 0 {
            sums[label as usize] += f64::from(depth.data[i]);
            counts[label as usize] += 1;
        }
    }
    (0..=n as usize)
        .map(|i| {
            if counts[i] > 0 {
                (sums[i] / counts[i] as f64) as f32
            } else {
                0.0
            }
        })
        .collect()
}

/// Label components of `mask` and merge those whose mean depths are within
/// `depth_threshold` of each other.
///
/// The output is a generic label map: downstream stages treat the configured
/// sidewalk label (1 for the first-scanned component group) as the nominal
/// sidewalk region.
pub fn merge_components(
    mask: &LabelMask,
    depth: &DepthMap,
    opts: &MergeOptions,
) -> Result<(LabelMask, MergeDiagnostics), EstimateError> {
    check_dims(mask, depth)?;

    let (n, mut labels) = label_components(mask);
    let means = component_mean_depths(&labels, depth, n);

    let mut ds = DisjointSet::new(n as usize);
    for i in 1..=n {
        for j in (i + 1)..=n {
            if (means[i as usize] - means[j as usize]).abs() < opts.depth_threshold {
                ds.union(i, j);
            }
        }
    }

    // Every label maps to the smallest label in its merged group; roots are
    // always the smallest member by construction of `union`.
    let mut remap = vec![0u32; n as usize + 1];
    for label in 1..=n {
        remap[label as usize] = ds.find(label);
    }
    for v in labels.data.iter_mut() {
        if *v != 0 {
            *v = remap[*v as usize];
        }
    }

    let survivors = {
        let mut roots: Vec<u32> = (1..=n).map(|l| remap[l as usize]).collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    };
    let diag = MergeDiagnostics {
        components: n as usize,
        merged: survivors,
    };
    debug!(
        "merge_components: {} components -> {} groups (threshold {} m)",
        diag.components, diag.merged, opts.depth_threshold
    );
    Ok((labels, diag))
}
