//! Density-based clustering (DBSCAN) over (x, y, depth) points.
//!
//! A plain, allocation-light DBSCAN: points with at least `min_samples`
//! neighbors inside an `eps`-ball (the point itself included) seed clusters,
//! reachable border points join them, everything else is noise. Cluster ids
//! are assigned in seed-scan order, so selection rules such as "largest
//! cluster, lowest id on ties" are deterministic.
//!
//! Pixel coordinates and depth meters enter the Euclidean distance unscaled;
//! callers are responsible for any unit normalization they need.
//!
//! Complexity: the neighborhood query is a linear scan, O(n²) overall. Fine
//! for per-observation sidewalk regions, no real-time target applies.
use nalgebra::Vector3;
use serde::Deserialize;
use std::collections::VecDeque;

/// DBSCAN parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct DbscanOptions {
    /// Neighborhood radius.
    pub eps: f32,
    /// Minimum number of points (self included) for a dense neighborhood.
    pub min_samples: usize,
}

impl Default for DbscanOptions {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_samples: 10,
        }
    }
}

/// Per-point assignment: `Some(cluster_id)` or `None` for noise.
#[derive(Clone, Debug)]
pub struct Clustering {
    pub labels: Vec<Option<u32>>,
    pub clusters: u32,
}

impl Clustering {
    /// Member count of each cluster, indexed by cluster id.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.clusters as usize];
        for label in self.labels.iter().flatten() {
            sizes[*label as usize] += 1;
        }
        sizes
    }

    /// Id of the largest cluster; ties break toward the lowest id.
    pub fn largest_cluster(&self) -> Option<u32> {
        let sizes = self.sizes();
        let mut best: Option<(u32, usize)> = None;
        for (id, &size) in sizes.iter().enumerate() {
            if best.map_or(true, |(_, s)| size > s) {
                best = Some((id as u32, size));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Run DBSCAN over `points` with Euclidean `eps`-neighborhoods.
pub fn dbscan(points: &[Vector3<f32>], opts: &DbscanOptions) -> Clustering {
    let n = points.len();
    let eps_sq = opts.eps * opts.eps;
    let mut labels: Vec<Option<u32>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut clusters = 0u32;

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let neighbors = region_query(points, seed, eps_sq);
        if neighbors.len() < opts.min_samples {
            continue; // noise unless a later expansion claims it
        }
        let id = clusters;
        clusters += 1;
        labels[seed] = Some(id);

        let mut queue: VecDeque<usize> = neighbors.into();
        while let Some(p) = queue.pop_front() {
            if !visited[p] {
                visited[p] = true;
                let expanded = region_query(points, p, eps_sq);
                if expanded.len() >= opts.min_samples {
                    queue.extend(expanded);
                }
            }
            if labels[p].is_none() {
                labels[p] = Some(id);
            }
        }
    }

    Clustering { labels, clusters }
}

fn region_query(points: &[Vector3<f32>], center: usize, eps_sq: f32) -> Vec<usize> {
    let c = points[center];
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| (*p - c).norm_squared() <= eps_sq)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(cx: f32, cy: f32, side: usize) -> Vec<Vector3<f32>> {
        let mut pts = Vec::new();
        for dy in 0..side {
            for dx in 0..side {
                pts.push(Vector3::new(cx + dx as f32, cy + dy as f32, 3.0));
            }
        }
        pts
    }

    #[test]
    fn separated_blobs_form_two_clusters() {
        let mut pts = blob(0.0, 0.0, 4);
        pts.extend(blob(100.0, 0.0, 4));
        let clustering = dbscan(
            &pts,
            &DbscanOptions {
                eps: 1.5,
                min_samples: 4,
            },
        );
        assert_eq!(clustering.clusters, 2);
        assert_eq!(clustering.labels[0], Some(0));
        assert_eq!(clustering.labels[16], Some(1));
    }

    #[test]
    fn isolated_points_are_noise() {
        let mut pts = blob(0.0, 0.0, 4);
        pts.push(Vector3::new(50.0, 50.0, 3.0));
        let clustering = dbscan(
            &pts,
            &DbscanOptions {
                eps: 1.5,
                min_samples: 4,
            },
        );
        assert_eq!(clustering.clusters, 1);
        assert_eq!(clustering.labels.last().copied().unwrap(), None);
    }

    #[test]
    fn sparse_input_yields_no_clusters() {
        let pts = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(10.0, 0.0, 0.0),
            Vector3::new(0.0, 10.0, 0.0),
        ];
        let clustering = dbscan(&pts, &DbscanOptions::default());
        assert_eq!(clustering.clusters, 0);
        assert!(clustering.labels.iter().all(Option::is_none));
    }

    #[test]
    fn largest_cluster_breaks_ties_toward_lowest_id() {
        let mut pts = blob(0.0, 0.0, 3);
        pts.extend(blob(100.0, 0.0, 3));
        let clustering = dbscan(
            &pts,
            &DbscanOptions {
                eps: 1.5,
                min_samples: 3,
            },
        );
        assert_eq!(clustering.clusters, 2);
        assert_eq!(clustering.largest_cluster(), Some(0));
    }
}
