use super::color::Color;
use super::point::{Point, mean_of};
use bitvec::prelude::*;

/// Cluster represents one group of a partitioning result
///
/// Members are indices into the observation slice the cluster was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Centroid (K-means) or medoid (K-medoids) of the cluster
    pub representative: Point,
    /// Display color
    pub color: Color,
    /// Indices of observations belonging to this cluster
    pub members: Vec<usize>,
}

impl Cluster {
    /// Creates an empty cluster around `representative`, colored by its position
    pub fn new(index: usize, representative: Point) -> Self {
        Self {
            representative,
            color: Color::for_cluster(index),
            members: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Sum of squared distances from the representative to every member
    pub fn variability(&self, observations: &[Point]) -> u64 {
        self.members
            .iter()
            .map(|&i| self.representative.sq_dist(&observations[i]))
            .fold(0u64, u64::saturating_add)
    }

    /// Integer mean of the member observations
    ///
    /// Returns the origin for an empty cluster.
    pub fn centroid(&self, observations: &[Point]) -> Point {
        mean_of(observations, &self.members)
    }
}

/// Total dissimilarity of a partitioning: sum of all clusters' variability
pub fn dissimilarity(clusters: &[Cluster], observations: &[Point]) -> u64 {
    clusters
        .iter()
        .map(|c| c.variability(observations))
        .fold(0u64, u64::saturating_add)
}

/// Builds a per-observation label vector from clusters
///
/// `labels[i]` = index of the cluster containing observation i, or `None`
/// when no cluster claims it.
pub fn labels(clusters: &[Cluster], num_points: usize) -> Vec<Option<usize>> {
    let mut labels = vec![None; num_points];

    for (c, cluster) in clusters.iter().enumerate() {
        for &idx in &cluster.members {
            if idx < num_points {
                labels[idx] = Some(c);
            }
        }
    }

    labels
}

/// Checks that clusters cover `0..num_points` exactly once each
pub fn is_exact_partition(clusters: &[Cluster], num_points: usize) -> bool {
    let mut seen = bitvec![0; num_points];
    let mut count = 0;

    for cluster in clusters {
        for &idx in &cluster.members {
            if idx >= num_points || seen[idx] {
                return false;
            }
            seen.set(idx, true);
            count += 1;
        }
    }

    count == num_points
}
